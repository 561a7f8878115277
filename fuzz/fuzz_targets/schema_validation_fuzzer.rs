//! Fuzz target for `validate_schema` and `FrameMap::new`.
//!
//! Neither function should ever panic, for any tag sequence or sync
//! length: malformed input must come back as a `SchemaError`, not a crash.

#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use frameforge_proto::schema::validate_schema;
use frameforge_proto::{FieldTag, FrameMap, FrameSchema};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum TagChoice {
    Sync,
    Frame,
    Checksum,
    Term,
    User(i32),
}

impl From<TagChoice> for FieldTag {
    fn from(choice: TagChoice) -> Self {
        match choice {
            TagChoice::Sync => FieldTag::SYNC,
            TagChoice::Frame => FieldTag::FRAME,
            TagChoice::Checksum => FieldTag::CHECKSUM,
            TagChoice::Term => FieldTag::TERM,
            TagChoice::User(id) => FieldTag::User(id),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    schemas: Vec<(u8, Vec<TagChoice>)>,
    default_frame_id: u8,
    sync_value_len: u8,
}

fuzz_target!(|input: Input| {
    if input.schemas.len() > 32 {
        return;
    }

    let sync_value_len = usize::from(input.sync_value_len);
    for (_, tags) in &input.schemas {
        if tags.len() > 64 {
            return;
        }
        let schema = FrameSchema::new(tags.iter().copied().map(FieldTag::from).collect());
        let _ = validate_schema(&schema, sync_value_len);
    }

    let schemas: BTreeMap<u8, FrameSchema> = input
        .schemas
        .into_iter()
        .map(|(id, tags)| (id, FrameSchema::new(tags.into_iter().map(FieldTag::from).collect())))
        .collect();
    let _ = FrameMap::new(schemas, input.default_frame_id, sync_value_len);
});
