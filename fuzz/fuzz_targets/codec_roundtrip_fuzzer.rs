//! Fuzz target for `extract_field`/`insert_field` against arbitrary schemas
//! and wire bytes.
//!
//! # Invariants
//!
//! - Neither function ever panics or indexes out of bounds, for any schema
//!   length, any tag sequence, and any source/destination buffer length.
//! - Extracting a field then inserting it back into a same-shaped zeroed
//!   buffer reproduces the original bytes at that field's positions.

#![no_main]

use arbitrary::Arbitrary;
use frameforge_proto::codec::{extract_field, insert_field};
use frameforge_proto::FieldTag;
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
    schema: Vec<TagChoice>,
    src: Vec<u8>,
    field: TagChoice,
}

fuzz_target!(|input: Input| {
    if input.schema.len() > 256 || input.src.len() > 256 {
        return;
    }
    let schema: Vec<FieldTag> = input.schema.iter().copied().map(FieldTag::from).collect();
    let field: FieldTag = input.field.into();

    let mut extracted = vec![0u8; schema.len()];
    let n = extract_field(&input.src, &schema, field, &mut extracted);
    assert!(n <= extracted.len());

    let mut rebuilt = vec![0u8; schema.len()];
    insert_field(&mut rebuilt, &schema, field, &extracted[..n]);

    // Every position insert_field touched must match what extract_field read.
    let mut next = 0;
    for (i, &tag) in schema.iter().enumerate() {
        if tag == field {
            if next < n {
                assert_eq!(rebuilt[i], extracted[next]);
            }
            next += 1;
        }
    }
});
