//! Fuzz target for `FrameProcessor::update` driven over arbitrary received
//! bytes.
//!
//! `update` must never panic, regardless of schema shape, sync value, or
//! wire bytes — including when the accumulation buffer fills past
//! `PROCESSOR_BUFFER_SIZE` under a flood of non-sync bytes (spec.md §8
//! invariant 3, the drop-on-overflow policy).

#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use frameforge_core::{ChecksumCallbacks, FrameProcessor, Timestamp};
use frameforge_harness::LoopbackTransceiver;
use frameforge_proto::{FieldTag, FrameSchema};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum TagChoice {
    Sync,
    Frame,
    User(i32),
}

impl From<TagChoice> for FieldTag {
    fn from(choice: TagChoice) -> Self {
        match choice {
            TagChoice::Sync => FieldTag::SYNC,
            TagChoice::Frame => FieldTag::FRAME,
            TagChoice::User(id) => FieldTag::User(id.rem_euclid(1000)),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    schema_tags: Vec<TagChoice>,
    sync_value: Vec<u8>,
    wire: Vec<u8>,
    chunks: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if input.schema_tags.len() > 64 || input.sync_value.is_empty() || input.sync_value.len() >= 8 || input.wire.len() > 4096 {
        return;
    }

    let schema = FrameSchema::new(input.schema_tags.into_iter().map(FieldTag::from).collect());
    let mut schemas = BTreeMap::new();
    schemas.insert(0, schema);

    let (mut driver, processor_end) = LoopbackTransceiver::pair();
    let Ok(mut processor) =
        FrameProcessor::new(processor_end, schemas, 0, input.sync_value, None, ChecksumCallbacks::none())
    else {
        return;
    };

    driver.send(&input.wire);

    // Drive `update` in arbitrary-sized bursts rather than once, to exercise
    // the resync loop across partial deliveries.
    let mut now = Timestamp::ZERO;
    let burst_count = input.chunks.len().max(1).min(64);
    for _ in 0..burst_count {
        processor.update(now);
        now += Timestamp::from_millis(1);
        driver.send(&input.wire);
    }
});
