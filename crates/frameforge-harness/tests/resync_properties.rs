//! Property-based resync testing: injecting arbitrary garbage before a
//! valid frame must yield the same post-decode value-map state as sending
//! the valid frame alone.

use std::collections::BTreeMap;

use frameforge_core::{ChecksumCallbacks, FrameProcessor, Timestamp};
use frameforge_harness::LoopbackTransceiver;
use frameforge_proto::{FieldPayload, FieldTag, FrameSchema};
use proptest::prelude::*;

fn schema() -> FrameSchema {
    FrameSchema::new(vec![FieldTag::SYNC, FieldTag::User(1), FieldTag::User(2), FieldTag::User(3)])
}

fn frame_map() -> BTreeMap<u8, FrameSchema> {
    let mut m = BTreeMap::new();
    m.insert(0, schema());
    m
}

fn arbitrary_garbage() -> impl Strategy<Value = Vec<u8>> {
    // Bytes that can't themselves be mistaken for the sync marker 'A'.
    prop::collection::vec(any::<u8>().prop_filter("no embedded sync byte", |b| *b != b'A'), 0..24)
}

fn decode_after(garbage: &[u8]) -> [FieldPayload; 3] {
    let (mut driver, processor_end) = LoopbackTransceiver::pair();
    let mut processor =
        FrameProcessor::new(processor_end, frame_map(), 0, b"A".to_vec(), None, ChecksumCallbacks::none()).unwrap();

    driver.send(garbage);
    driver.send(b"AqweA");
    processor.update(Timestamp::ZERO);

    [
        processor.get_field(FieldTag::User(1)).payload,
        processor.get_field(FieldTag::User(2)).payload,
        processor.get_field(FieldTag::User(3)).payload,
    ]
}

proptest! {
    #[test]
    fn garbage_prefix_does_not_change_decoded_fields(garbage in arbitrary_garbage()) {
        let with_garbage = decode_after(&garbage);
        let clean = decode_after(&[]);
        prop_assert_eq!(with_garbage, clean);
    }
}
