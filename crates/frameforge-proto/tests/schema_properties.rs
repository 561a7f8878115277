//! Property-based tests for schema validation and field codecs.
//!
//! These verify invariants from spec.md §3/§4.4/§8 hold for arbitrary
//! inputs, not just the hand-picked scenarios in the unit tests.

use frameforge_proto::codec::{extract_field, insert_field};
use frameforge_proto::{FieldTag, FrameSchema, SchemaError};
use proptest::prelude::*;

fn arbitrary_user_tag() -> impl Strategy<Value = FieldTag> {
    (0..frameforge_proto::tag::RESERVED_MIN).prop_map(|id| FieldTag::user(id).unwrap())
}

/// Build an arbitrary well-formed schema: a shuffled run of user tags with
/// a single contiguous SYNC run spliced in at a random position.
fn arbitrary_valid_schema(sync_len: usize) -> impl Strategy<Value = FrameSchema> {
    (prop::collection::vec(arbitrary_user_tag(), 0..12), 0usize..8).prop_map(
        move |(user_tags, insert_at)| {
            let insert_at = insert_at.min(user_tags.len());
            let mut tags = user_tags[..insert_at].to_vec();
            tags.extend(std::iter::repeat(FieldTag::SYNC).take(sync_len));
            tags.extend_from_slice(&user_tags[insert_at..]);
            FrameSchema::new(tags)
        },
    )
}

proptest! {
    #[test]
    fn prop_valid_schema_always_validates(schema in arbitrary_valid_schema(3)) {
        frameforge_proto::schema::validate_schema(&schema, 3).unwrap();
    }

    #[test]
    fn prop_normalize_starts_with_sync(schema in arbitrary_valid_schema(2)) {
        let normalized = schema.normalize();
        prop_assert_eq!(normalized.tags()[0], FieldTag::SYNC);
        prop_assert_eq!(normalized.len(), schema.len());
    }

    #[test]
    fn prop_normalize_preserves_decoded_values(
        schema in arbitrary_valid_schema(2),
        wire in prop::collection::vec(any::<u8>(), 0..20),
    ) {
        let tags = schema.tags().to_vec();
        let wire_len = wire.len().min(tags.len());
        let wire = &wire[..wire_len];

        let sync_start = schema.offset_of(FieldTag::SYNC).unwrap();
        let normalized = schema.normalize();
        let mut rotated_wire = wire[sync_start.min(wire.len())..].to_vec();
        rotated_wire.extend_from_slice(&wire[..sync_start.min(wire.len())]);

        for tag in tags.iter().copied() {
            let mut before = [0u8; 8];
            let mut after = [0u8; 8];
            let n_before = extract_field(wire, &schema, tag, &mut before);
            let n_after = extract_field(&rotated_wire, &normalized, tag, &mut after);
            prop_assert_eq!(n_before, n_after);
            prop_assert_eq!(&before[..n_before], &after[..n_after]);
        }
    }

    #[test]
    fn prop_extract_insert_round_trip(
        payload in prop::collection::vec(any::<u8>(), 0..8),
        padding_before in 0usize..5,
        padding_after in 0usize..5,
    ) {
        let tag = FieldTag::user(0).unwrap();
        let other = FieldTag::user(1).unwrap();
        let mut tags = vec![other; padding_before];
        tags.extend(std::iter::repeat(tag).take(payload.len()));
        tags.extend(std::iter::repeat(other).take(padding_after));
        let schema = FrameSchema::new(tags);

        let mut wire = vec![0u8; schema.len()];
        insert_field(&mut wire, &schema, tag, &payload);

        let mut extracted = vec![0u8; payload.len()];
        let n = extract_field(&wire, &schema, tag, &mut extracted);
        prop_assert_eq!(n, payload.len());
        prop_assert_eq!(extracted, payload);
    }

    #[test]
    fn prop_user_tag_boundary(id in any::<i32>()) {
        let result = FieldTag::user(id);
        if (0..frameforge_proto::tag::RESERVED_MIN).contains(&id) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(SchemaError::InvalidUserTag(id)));
        }
    }
}
