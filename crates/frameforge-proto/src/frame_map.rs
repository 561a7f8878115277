//! The frame map: the set of schemas a processor can choose between, keyed
//! by frame id.

use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::schema::{validate_schema, FrameSchema};
use crate::tag::FieldTag;

/// Mapping from frame id to frame schema, plus a designated default.
///
/// Used both at parse time (to pick a schema once the frame id is known)
/// and at send time (to select the outbound layout). Validated as a whole
/// at construction: every schema must independently validate against the
/// sync value, and — if there is more than one schema — the `SYNC` and
/// `FRAME` runs must sit at the same byte offset in every schema, so the
/// processor can compute a tentative message boundary before it knows which
/// schema it's looking at.
#[derive(Debug, Clone)]
pub struct FrameMap {
    schemas: BTreeMap<u8, FrameSchema>,
    default_frame_id: u8,
}

impl FrameMap {
    /// Validate and construct a frame map.
    ///
    /// # Errors
    ///
    /// See [`SchemaError`]: an empty map, a schema that fails
    /// [`validate_schema`], a missing `FRAME` field when more than one
    /// schema is present, misaligned `SYNC`/`FRAME` offsets across schemas,
    /// or a default frame id absent from `schemas`.
    pub fn new(
        schemas: BTreeMap<u8, FrameSchema>,
        default_frame_id: u8,
        sync_value_len: usize,
    ) -> Result<Self, SchemaError> {
        if schemas.is_empty() {
            return Err(SchemaError::EmptyFrameMap);
        }

        for schema in schemas.values() {
            validate_schema(schema, sync_value_len)?;
        }

        if schemas.len() > 1 {
            for (&frame_id, schema) in &schemas {
                if schema.offset_of(FieldTag::FRAME).is_none() {
                    return Err(SchemaError::MissingFrameField(frame_id));
                }
            }
        }

        let mut expected_sync_offset = None;
        let mut expected_frame_offset = None;
        for (&frame_id, schema) in &schemas {
            let sync_offset = schema
                .offset_of(FieldTag::SYNC)
                .expect("validate_schema already required a SYNC field");
            match expected_sync_offset {
                None => expected_sync_offset = Some(sync_offset),
                Some(expected) if expected != sync_offset => {
                    return Err(SchemaError::SyncOffsetMismatch {
                        frame_id,
                        expected,
                        actual: sync_offset,
                    });
                },
                Some(_) => {},
            }

            if let Some(frame_offset) = schema.offset_of(FieldTag::FRAME) {
                match expected_frame_offset {
                    None => expected_frame_offset = Some(frame_offset),
                    Some(expected) if expected != frame_offset => {
                        return Err(SchemaError::FrameOffsetMismatch {
                            frame_id,
                            expected,
                            actual: frame_offset,
                        });
                    },
                    Some(_) => {},
                }
            }
        }

        if !schemas.contains_key(&default_frame_id) {
            return Err(SchemaError::DefaultFrameMissing(default_frame_id));
        }

        Ok(Self { schemas, default_frame_id })
    }

    /// The designated default frame id, used to bootstrap parsing before a
    /// frame id has been decoded from the wire.
    #[must_use]
    pub fn default_frame_id(&self) -> u8 {
        self.default_frame_id
    }

    /// The default schema.
    #[must_use]
    pub fn default_schema(&self) -> &FrameSchema {
        self.schema(self.default_frame_id).expect("default frame id is always present")
    }

    /// Look up a schema by frame id.
    #[must_use]
    pub fn schema(&self, frame_id: u8) -> Option<&FrameSchema> {
        self.schemas.get(&frame_id)
    }

    /// True if more than one schema is registered (frame-id discrimination
    /// is only performed in this case).
    #[must_use]
    pub fn is_multi_frame(&self) -> bool {
        self.schemas.len() > 1
    }

    /// Number of schemas registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True if no schemas are registered (never true for a successfully
    /// constructed map, exposed for symmetry with `len`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate over `(frame_id, schema)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &FrameSchema)> {
        self.schemas.iter().map(|(&id, schema)| (id, schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_schema(sync_len: usize) -> BTreeMap<u8, FrameSchema> {
        let mut m = BTreeMap::new();
        m.insert(
            0,
            FrameSchema::from_runs(&[
                (FieldTag::SYNC, sync_len),
                (FieldTag::User(0), 1),
                (FieldTag::User(1), 1),
            ]),
        );
        m
    }

    #[test]
    fn single_schema_map_does_not_require_frame_field() {
        let map = FrameMap::new(single_schema(1), 0, 1).unwrap();
        assert!(!map.is_multi_frame());
    }

    #[test]
    fn rejects_empty_map() {
        assert_eq!(FrameMap::new(BTreeMap::new(), 0, 1), Err(SchemaError::EmptyFrameMap));
    }

    #[test]
    fn rejects_missing_default() {
        let err = FrameMap::new(single_schema(1), 5, 1).unwrap_err();
        assert_eq!(err, SchemaError::DefaultFrameMissing(5));
    }

    #[test]
    fn multi_schema_requires_frame_field() {
        let mut schemas = single_schema(1);
        schemas.insert(1, FrameSchema::from_runs(&[(FieldTag::SYNC, 1), (FieldTag::User(0), 2)]));
        let err = FrameMap::new(schemas, 0, 1).unwrap_err();
        assert!(matches!(err, SchemaError::MissingFrameField(_)));
    }

    #[test]
    fn multi_schema_requires_aligned_sync_offset() {
        let mut schemas = BTreeMap::new();
        schemas.insert(
            0,
            FrameSchema::from_runs(&[(FieldTag::SYNC, 1), (FieldTag::FRAME, 1), (FieldTag::User(0), 1)]),
        );
        schemas.insert(
            1,
            FrameSchema::from_runs(&[(FieldTag::FRAME, 1), (FieldTag::SYNC, 1), (FieldTag::User(0), 1)]),
        );
        let err = FrameMap::new(schemas, 0, 1).unwrap_err();
        assert!(matches!(err, SchemaError::SyncOffsetMismatch { .. }));
    }

    #[test]
    fn s2_style_schemas_align_and_validate() {
        // FRAME at position 1, SYNC at position 4, matching spec.md scenario S2.
        let mut schemas = BTreeMap::new();
        schemas.insert(
            0,
            FrameSchema::new(vec![
                FieldTag::User(0),
                FieldTag::FRAME,
                FieldTag::User(1),
                FieldTag::User(1),
                FieldTag::SYNC,
                FieldTag::User(1),
                FieldTag::User(2),
            ]),
        );
        schemas.insert(
            1,
            FrameSchema::new(vec![
                FieldTag::User(1),
                FieldTag::FRAME,
                FieldTag::User(1),
                FieldTag::User(3),
                FieldTag::SYNC,
                FieldTag::User(2),
                FieldTag::User(1),
            ]),
        );
        let map = FrameMap::new(schemas, 0, 1).unwrap();
        assert!(map.is_multi_frame());
        assert_eq!(map.len(), 2);
    }
}
