//! The frame schema: an ordered sequence of field tags describing a
//! fixed-length on-wire layout.

use crate::error::SchemaError;
use crate::tag::{BuiltinField, FieldTag};

/// An ordered sequence of field tags, one per byte position in a frame.
///
/// Position `i` names which logical field byte `i` of the wire message
/// carries. A field may occupy multiple, non-adjacent positions; the
/// receiver gathers them in schema order (see [`crate::codec::extract_field`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSchema(Vec<FieldTag>);

impl FrameSchema {
    /// Wrap an ordered tag sequence as a schema, without validating it.
    ///
    /// Validation happens once, at [`crate::frame_map::FrameMap::new`]
    /// construction time, against a configured sync value; a bare schema in
    /// isolation cannot be fully checked (it doesn't know the expected sync
    /// length).
    #[must_use]
    pub fn new(tags: Vec<FieldTag>) -> Self {
        Self(tags)
    }

    /// Build a schema from `(tag, repeat count)` runs, e.g.
    /// `FrameSchema::from_runs(&[(FieldTag::SYNC, 1), (FieldTag::User(0), 3)])`.
    ///
    /// Convenience constructor recovered from the original `assembleSerialFrame`,
    /// used heavily by test fixtures that lay out a frame run-by-run.
    #[must_use]
    pub fn from_runs(runs: &[(FieldTag, usize)]) -> Self {
        let mut tags = Vec::new();
        for &(tag, count) in runs {
            tags.extend(std::iter::repeat(tag).take(count));
        }
        Self(tags)
    }

    /// Length of the schema in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the schema has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The tag sequence as a slice.
    #[must_use]
    pub fn tags(&self) -> &[FieldTag] {
        &self.0
    }

    /// Byte offset of the first position of `field`'s run, if present.
    #[must_use]
    pub fn offset_of(&self, field: FieldTag) -> Option<usize> {
        self.0.iter().position(|&t| t == field)
    }

    /// Length of the contiguous run starting at `field`'s first occurrence,
    /// or `None` if `field` does not appear.
    ///
    /// Does not itself check contiguity; use [`validate_schema`] for that.
    #[must_use]
    pub fn run_len(&self, field: FieldTag) -> Option<usize> {
        let start = self.offset_of(field)?;
        let len = self.0[start..].iter().take_while(|&&t| t == field).count();
        Some(len)
    }

    /// Rotate the schema so it starts at the first `SYNC` position.
    ///
    /// Pure reshuffling of positions: decoded field values are identical
    /// whether a schema is normalized or not, since [`crate::codec::extract_field`]
    /// and [`crate::codec::insert_field`] only look at tag-to-position
    /// mappings, not absolute offsets. Provided for callers who find a
    /// sync-first layout easier to reason about.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let Some(sync_start) = self.offset_of(FieldTag::SYNC) else {
            return self.clone();
        };
        let mut rotated = self.0[sync_start..].to_vec();
        rotated.extend_from_slice(&self.0[..sync_start]);
        Self(rotated)
    }
}

impl std::ops::Deref for FrameSchema {
    type Target = [FieldTag];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Validate a single schema in isolation against spec.md §3/§4.4:
///
/// - non-empty,
/// - exactly one contiguous `SYNC` run whose length equals `sync_value_len`,
/// - at most one contiguous `FRAME` run, no longer than one byte (a frame id
///   is a `u8`).
///
/// Does not check cross-schema alignment; see
/// [`crate::frame_map::FrameMap::new`] for that.
pub fn validate_schema(schema: &FrameSchema, sync_value_len: usize) -> Result<(), SchemaError> {
    if schema.is_empty() {
        return Err(SchemaError::EmptySchema);
    }

    let Some(sync_start) = schema.offset_of(FieldTag::SYNC) else {
        return Err(SchemaError::MissingSync);
    };

    let sync_run = schema.run_len(FieldTag::SYNC).unwrap_or(0);
    if schema.tags()[sync_start + sync_run..].iter().any(|&t| t == FieldTag::SYNC) {
        return Err(SchemaError::DiscontinuousSync);
    }
    if sync_run != sync_value_len {
        return Err(SchemaError::SyncLengthMismatch { expected: sync_value_len, actual: sync_run });
    }

    if let Some(frame_start) = schema.offset_of(FieldTag::FRAME) {
        let frame_run = schema.run_len(FieldTag::FRAME).unwrap_or(0);
        if schema.tags()[frame_start + frame_run..].iter().any(|&t| t == FieldTag::FRAME) {
            return Err(SchemaError::DiscontinuousFrame);
        }
        if frame_run > u8::BITS as usize / 8 {
            return Err(SchemaError::FrameRunTooLong(frame_run));
        }
    }

    Ok(())
}

/// True if `field`'s positions, if any, form a single contiguous run.
#[must_use]
pub fn is_contiguous_run(schema: &FrameSchema, field: FieldTag) -> bool {
    let Some(start) = schema.offset_of(field) else {
        return true;
    };
    let run = schema.run_len(field).unwrap_or(0);
    !schema.tags()[start + run..].iter().any(|&t| t == field)
}

/// Convenience re-export so callers spelling out a run-of-term padding don't
/// need to import [`BuiltinField`] separately.
#[must_use]
pub fn term_run(count: usize) -> Vec<(FieldTag, usize)> {
    vec![(FieldTag::Builtin(BuiltinField::Term), count)]
}
