//! Errors raised while building or validating schemas, frame maps, and
//! field payloads.
//!
//! These are always construction-time failures: once a [`crate::schema::FrameSchema`]
//! or [`crate::frame_map::FrameMap`] exists it is immutable and cannot fail later.
//! `frameforge-core` treats every variant here as fatal when it surfaces
//! through processor construction.

use thiserror::Error;

/// Failure building a schema, a frame map, or a field payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A user field tag was negative or collided with the reserved range.
    #[error("user field tag {0} must be non-negative and below the reserved range")]
    InvalidUserTag(i32),

    /// A schema had zero positions.
    #[error("schema must have at least one position")]
    EmptySchema,

    /// A schema had no `SYNC` position.
    #[error("schema has no SYNC field")]
    MissingSync,

    /// A schema's `SYNC` positions were not contiguous.
    #[error("SYNC field is not a contiguous run")]
    DiscontinuousSync,

    /// A schema's `SYNC` run length didn't match the configured sync value.
    #[error("SYNC run has length {actual}, expected {expected} to match the sync value")]
    SyncLengthMismatch {
        /// Length required by the configured sync value.
        expected: usize,
        /// Length actually found in the schema.
        actual: usize,
    },

    /// A schema's `FRAME` positions were not contiguous, or there was more
    /// than one run of them.
    #[error("FRAME field is not a single contiguous run")]
    DiscontinuousFrame,

    /// A schema's `FRAME` run was longer than a frame id (one byte) can fill.
    #[error("FRAME run has length {0}, but a frame id is at most 1 byte")]
    FrameRunTooLong(usize),

    /// A frame map held more than one schema, but some schema lacked a
    /// `FRAME` run (required to discriminate between schemas).
    #[error("frame map has multiple schemas but frame id {0} has no FRAME field")]
    MissingFrameField(u8),

    /// The `SYNC` run landed at a different byte offset in different
    /// schemas of the same frame map.
    #[error(
        "SYNC field offset is not aligned across schemas: frame {frame_id} has offset {actual}, expected {expected}"
    )]
    SyncOffsetMismatch {
        /// Frame id of the misaligned schema.
        frame_id: u8,
        /// Offset shared by every other schema in the map.
        expected: usize,
        /// Offset found in this schema.
        actual: usize,
    },

    /// The `FRAME` run landed at a different byte offset in different
    /// schemas of the same frame map.
    #[error(
        "FRAME field offset is not aligned across schemas: frame {frame_id} has offset {actual}, expected {expected}"
    )]
    FrameOffsetMismatch {
        /// Frame id of the misaligned schema.
        frame_id: u8,
        /// Offset shared by every other schema in the map.
        expected: usize,
        /// Offset found in this schema.
        actual: usize,
    },

    /// A frame map had no entries.
    #[error("frame map must have at least one schema")]
    EmptyFrameMap,

    /// The default frame id was not present in the frame map.
    #[error("default frame id {0} is not present in the frame map")]
    DefaultFrameMissing(u8),

    /// A sync value was empty or longer than `MAX_DATA_BYTES`.
    #[error("sync value length {0} must be in 1..=MAX_DATA_BYTES")]
    InvalidSyncValueLength(usize),

    /// A field payload was at or beyond `MAX_DATA_BYTES`.
    #[error("field payload length {0} must be less than MAX_DATA_BYTES ({max})", max = crate::payload::MAX_DATA_BYTES)]
    PayloadTooLong(usize),
}
