//! Error taxonomy: fatal failures that discard the processor, and
//! non-fatal failures that leave it usable.

use frameforge_proto::{FieldTag, SchemaError};
use thiserror::Error;

/// An unrecoverable failure. The [`crate::processor::FrameProcessor`] that
/// produced this must be discarded; none of its methods should be called
/// again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FatalError {
    /// The transceiver's `init` returned false.
    #[error("transceiver initialization failed")]
    TransceiverInitFailed,

    /// A schema, frame map, or sync value failed structural validation
    /// (everything in [`SchemaError`] except a schema simply lacking a
    /// `SYNC` field, which is reported as [`NonFatalError::MissingSyncField`]
    /// instead).
    #[error("processor configuration rejected: {0}")]
    InvalidConfiguration(#[source] SchemaError),

    /// A checksum generator returned no value for a message that is
    /// required to carry one.
    ///
    /// Rust's type system already forbids a closure from "not returning a
    /// value", so this only fires if a caller-supplied generator panics
    /// and is caught at the boundary; kept so the error taxonomy has a slot
    /// for it, matching the open question about generators that fail to
    /// produce a checksum on every path.
    #[error("checksum generator for frame {0} did not produce a value")]
    ChecksumGeneratorFailed(u8),
}

/// A per-operation failure. The processor remains usable after returning
/// one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NonFatalError {
    /// A schema in the frame map has no `SYNC` field at all.
    #[error("frame {0} has no SYNC field")]
    MissingSyncField(u8),

    /// `send` was called with a frame id absent from the frame map.
    #[error("cannot send: unknown frame id {0}")]
    UnknownFrameId(u8),

    /// `send` needed a field that has never been set in the value map.
    #[error("cannot send frame {frame_id}: field {field:?} has no value")]
    MissingFieldForSend {
        /// The frame id being sent.
        frame_id: u8,
        /// The field tag with no value map entry.
        field: FieldTag,
    },
}

/// Top-level error surface: every fallible operation in this crate returns
/// one of these two kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// See [`FatalError`].
    #[error(transparent)]
    Fatal(#[from] FatalError),
    /// See [`NonFatalError`].
    #[error(transparent)]
    NonFatal(#[from] NonFatalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_and_non_fatal_are_distinguishable() {
        let fatal: FrameError = FatalError::TransceiverInitFailed.into();
        let non_fatal: FrameError = NonFatalError::UnknownFrameId(9).into();
        assert!(matches!(fatal, FrameError::Fatal(_)));
        assert!(matches!(non_fatal, FrameError::NonFatal(_)));
    }
}
