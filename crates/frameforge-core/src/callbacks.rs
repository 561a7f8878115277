//! The three optional callables a processor can be configured with.

use frameforge_proto::FieldTag;

use crate::value_map::StampedPayload;

/// A 16-bit checksum value, matching the width used by the reference
/// checksum generator in the scenarios this engine was built against.
pub type ChecksumValue = u16;

/// Invoked after a successful full decode, with a snapshot of every field
/// touched by that decode (not the whole value map — just what this frame
/// updated).
pub type NewMessageFunc = Box<dyn FnMut(&[(FieldTag, StampedPayload)]) + Send>;

/// Given the raw message bytes (including the transmitted checksum
/// position) and the checksum decoded from the `CHECKSUM` field, decide
/// whether to accept the frame.
pub type ChecksumEvaluator = Box<dyn Fn(&[u8], ChecksumValue) -> bool + Send + Sync>;

/// Given the raw message bytes about to be sent (with the `CHECKSUM`
/// position not yet filled in), compute the value to embed there.
pub type ChecksumGenerator = Box<dyn Fn(&[u8]) -> ChecksumValue + Send + Sync>;

/// Per-frame predicate evaluated before a candidate frame is accepted.
/// Defaults to "accept everything", matching the reference checker.
pub type FrameChecker = Box<dyn Fn(&[u8], &frameforge_proto::FrameSchema) -> bool + Send + Sync>;

/// The checker used when none is supplied: accepts every candidate frame.
#[must_use]
pub fn accept_all_checker() -> FrameChecker {
    Box::new(|_msg, _schema| true)
}

/// Optional checksum support. If supplied, the schema is expected to carry
/// a `CHECKSUM` field: the receive path evaluates it before accepting a
/// frame, and the send path generates and inserts it. Absent, `CHECKSUM`
/// positions are treated as ordinary payload bytes.
#[derive(Default)]
pub struct ChecksumCallbacks {
    /// Validates an inbound checksum.
    pub evaluator: Option<ChecksumEvaluator>,
    /// Produces an outbound checksum.
    pub generator: Option<ChecksumGenerator>,
}

impl ChecksumCallbacks {
    /// No checksum support; `CHECKSUM` positions are ordinary bytes.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for ChecksumCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecksumCallbacks")
            .field("evaluator", &self.evaluator.is_some())
            .field("generator", &self.generator.is_some())
            .finish()
    }
}
