//! Test doubles for exercising [`frameforge_core::FrameProcessor`] without
//! real I/O: an in-memory loopback transceiver pair, and a chaotic wrapper
//! that injects receive-path faults under a seeded RNG.

pub mod chaotic_transceiver;
pub mod loopback;

pub use chaotic_transceiver::ChaoticTransceiver;
pub use loopback::LoopbackTransceiver;
