//! The frame processor: sync search with resync, multi-frame
//! discrimination, field extraction/packing, and the protected value map
//! that coordinates the parser with external readers and writers.
//!
//! Built on the schema model and codecs in `frameforge-proto`; the
//! concrete transceivers this processor is driven with live in
//! `frameforge-transport`.

pub mod callbacks;
pub mod error;
pub mod processor;
pub mod transceiver;
pub mod value_map;

pub use callbacks::{ChecksumCallbacks, ChecksumValue, FrameChecker};
pub use error::{FatalError, FrameError, NonFatalError};
pub use processor::{FrameProcessor, PROCESSOR_BUFFER_SIZE};
pub use transceiver::Transceiver;
pub use value_map::{StampedPayload, Timestamp, ValueMap};
