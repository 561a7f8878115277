//! Schema model and byte-level codecs for the frameforge framing engine.
//!
//! This crate has no I/O and no threading concerns: it describes how a
//! fixed-length byte layout maps onto named fields, and provides the
//! primitives ([`codec::extract_field`], [`codec::insert_field`],
//! [`codec::find_subslice`]) that turn that description into bytes and
//! back. The stateful parser that drives these primitives over a live
//! transport lives in `frameforge-core`.

pub mod codec;
pub mod error;
pub mod frame_map;
pub mod payload;
pub mod schema;
pub mod tag;

pub use error::SchemaError;
pub use frame_map::FrameMap;
pub use payload::{FieldPayload, MAX_DATA_BYTES};
pub use schema::FrameSchema;
pub use tag::{BuiltinField, FieldTag};
