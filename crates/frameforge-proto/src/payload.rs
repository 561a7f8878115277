//! Bounded field payloads: the byte strings stored in the value map.

use crate::error::SchemaError;

/// Maximum length of a field payload, a sync value, or a single extracted
/// field's bytes.
pub const MAX_DATA_BYTES: usize = 8;

/// A bounded byte string, at most [`MAX_DATA_BYTES`] bytes.
///
/// Mirrors the original `SerialData`: a fixed-capacity inline buffer rather
/// than a heap allocation, since every payload in this protocol is tiny.
///
/// # Note on the length bound
///
/// [`FieldPayload::new`] rejects lengths `>= MAX_DATA_BYTES`, not just
/// `> MAX_DATA_BYTES`. This off-by-one is inherited from the original
/// `SerialData::operator=` assertion and is preserved deliberately: it is
/// the boundary every external caller of [`crate::schema`] and the value map
/// has always been held to, and loosening it would silently change which
/// `set_field` calls succeed. Bytes extracted internally by the frame
/// processor during decode are capped to `MAX_DATA_BYTES` by construction
/// (the scratch buffer used for extraction is exactly that size), so a full
/// 8-byte field can still be *received* over the wire even though it cannot
/// be *assigned* through the public constructor.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldPayload {
    len: u8,
    bytes: [u8; MAX_DATA_BYTES],
}

impl Default for FieldPayload {
    fn default() -> Self {
        Self { len: 0, bytes: [0; MAX_DATA_BYTES] }
    }
}

impl std::fmt::Debug for FieldPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldPayload").field("bytes", &self.as_slice()).finish()
    }
}

impl FieldPayload {
    /// Build a payload from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::PayloadTooLong`] if `bytes.len() >= MAX_DATA_BYTES`.
    pub fn new(bytes: &[u8]) -> Result<Self, SchemaError> {
        if bytes.len() >= MAX_DATA_BYTES {
            return Err(SchemaError::PayloadTooLong(bytes.len()));
        }
        let mut buf = [0u8; MAX_DATA_BYTES];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self { len: bytes.len() as u8, bytes: buf })
    }

    /// Build a payload from bytes already known to fit, without the
    /// `>= MAX_DATA_BYTES` check `new` performs.
    ///
    /// Used internally by the frame processor, whose extraction scratch
    /// buffer is exactly `MAX_DATA_BYTES` long and so can produce a
    /// full-length payload that `new` would reject. Hidden from the public
    /// API despite the `pub` visibility needed to cross into
    /// `frameforge-core`; external callers always go through [`Self::new`].
    #[doc(hidden)]
    #[must_use]
    pub fn from_extracted(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_DATA_BYTES);
        let mut buf = [0u8; MAX_DATA_BYTES];
        let take = bytes.len().min(MAX_DATA_BYTES);
        buf[..take].copy_from_slice(&bytes[..take]);
        Self { len: take as u8, bytes: buf }
    }

    /// The payload's bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if the payload holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
