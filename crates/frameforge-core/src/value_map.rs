//! The protected value map: the mutually-exclusive field-to-payload store
//! shared between the parser and external readers.
//!
//! The original exposes this as an explicit move-out/move-back handle: a
//! caller locks the map, takes ownership of it, mutates it, and must hand
//! it back before anyone else can acquire it — forgetting the hand-back is
//! a programming error. [`std::sync::Mutex`] gives the identical mutual
//! exclusion without a way to forget the hand-back: the guard returned by
//! a lock releases automatically when dropped, so "failure to return" is
//! not a state this type can get into.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use frameforge_proto::{FieldPayload, FieldTag};

/// Opaque point in time at which a field was last written. The processor
/// never interprets this value, only stamps and forwards it; callers
/// typically pass wall-clock time, or a virtual clock in tests.
pub type Timestamp = std::time::Duration;

/// A payload paired with the timestamp of its last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampedPayload {
    /// The field's current value. Zero-length if never set.
    pub payload: FieldPayload,
    /// When it was last written. Zero if never set.
    pub timestamp: Timestamp,
}

/// Mutually-exclusive field-to-payload map.
#[derive(Debug, Default)]
pub struct ValueMap {
    inner: Mutex<HashMap<FieldTag, StampedPayload>>,
}

impl ValueMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Mutex::new(HashMap::new()) }
    }

    /// A map pre-seeded with one entry, used at construction to install the
    /// sync value under [`FieldTag::SYNC`].
    #[must_use]
    pub fn seeded_with(field: FieldTag, payload: FieldPayload, now: Timestamp) -> Self {
        let map = Self::new();
        map.set_field(field, payload, now);
        map
    }

    /// Acquire the lock, recovering the data if a prior transaction
    /// panicked while holding it rather than leaving the map permanently
    /// unusable.
    fn lock(&self) -> MutexGuard<'_, HashMap<FieldTag, StampedPayload>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True if `field` has an entry in the map.
    #[must_use]
    pub fn has_data_for_field(&self, field: FieldTag) -> bool {
        self.lock().contains_key(&field)
    }

    /// The current value for `field`, or the zero-length, zero-timestamp
    /// default if it has never been set.
    #[must_use]
    pub fn get_field(&self, field: FieldTag) -> StampedPayload {
        self.lock().get(&field).copied().unwrap_or_default()
    }

    /// Insert or overwrite `field` with `payload`, stamped `now`.
    pub fn set_field(&self, field: FieldTag, payload: FieldPayload, now: Timestamp) {
        self.lock().insert(field, StampedPayload { payload, timestamp: now });
    }

    /// Run `f` with exclusive access to the whole map for the duration of
    /// one transaction.
    ///
    /// Used internally by the frame processor so that ensuring an entry
    /// exists for every field in a schema and then updating each entry's
    /// value happens under a single critical section, matching the
    /// original's lock-once-per-message discipline rather than one lock
    /// acquisition per field.
    pub(crate) fn with_locked<R>(
        &self,
        f: impl FnOnce(&mut HashMap<FieldTag, StampedPayload>) -> R,
    ) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_field_reads_as_default() {
        let map = ValueMap::new();
        let value = map.get_field(FieldTag::User(0));
        assert_eq!(value.payload.len(), 0);
        assert!(!map.has_data_for_field(FieldTag::User(0)));
    }

    #[test]
    fn set_then_get_round_trips() {
        let map = ValueMap::new();
        let payload = FieldPayload::new(b"hi").unwrap();
        map.set_field(FieldTag::User(3), payload, Timestamp::from_secs(5));
        let stored = map.get_field(FieldTag::User(3));
        assert_eq!(stored.payload.as_slice(), b"hi");
        assert_eq!(stored.timestamp, Timestamp::from_secs(5));
        assert!(map.has_data_for_field(FieldTag::User(3)));
    }

    #[test]
    fn seeded_with_installs_initial_entry() {
        let sync = FieldPayload::new(b"A").unwrap();
        let map = ValueMap::seeded_with(FieldTag::SYNC, sync, Timestamp::ZERO);
        assert_eq!(map.get_field(FieldTag::SYNC).payload.as_slice(), b"A");
    }

    #[test]
    fn with_locked_exposes_mutable_access() {
        let map = ValueMap::new();
        map.with_locked(|values| {
            values.entry(FieldTag::User(1)).or_default();
        });
        assert!(map.has_data_for_field(FieldTag::User(1)));
    }
}
