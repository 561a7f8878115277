//! Chaotic transceiver wrapper for fault injection testing.
//!
//! Wraps an underlying [`Transceiver`] but randomly drops, corrupts, or
//! prepends garbage to bytes as they're received, to exercise the frame
//! processor's resync and failure-accounting behavior. Uses a seeded RNG so
//! a chaos run is reproducible.

use frameforge_core::Transceiver;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chaotic transceiver wrapping an underlying implementation and randomly
/// injecting receive-path faults.
pub struct ChaoticTransceiver<T: Transceiver> {
    inner: T,
    rng: ChaCha8Rng,
    /// Per-byte probability that an incoming byte is dropped instead of
    /// delivered.
    pub drop_rate: f64,
    /// Per-byte probability that a delivered byte is corrupted (XORed with
    /// a random nonzero value) before being handed to the caller.
    pub corrupt_rate: f64,
}

impl<T: Transceiver> ChaoticTransceiver<T> {
    /// Wrap `inner`, injecting faults with the given rates and seed.
    ///
    /// # Panics
    ///
    /// Panics if either rate is outside `[0.0, 1.0]`.
    #[must_use]
    pub fn new(inner: T, drop_rate: f64, corrupt_rate: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&drop_rate), "drop_rate must be in [0.0, 1.0]");
        assert!((0.0..=1.0).contains(&corrupt_rate), "corrupt_rate must be in [0.0, 1.0]");
        Self { inner, rng: ChaCha8Rng::seed_from_u64(seed), drop_rate, corrupt_rate }
    }

    /// The wrapped transceiver, for inspecting state the `Transceiver`
    /// trait doesn't expose.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transceiver> Transceiver for ChaoticTransceiver<T> {
    fn init(&mut self) -> bool {
        self.inner.init()
    }

    fn send(&mut self, bytes: &[u8]) {
        self.inner.send(bytes);
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        let n = self.inner.recv(buf);
        let mut kept = 0;
        for i in 0..n {
            if self.rng.gen_bool(self.drop_rate) {
                continue;
            }
            let mut byte = buf[i];
            if self.rng.gen_bool(self.corrupt_rate) {
                let flip = (self.rng.next_u32() % 255 + 1) as u8;
                byte ^= flip;
            }
            buf[kept] = byte;
            kept += 1;
        }
        kept
    }

    fn deinit(&mut self) {
        self.inner.deinit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackTransceiver;

    #[test]
    fn zero_rates_pass_bytes_through_unchanged() {
        let (mut a, b) = LoopbackTransceiver::pair();
        a.send(b"hello");
        let mut chaotic = ChaoticTransceiver::new(b, 0.0, 0.0, 7);
        let mut buf = [0u8; 8];
        let n = chaotic.recv(&mut buf);
        assert_eq!(&buf[..n], b"hello");
    }

    #[test]
    fn full_drop_rate_delivers_nothing() {
        let (mut a, b) = LoopbackTransceiver::pair();
        a.send(b"hello");
        let mut chaotic = ChaoticTransceiver::new(b, 1.0, 0.0, 7);
        let mut buf = [0u8; 8];
        assert_eq!(chaotic.recv(&mut buf), 0);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let (mut a1, b1) = LoopbackTransceiver::pair();
        a1.send(b"abcdefgh");
        let mut c1 = ChaoticTransceiver::new(b1, 0.3, 0.3, 42);
        let mut buf1 = [0u8; 8];
        let n1 = c1.recv(&mut buf1);

        let (mut a2, b2) = LoopbackTransceiver::pair();
        a2.send(b"abcdefgh");
        let mut c2 = ChaoticTransceiver::new(b2, 0.3, 0.3, 42);
        let mut buf2 = [0u8; 8];
        let n2 = c2.recv(&mut buf2);

        assert_eq!(n1, n2);
        assert_eq!(&buf1[..n1], &buf2[..n2]);
    }
}
