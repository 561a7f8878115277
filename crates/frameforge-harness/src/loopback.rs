//! In-memory paired transceiver: two ends of one channel, each implementing
//! [`Transceiver`], with no sockets or threads involved.

use std::collections::VecDeque;
use std::rc::Rc;
use std::cell::RefCell;

use frameforge_core::Transceiver;

#[derive(Debug, Default)]
struct Channel {
    bytes: VecDeque<u8>,
}

/// One end of an in-memory loopback pair. Bytes sent on one end are
/// immediately available to `recv` on the other.
#[derive(Clone)]
pub struct LoopbackTransceiver {
    outbound: Rc<RefCell<Channel>>,
    inbound: Rc<RefCell<Channel>>,
}

impl LoopbackTransceiver {
    /// Build a connected pair: `a`'s outbound is `b`'s inbound and vice
    /// versa.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let left = Rc::new(RefCell::new(Channel::default()));
        let right = Rc::new(RefCell::new(Channel::default()));
        let a = Self { outbound: Rc::clone(&left), inbound: Rc::clone(&right) };
        let b = Self { outbound: right, inbound: left };
        (a, b)
    }
}

impl Transceiver for LoopbackTransceiver {
    fn init(&mut self) -> bool {
        true
    }

    fn send(&mut self, bytes: &[u8]) {
        self.outbound.borrow_mut().bytes.extend(bytes.iter().copied());
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        let mut channel = self.inbound.borrow_mut();
        let n = channel.bytes.len().min(buf.len());
        for slot in buf.iter_mut().take(n) {
            *slot = channel.bytes.pop_front().unwrap_or(0);
        }
        n
    }

    fn deinit(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_delivers_bytes_in_order() {
        let (mut a, mut b) = LoopbackTransceiver::pair();
        a.send(b"abc");
        let mut buf = [0u8; 8];
        let n = b.recv(&mut buf);
        assert_eq!(&buf[..n], b"abc");
    }

    #[test]
    fn pair_is_bidirectional() {
        let (mut a, mut b) = LoopbackTransceiver::pair();
        b.send(b"xyz");
        let mut buf = [0u8; 8];
        let n = a.recv(&mut buf);
        assert_eq!(&buf[..n], b"xyz");
    }

    #[test]
    fn recv_on_empty_channel_returns_zero() {
        let (_a, mut b) = LoopbackTransceiver::pair();
        let mut buf = [0u8; 8];
        assert_eq!(b.recv(&mut buf), 0);
    }
}
