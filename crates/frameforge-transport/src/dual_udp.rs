//! Paired-socket datagram loopback: one socket bound for receiving, one
//! socket connected for sending, so a process can talk to itself (or to a
//! peer using the mirrored port pair) over two independent UDP sockets
//! instead of one bidirectional one.

use std::net::{IpAddr, SocketAddr};

use frameforge_core::Transceiver;

use crate::udp::UdpTransceiver;

/// Composes a receive-only [`UdpTransceiver`] bound to `recv_port` with a
/// send-only one connected to `address:send_port`.
pub struct DualUdpTransceiver {
    recv: UdpTransceiver,
    send: UdpTransceiver,
}

impl DualUdpTransceiver {
    /// `address` is the peer to send to; `recv_port` is the local port this
    /// side listens on, `send_port` is the peer's port.
    #[must_use]
    pub fn new(address: IpAddr, recv_port: u16, send_port: u16) -> Self {
        let recv = UdpTransceiver::recv_only(SocketAddr::new(address, recv_port));
        let send = UdpTransceiver::send_only(SocketAddr::new(address, send_port));
        Self { recv, send }
    }
}

impl Transceiver for DualUdpTransceiver {
    fn init(&mut self) -> bool {
        // Both halves must come up or the whole transceiver is unusable.
        self.recv.init() && self.send.init()
    }

    fn send(&mut self, bytes: &[u8]) {
        self.send.send(bytes);
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        self.recv.recv(buf)
    }

    fn deinit(&mut self) {
        self.recv.deinit();
        self.send.deinit();
    }
}
