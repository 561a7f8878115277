//! Single-socket datagram endpoint transceiver.

use std::net::{SocketAddr, UdpSocket};

use frameforge_core::Transceiver;

use crate::error::TransportError;

/// A transceiver over one UDP socket, optionally bound for receiving and
/// optionally connected to a fixed peer for sending.
///
/// `skip_bind`/`skip_connect` mirror the original driver's flags: a
/// send-only endpoint skips the bind, a receive-only endpoint skips the
/// connect. Set via [`UdpTransceiver::send_only`] / [`UdpTransceiver::recv_only`]
/// rather than raw booleans.
pub struct UdpTransceiver {
    local: Option<SocketAddr>,
    peer: Option<SocketAddr>,
    socket: Option<UdpSocket>,
}

impl UdpTransceiver {
    /// Bind `local` and connect to `peer`: a bidirectional endpoint talking
    /// to exactly one counterpart.
    #[must_use]
    pub fn connected(local: SocketAddr, peer: SocketAddr) -> Self {
        Self { local: Some(local), peer: Some(peer), socket: None }
    }

    /// Bind `local` only; `recv` works, `send` is a no-op. Used as the
    /// receive half of [`crate::dual_udp::DualUdpTransceiver`].
    #[must_use]
    pub fn recv_only(local: SocketAddr) -> Self {
        Self { local: Some(local), peer: None, socket: None }
    }

    /// Connect to `peer` without binding a fixed local address; `send`
    /// works, `recv` always returns zero. Used as the send half of
    /// [`crate::dual_udp::DualUdpTransceiver`].
    #[must_use]
    pub fn send_only(peer: SocketAddr) -> Self {
        Self { local: None, peer: Some(peer), socket: None }
    }
}

impl Transceiver for UdpTransceiver {
    fn init(&mut self) -> bool {
        let bind_addr = self.local.unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 0)));
        let socket = match UdpSocket::bind(bind_addr) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%bind_addr, %err, "failed to bind UDP socket");
                return false;
            },
        };
        if let Some(peer) = self.peer
            && let Err(err) = socket.connect(peer)
        {
            tracing::warn!(%peer, %err, "failed to connect UDP socket");
            return false;
        }
        if let Err(err) = socket.set_nonblocking(true) {
            tracing::warn!(%err, "failed to set UDP socket non-blocking");
            return false;
        }
        self.socket = Some(socket);
        true
    }

    fn send(&mut self, bytes: &[u8]) {
        let Some(socket) = &self.socket else { return };
        if self.peer.is_none() {
            return;
        }
        if let Err(err) = socket.send(bytes) {
            tracing::warn!(%err, "UDP send failed");
        }
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        let Some(socket) = &self.socket else { return 0 };
        match socket.recv(buf) {
            Ok(n) => n,
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => 0,
            Err(err) => {
                tracing::warn!(%err, "UDP recv failed");
                0
            },
        }
    }

    fn deinit(&mut self) {
        self.socket = None;
    }
}

/// Open a UDP transceiver immediately, surfacing bind/connect failures
/// instead of collapsing them to a bool.
pub fn open_connected(local: SocketAddr, peer: SocketAddr) -> Result<UdpTransceiver, TransportError> {
    let mut transceiver = UdpTransceiver::connected(local, peer);
    if transceiver.init() {
        Ok(transceiver)
    } else {
        Err(TransportError::SocketSetup {
            address: local.to_string(),
            source: std::io::Error::other("see logged warning for UDP bind/connect failure"),
        })
    }
}
