//! Concrete [`frameforge_core::Transceiver`] drivers: a byte-oriented serial
//! device, a single datagram socket, and a paired-socket datagram loopback
//! for local bidirectional testing without a real counterpart process.

pub mod dual_udp;
pub mod error;
pub mod serial;
pub mod udp;

pub use dual_udp::DualUdpTransceiver;
pub use error::TransportError;
pub use serial::{SerialConfig, SerialTransceiver};
pub use udp::UdpTransceiver;
