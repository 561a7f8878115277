//! Transport-level failures: opening a device or socket can fail in ways the
//! [`frameforge_core::Transceiver`] contract can't express (it only reports
//! `init` success/failure as a bool). These are surfaced through each
//! transceiver's own constructor instead.

use thiserror::Error;

/// Failure to construct or open a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying serial port could not be opened.
    #[error("failed to open serial port {path}: {source}")]
    SerialOpen {
        /// Device path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: serialport::Error,
    },

    /// Binding or connecting a UDP socket failed.
    #[error("failed to set up UDP socket at {address}: {source}")]
    SocketSetup {
        /// Address that was requested.
        address: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
