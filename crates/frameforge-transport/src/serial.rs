//! Byte-oriented serial device transceiver, backed by `serialport`.

use std::time::Duration;

use frameforge_core::Transceiver;
use serialport::{DataBits, Parity, StopBits};

use crate::error::TransportError;

/// Line parameters for a serial device, beyond the baud rate.
///
/// Defaults match the overwhelmingly common wire format (8 data bits, no
/// parity, one stop bit), so callers who don't care can use
/// [`SerialConfig::default`].
#[derive(Debug, Clone, Copy)]
pub struct SerialConfig {
    /// Bits per character.
    pub data_bits: DataBits,
    /// Stop bits per character.
    pub stop_bits: StopBits,
    /// Parity checking mode.
    pub parity: Parity,
    /// How long a single `read` may block waiting for at least one byte.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            read_timeout: Duration::from_millis(50),
        }
    }
}

/// A transceiver over a physical or virtual serial device.
///
/// Holds the port closed (`None`) until [`Transceiver::init`] is called, at
/// which point the configured device path is opened; `init` returning
/// `false` (rather than propagating [`TransportError`] through the
/// `Transceiver` contract) mirrors the original driver's `bool init()`
/// signature, which swallows the open failure into a single bit the frame
/// processor treats as fatal.
pub struct SerialTransceiver {
    path: String,
    baud_rate: u32,
    config: SerialConfig,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialTransceiver {
    /// Configure a serial transceiver for `path` at `baud_rate` with default
    /// line parameters (8-N-1). The device is not opened until `init` is
    /// called.
    #[must_use]
    pub fn new(path: impl Into<String>, baud_rate: u32, read_timeout: Duration) -> Self {
        Self::with_config(path, baud_rate, SerialConfig { read_timeout, ..SerialConfig::default() })
    }

    /// Configure a serial transceiver with explicit data bits, stop bits,
    /// and parity, matching the original driver's full `LinuxSerialTransceiver`
    /// parameter set.
    #[must_use]
    pub fn with_config(path: impl Into<String>, baud_rate: u32, config: SerialConfig) -> Self {
        Self { path: path.into(), baud_rate, config, port: None }
    }

    fn open_port(&self) -> serialport::Result<Box<dyn serialport::SerialPort>> {
        serialport::new(&self.path, self.baud_rate)
            .data_bits(self.config.data_bits)
            .stop_bits(self.config.stop_bits)
            .parity(self.config.parity)
            .timeout(self.config.read_timeout)
            .open()
    }
}

impl Transceiver for SerialTransceiver {
    fn init(&mut self) -> bool {
        match self.open_port() {
            Ok(port) => {
                self.port = Some(port);
                true
            },
            Err(err) => {
                tracing::warn!(path = %self.path, %err, "failed to open serial port");
                false
            },
        }
    }

    fn send(&mut self, bytes: &[u8]) {
        let Some(port) = &mut self.port else { return };
        if let Err(err) = port.write_all(bytes) {
            tracing::warn!(path = %self.path, %err, "serial write failed");
        }
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        let Some(port) = &mut self.port else { return 0 };
        match port.read(buf) {
            Ok(n) => n,
            Err(err) if err.kind() == std::io::ErrorKind::TimedOut => 0,
            Err(err) => {
                tracing::warn!(path = %self.path, %err, "serial read failed");
                0
            },
        }
    }

    fn deinit(&mut self) {
        self.port = None;
    }
}

/// Open a serial transceiver immediately, surfacing the open failure instead
/// of collapsing it to a bool. Prefer this over [`SerialTransceiver::new`]
/// plus a manual `init` call when the caller wants the underlying
/// [`serialport::Error`] for diagnostics.
pub fn open(path: impl Into<String>, baud_rate: u32, read_timeout: Duration) -> Result<SerialTransceiver, TransportError> {
    let path = path.into();
    let mut transceiver =
        SerialTransceiver::with_config(path.clone(), baud_rate, SerialConfig { read_timeout, ..SerialConfig::default() });
    match transceiver.open_port() {
        Ok(port) => {
            transceiver.port = Some(port);
            Ok(transceiver)
        },
        Err(source) => Err(TransportError::SerialOpen { path, source }),
    }
}
