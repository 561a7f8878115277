//! Frameforge CLI entry point: loads a processor configuration, opens the
//! configured transport, and runs the frame processor's `update` loop.

mod config;

use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::thread::sleep;
use std::time::{Duration, Instant};

use clap::Parser;
use config::{FrameforgeConfig, TransportConfig};
use frameforge_core::{ChecksumCallbacks, FrameError, FrameProcessor, Transceiver};
use frameforge_transport::{DualUdpTransceiver, SerialTransceiver, UdpTransceiver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run the frame processor against a configured transport.
#[derive(Parser, Debug)]
#[command(name = "frameforge")]
#[command(about = "Schema-driven byte framing engine for serial and datagram transports")]
#[command(version)]
struct Args {
    /// Path to a TOML document with `[processor]` and `[transport]` tables.
    #[arg(short, long)]
    config: PathBuf,

    /// How often to poll the transport for new bytes.
    #[arg(long, default_value = "10")]
    poll_interval_ms: u64,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read config file {path}: {source}")]
    ReadConfig { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    #[error("processor rejected its configuration: {0}")]
    Processor(#[from] FrameError),
}

fn build_transceiver(transport: &TransportConfig) -> Result<Box<dyn Transceiver>, CliError> {
    match transport {
        TransportConfig::Serial { path, baud_rate } => {
            Ok(Box::new(SerialTransceiver::new(path.clone(), *baud_rate, Duration::from_millis(50))))
        },
        TransportConfig::Udp { local, peer } => {
            let local: SocketAddr =
                local.parse().map_err(|_| CliError::InvalidAddress(local.clone()))?;
            let peer: SocketAddr = peer.parse().map_err(|_| CliError::InvalidAddress(peer.clone()))?;
            Ok(Box::new(UdpTransceiver::connected(local, peer)))
        },
        TransportConfig::DualUdp { address, recv_port, send_port } => {
            let address: IpAddr =
                IpAddr::from_str(address).map_err(|_| CliError::InvalidAddress(address.clone()))?;
            Ok(Box::new(DualUdpTransceiver::new(address, *recv_port, *send_port)))
        },
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&args.config)
        .map_err(|source| CliError::ReadConfig { path: args.config.clone(), source })?;
    let doc = FrameforgeConfig::from_toml_str(&text)?;

    let transceiver = build_transceiver(&doc.transport)?;
    let schemas: BTreeMap<u8, _> = doc.processor.schema_map();
    let mut processor = FrameProcessor::new(
        transceiver,
        schemas,
        doc.processor.default_frame_id,
        doc.processor.sync_value.into_bytes(),
        None,
        ChecksumCallbacks::none(),
    )?;

    processor.set_new_msg_callback(Box::new(|touched| {
        for (tag, stamped) in touched {
            tracing::info!(?tag, bytes = ?stamped.payload.as_slice(), "field updated");
        }
    }));

    let start = Instant::now();
    let poll_interval = Duration::from_millis(args.poll_interval_ms);
    loop {
        processor.update(start.elapsed());
        sleep(poll_interval);
    }
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "frameforge=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "frameforge exited");
            std::process::ExitCode::FAILURE
        },
    }
}
