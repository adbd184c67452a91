//! CAN-FD to UDP gateway binary.
//!
//! Reads CAN-FD frames from a SocketCAN interface and forwards each
//! one as a fixed-size UDP datagram:
//!
//! ```text
//! cangw can0 192.168.1.100:5000
//! ```
//!
//! Diagnostics go to stderr via `tracing`; set `RUST_LOG` to adjust
//! verbosity (e.g. `RUST_LOG=cangw_rs=trace`).

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cangw_rs::sink::DEFAULT_SEND_BUFFER_BYTES;
use cangw_rs::{GatewayConfig, Result};

/// Forward CAN-FD frames from a bus interface to a UDP destination.
#[derive(Debug, Parser)]
#[command(name = "cangw", version, about)]
struct Args {
    /// CAN interface to read from (e.g. can0)
    interface: String,

    /// Destination address as IP:port (e.g. 192.168.1.100:5000)
    destination: String,

    /// OS send buffer to request on the UDP socket, in bytes
    #[arg(long, default_value_t = DEFAULT_SEND_BUFFER_BYTES)]
    send_buffer_bytes: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match GatewayConfig::new(&args.interface, &args.destination) {
        Ok(config) => config.send_buffer_bytes(args.send_buffer_bytes),
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "linux")]
fn run(config: GatewayConfig) -> Result<()> {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use tracing::warn;

    use cangw_rs::{Gateway, SocketCanSource, UdpSink, apply_realtime_tuning};

    for warning in apply_realtime_tuning() {
        warn!("{warning}");
    }

    let source = SocketCanSource::open(&config.interface)?;
    let sink = UdpSink::with_send_buffer(config.destination, config.send_buffer_bytes)?;

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    // SIGINT interrupts the blocking bus read, so the cleared flag is
    // seen on the next loop pass.
    if let Err(e) = ctrlc::set_handler(move || flag.store(false, Ordering::Relaxed)) {
        warn!("Failed to install signal handler: {e}");
    }

    Gateway::new(source, sink).run(&running)
}

#[cfg(not(target_os = "linux"))]
fn run(_config: GatewayConfig) -> Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "SocketCAN is only available on Linux",
    )
    .into())
}
