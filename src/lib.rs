//! CAN-FD to UDP gateway built on socketcan and std::net.
//!
//! This crate bridges a CAN-FD bus to an IP network: every frame read
//! from the bus is translated into a fixed-size binary packet and
//! forwarded as one UDP datagram to a configured destination. It is
//! meant for embedded gateway hosts where bus traffic must be observed
//! or logged from a network location.
//!
//! # Features
//!
//! - Fixed 78-byte wire format with explicit field offsets
//! - Monotonic forward-time timestamping
//! - Single-threaded, strictly ordered, lossy forward loop
//! - Tolerant error policy: transient bus errors are retried, send
//!   failures are reported and the packet dropped
//! - Best-effort real-time tuning (thread priority, memory locking)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//!
//! use cangw_rs::{Gateway, GatewayConfig, SocketCanSource, UdpSink};
//!
//! let config = GatewayConfig::new("can0", "192.168.1.100:5000").unwrap();
//!
//! let source = SocketCanSource::open(&config.interface).unwrap();
//! let sink = UdpSink::connect(config.destination).unwrap();
//!
//! let running = Arc::new(AtomicBool::new(true));
//! Gateway::new(source, sink).run(&running).unwrap();
//! ```
//!
//! # Wire format
//!
//! Each forwarded frame becomes one 78-byte datagram, fields in the
//! producing host's native byte order:
//!
//! ```text
//! +--------------+--------+-----+-------+------------------+
//! | timestamp_ns | can_id | dlc | flags |       data       |
//! |   8 bytes    | 4 bytes| 1 B |  1 B  |     64 bytes     |
//! +--------------+--------+-----+-------+------------------+
//! ```
//!
//! `data` carries the frame payload zero-padded to 64 bytes; `flags`
//! bit 0 is BRS and bit 1 is ESI. There is no delimiter between
//! packets — one packet is exactly one datagram.

pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod gateway;
pub mod packet;
pub mod sink;
pub mod source;
pub mod tuning;

// Re-export commonly used types at the crate root
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use frame::BusFrame;
pub use gateway::Gateway;
pub use packet::{FLAG_BRS, FLAG_ESI, GatewayPacket, MAX_DATA_LEN, PACKET_SIZE};
pub use sink::{PacketSink, UdpSink};
pub use source::BusSource;
#[cfg(target_os = "linux")]
pub use source::SocketCanSource;
pub use tuning::{TuningWarning, apply_realtime_tuning};
