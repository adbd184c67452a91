//! The forward loop: read, translate, send.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, trace, warn};

use crate::clock;
use crate::error::Result;
use crate::packet::GatewayPacket;
use crate::sink::PacketSink;
use crate::source::BusSource;

/// The gateway forward loop.
///
/// Drives the read-translate-send cycle strictly sequentially: one
/// frame is fully forwarded before the next read begins, so packets
/// leave in receipt order. The loop is lossy by design — a frame whose
/// transmission fails is reported and dropped, never retried.
#[derive(Debug)]
pub struct Gateway<S, K> {
    source: S,
    sink: K,
    // Reused across iterations; fill() overwrites it completely.
    packet: GatewayPacket,
}

impl<S: BusSource, K: PacketSink> Gateway<S, K> {
    /// Create a gateway over a bus source and a network sink.
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            packet: GatewayPacket::zeroed(),
        }
    }

    /// Run the forward loop until `running` is cleared.
    ///
    /// Error policy:
    /// - recoverable read errors (short read, interrupted read, classic
    ///   frame on the FD socket) discard the attempt and retry;
    /// - send errors are reported and the affected packet is lost;
    /// - only non-recoverable source errors terminate the loop.
    ///
    /// A signal handler clearing `running` interrupts the blocking read
    /// with a recoverable error, so the flag is observed promptly.
    pub fn run(&mut self, running: &AtomicBool) -> Result<()> {
        info!("Starting gateway loop");

        while running.load(Ordering::Relaxed) {
            let frame = match self.source.read_frame() {
                Ok(frame) => frame,
                Err(e) if e.is_recoverable() => {
                    trace!("Discarding bus read attempt: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Timestamp at forward time, not bus-receipt time.
            self.packet.fill(&frame, clock::now_ns());

            if let Err(e) = self.sink.send_packet(&self.packet) {
                warn!("Failed to forward packet (id {:08X}): {e}", frame.can_id);
            }
        }

        info!("Gateway loop stopped");
        Ok(())
    }

    /// Get a reference to the bus source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the network sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }
}
