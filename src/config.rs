//! Gateway process configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{GatewayError, Result};
use crate::sink::DEFAULT_SEND_BUFFER_BYTES;

/// Configuration for one gateway process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// CAN interface to read from, e.g. "can0".
    pub interface: String,
    /// Destination for forwarded packets.
    pub destination: SocketAddr,
    /// OS send buffer to request on the UDP socket.
    pub send_buffer_bytes: usize,
}

impl GatewayConfig {
    /// Build a configuration from the two required process inputs.
    ///
    /// Fails fast with [`GatewayError::InvalidDestination`] if the
    /// destination does not parse as `IP:port`.
    pub fn new(interface: impl Into<String>, destination: &str) -> Result<Self> {
        let destination = SocketAddr::from_str(destination)
            .map_err(|_| GatewayError::InvalidDestination(destination.to_string()))?;

        Ok(Self {
            interface: interface.into(),
            destination,
            send_buffer_bytes: DEFAULT_SEND_BUFFER_BYTES,
        })
    }

    /// Set the OS send buffer size to request.
    pub fn send_buffer_bytes(mut self, bytes: usize) -> Self {
        self.send_buffer_bytes = bytes;
        self
    }
}
