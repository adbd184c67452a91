//! Error types for gateway operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while bridging CAN-FD frames to UDP.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// I/O error on the bus socket or the network socket.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The CAN interface could not be opened.
    #[error("Cannot open CAN interface {name}: {source}")]
    Interface {
        /// Interface name, e.g. "can0".
        name: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// The destination address could not be parsed as `IP:port`.
    #[error("Invalid destination address: {0} (expected IP:port)")]
    InvalidDestination(String),

    /// The bus delivered a classic (non-FD) frame on the FD socket.
    ///
    /// The frame is discarded; the forward loop treats this as a
    /// transient condition and retries the read.
    #[error("Received a classic CAN frame on the FD socket")]
    NotCanFd,

    /// Frame payload exceeds the CAN-FD maximum.
    #[error("Payload too large: {len} bytes exceeds maximum of {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },

    /// Buffer too short to contain a gateway packet.
    #[error("Packet too short: expected {expected} bytes, got {actual}")]
    PacketTooShort { expected: usize, actual: usize },
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Check if this error is recoverable (transient).
    ///
    /// The forward loop retries the read on recoverable errors and
    /// terminates only on the rest.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io(e) if e.kind() == io::ErrorKind::WouldBlock
                || e.kind() == io::ErrorKind::TimedOut
                || e.kind() == io::ErrorKind::Interrupted
        ) || matches!(self, Self::NotCanFd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::InvalidDestination("nowhere".into());
        assert_eq!(
            format!("{err}"),
            "Invalid destination address: nowhere (expected IP:port)"
        );

        let err = GatewayError::PacketTooShort {
            expected: 78,
            actual: 10,
        };
        assert_eq!(
            format!("{err}"),
            "Packet too short: expected 78 bytes, got 10"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::AddrNotAvailable, "test");
        let err: GatewayError = io_err.into();
        assert!(matches!(err, GatewayError::Io(_)));
    }

    #[test]
    fn test_recoverable_classification() {
        let interrupted: GatewayError = io::Error::from(io::ErrorKind::Interrupted).into();
        assert!(interrupted.is_recoverable());
        assert!(GatewayError::NotCanFd.is_recoverable());

        let broken: GatewayError = io::Error::from(io::ErrorKind::BrokenPipe).into();
        assert!(!broken.is_recoverable());
        assert!(!GatewayError::InvalidDestination("x".into()).is_recoverable());
    }
}
