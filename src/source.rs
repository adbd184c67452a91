//! Bus source: where CAN-FD frames come from.

use crate::error::Result;
use crate::frame::BusFrame;

/// A blocking source of CAN-FD frames.
///
/// `read_frame` blocks until one complete frame is available or an
/// error occurs. Recoverable errors (see
/// [`GatewayError::is_recoverable`](crate::GatewayError::is_recoverable))
/// mean the attempt should be discarded and the read retried; anything
/// else means the source is unusable.
pub trait BusSource {
    /// Block until the next complete frame arrives.
    fn read_frame(&mut self) -> Result<BusFrame>;
}

#[cfg(target_os = "linux")]
pub use self::socketcan_source::SocketCanSource;

#[cfg(target_os = "linux")]
mod socketcan_source {
    use socketcan::{CanAnyFrame, CanFdFrame, CanFdSocket, EmbeddedFrame, Frame, Socket};
    use tracing::info;

    use super::BusSource;
    use crate::error::{GatewayError, Result};
    use crate::frame::BusFrame;

    /// A bus source backed by a SocketCAN FD socket.
    ///
    /// The interface must already be configured and up (`ip link`);
    /// bit rates are not set at this layer.
    #[derive(Debug)]
    pub struct SocketCanSource {
        socket: CanFdSocket,
        interface: String,
    }

    impl SocketCanSource {
        /// Open an FD-enabled raw CAN socket on the named interface.
        pub fn open(interface: &str) -> Result<Self> {
            let socket =
                CanFdSocket::open(interface).map_err(|e| GatewayError::Interface {
                    name: interface.to_string(),
                    source: e,
                })?;

            info!("CAN socket opened on {interface}");

            Ok(Self {
                socket,
                interface: interface.to_string(),
            })
        }

        /// Get the interface name this source reads from.
        pub fn interface(&self) -> &str {
            &self.interface
        }
    }

    impl BusSource for SocketCanSource {
        fn read_frame(&mut self) -> Result<BusFrame> {
            // Classic frames can still arrive on an FD socket; they are
            // not full-size FD frames and are discarded like the short
            // reads they are.
            match self.socket.read_frame()? {
                CanAnyFrame::Fd(frame) => Ok(BusFrame::from(&frame)),
                _ => Err(GatewayError::NotCanFd),
            }
        }
    }

    impl From<&CanFdFrame> for BusFrame {
        fn from(frame: &CanFdFrame) -> Self {
            let payload = frame.data();
            let mut data = [0u8; crate::packet::MAX_DATA_LEN];
            data[..payload.len()].copy_from_slice(payload);

            Self {
                can_id: frame.id_word(),
                len: payload.len() as u8,
                data,
                brs: frame.is_brs(),
                esi: frame.is_esi(),
            }
        }
    }
}
