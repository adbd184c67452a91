//! CAN-FD bus frame model.

use crate::error::{GatewayError, Result};
use crate::packet::MAX_DATA_LEN;

/// Extended frame format marker bit in the composite CAN ID word.
pub const EFF_FLAG: u32 = 0x8000_0000;

/// Remote transmission request marker bit in the composite CAN ID word.
pub const RTR_FLAG: u32 = 0x4000_0000;

/// Error frame marker bit in the composite CAN ID word.
pub const ERR_FLAG: u32 = 0x2000_0000;

/// One CAN-FD frame as read from the bus.
///
/// `can_id` is the composite SocketCAN ID word: the 11- or 29-bit
/// identifier with the EFF/RTR/ERR marker bits embedded in the upper
/// bits. The gateway forwards it verbatim, without masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFrame {
    /// Composite CAN ID word, marker bits included.
    pub can_id: u32,
    /// Actual data length in bytes (0-64).
    pub len: u8,
    /// Payload storage; only the first `len` bytes are meaningful.
    pub data: [u8; MAX_DATA_LEN],
    /// Bit Rate Switch: data phase used the higher bit rate.
    pub brs: bool,
    /// Error State Indicator of the transmitting node.
    pub esi: bool,
}

impl BusFrame {
    /// Create a frame with neither BRS nor ESI asserted.
    ///
    /// Fails if the payload exceeds the CAN-FD maximum of 64 bytes.
    pub fn new(can_id: u32, payload: &[u8]) -> Result<Self> {
        Self::with_flags(can_id, payload, false, false)
    }

    /// Create a frame with explicit BRS/ESI flags.
    pub fn with_flags(can_id: u32, payload: &[u8], brs: bool, esi: bool) -> Result<Self> {
        if payload.len() > MAX_DATA_LEN {
            return Err(GatewayError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_DATA_LEN,
            });
        }

        let mut data = [0u8; MAX_DATA_LEN];
        data[..payload.len()].copy_from_slice(payload);

        Ok(Self {
            can_id,
            len: payload.len() as u8,
            data,
            brs,
            esi,
        })
    }

    /// Get the meaningful part of the payload.
    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.len).min(MAX_DATA_LEN)]
    }

    /// Check if the ID word carries the extended frame format bit.
    pub fn is_extended(&self) -> bool {
        self.can_id & EFF_FLAG != 0
    }

    /// Check if the ID word carries the remote request bit.
    pub fn is_remote(&self) -> bool {
        self.can_id & RTR_FLAG != 0
    }
}

impl std::fmt::Display for BusFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08X} [{}]", self.can_id, self.len)?;
        for b in self.payload() {
            write!(f, " {b:02X}")?;
        }
        Ok(())
    }
}
