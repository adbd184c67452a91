//! Gateway packet layout and frame translation.

use bytes::BufMut;

use crate::error::{GatewayError, Result};
use crate::frame::BusFrame;

/// Size of a gateway packet on the wire in bytes.
pub const PACKET_SIZE: usize = 78;

/// Maximum CAN-FD payload length in bytes.
pub const MAX_DATA_LEN: usize = 64;

/// Flags bit 0: Bit Rate Switch was asserted on the source frame.
pub const FLAG_BRS: u8 = 0x01;

/// Flags bit 1: Error State Indicator was asserted on the source frame.
pub const FLAG_ESI: u8 = 0x02;

/// A fixed-size gateway packet (78 bytes).
///
/// One packet is produced per forwarded CAN-FD frame and sent as one
/// UDP datagram. Multi-byte fields are encoded in the producing host's
/// native byte order; consumers decode with the producer's endianness.
///
/// ```text
/// offset  size  field
/// +------+-----+--------------------------------------------------+
/// |    0 |   8 | timestamp_ns  (monotonic clock, nanoseconds)     |
/// +------+-----+--------------------------------------------------+
/// |    8 |   4 | can_id        (verbatim, incl. EFF/RTR bits)     |
/// +------+-----+--------------------------------------------------+
/// |   12 |   1 | dlc           (actual data length, 0-64)         |
/// +------+-----+--------------------------------------------------+
/// |   13 |   1 | flags         (bit 0 BRS, bit 1 ESI, rest zero)  |
/// +------+-----+--------------------------------------------------+
/// |   14 |  64 | data          (payload, zero-padded to 64 bytes) |
/// +------+-----+--------------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayPacket {
    /// Nanoseconds from the gateway's monotonic clock, taken at
    /// forward time. Comparable only within one gateway's uptime.
    pub timestamp_ns: u64,
    /// Composite CAN ID word, copied verbatim from the bus frame.
    pub can_id: u32,
    /// Actual data length in bytes (0-64).
    pub dlc: u8,
    /// BRS/ESI flag bits; all remaining bits are reserved and zero.
    pub flags: u8,
    /// Payload, zero-padded past `dlc` bytes.
    pub data: [u8; MAX_DATA_LEN],
}

impl GatewayPacket {
    /// Create an all-zero packet, typically as the reusable buffer
    /// that `fill` overwrites each loop iteration.
    pub fn zeroed() -> Self {
        Self {
            timestamp_ns: 0,
            can_id: 0,
            dlc: 0,
            flags: 0,
            data: [0u8; MAX_DATA_LEN],
        }
    }

    /// Translate one bus frame plus a monotonic timestamp into a packet.
    ///
    /// Pure and total over any frame with a valid length (0-64):
    /// the ID is copied verbatim, BRS/ESI map to flag bits 0/1, and the
    /// payload is copied into a freshly zeroed 64-byte data field. A
    /// zero-length frame yields a valid all-zero-payload packet.
    pub fn translate(frame: &BusFrame, timestamp_ns: u64) -> Self {
        let mut packet = Self::zeroed();
        packet.fill(frame, timestamp_ns);
        packet
    }

    /// Overwrite every field of this packet from a bus frame.
    ///
    /// Re-zeroes the whole data field before copying the payload, so a
    /// packet reused across loop iterations never leaks bytes from a
    /// previous frame.
    pub fn fill(&mut self, frame: &BusFrame, timestamp_ns: u64) {
        self.timestamp_ns = timestamp_ns;
        self.can_id = frame.can_id;
        self.dlc = frame.len;

        self.flags = 0;
        if frame.brs {
            self.flags |= FLAG_BRS;
        }
        if frame.esi {
            self.flags |= FLAG_ESI;
        }

        self.data = [0u8; MAX_DATA_LEN];
        let len = usize::from(frame.len).min(MAX_DATA_LEN);
        self.data[..len].copy_from_slice(&frame.data[..len]);
    }

    /// Serialize the packet to its fixed 78-byte wire form.
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];

        buf[0..8].copy_from_slice(&self.timestamp_ns.to_ne_bytes());
        buf[8..12].copy_from_slice(&self.can_id.to_ne_bytes());
        buf[12] = self.dlc;
        buf[13] = self.flags;
        buf[14..PACKET_SIZE].copy_from_slice(&self.data);

        buf
    }

    /// Serialize the packet into a wire buffer.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u64_ne(self.timestamp_ns);
        buf.put_u32_ne(self.can_id);
        buf.put_u8(self.dlc);
        buf.put_u8(self.flags);
        buf.put_slice(&self.data);
    }

    /// Parse a packet from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PACKET_SIZE {
            return Err(GatewayError::PacketTooShort {
                expected: PACKET_SIZE,
                actual: data.len(),
            });
        }

        let timestamp_ns = u64::from_ne_bytes([
            data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
        ]);
        let can_id = u32::from_ne_bytes([data[8], data[9], data[10], data[11]]);
        let dlc = data[12];
        let flags = data[13];

        let mut payload = [0u8; MAX_DATA_LEN];
        payload.copy_from_slice(&data[14..PACKET_SIZE]);

        Ok(Self {
            timestamp_ns,
            can_id,
            dlc,
            flags,
            data: payload,
        })
    }

    /// Get the meaningful part of the data field.
    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.dlc).min(MAX_DATA_LEN)]
    }
}

impl Default for GatewayPacket {
    fn default() -> Self {
        Self::zeroed()
    }
}
