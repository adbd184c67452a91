//! Network sink: where gateway packets go.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use bytes::BytesMut;
use tracing::{info, warn};

use crate::error::Result;
use crate::packet::{GatewayPacket, PACKET_SIZE};

/// Default send buffer requested from the OS (helps under burst traffic).
pub const DEFAULT_SEND_BUFFER_BYTES: usize = 1 << 20;

/// A sink that accepts fixed-size gateway packets.
///
/// Delivery is not guaranteed; a sink may silently drop packets
/// (UDP semantics). A reported error means the packet is lost.
pub trait PacketSink {
    /// Transmit one packet toward the configured destination.
    fn send_packet(&mut self, packet: &GatewayPacket) -> Result<()>;
}

/// A UDP packet sink.
///
/// Sends each gateway packet as one 78-byte datagram to a fixed
/// destination. No acknowledgement, ordering, or retry is provided.
#[derive(Debug)]
pub struct UdpSink {
    socket: UdpSocket,
    destination: SocketAddr,
    send_buffer: BytesMut,
}

impl UdpSink {
    /// Bind an ephemeral local socket and connect it to the destination.
    ///
    /// Requests the default 1 MiB OS send buffer.
    pub fn connect(destination: SocketAddr) -> Result<Self> {
        Self::with_send_buffer(destination, DEFAULT_SEND_BUFFER_BYTES)
    }

    /// Like [`UdpSink::connect`] with an explicit OS send buffer size.
    ///
    /// The buffer size is a best-effort request; failure to apply it is
    /// logged and does not fail construction.
    pub fn with_send_buffer(destination: SocketAddr, send_buffer_bytes: usize) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;

        if let Err(e) = set_os_send_buffer(&socket, send_buffer_bytes) {
            warn!("Failed to set UDP send buffer to {send_buffer_bytes} bytes: {e}");
        }

        socket.connect(destination)?;
        info!("UDP socket opened to {destination}");

        Ok(Self {
            socket,
            destination,
            send_buffer: BytesMut::with_capacity(PACKET_SIZE),
        })
    }

    /// Get the destination address.
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    /// Get the local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl PacketSink for UdpSink {
    fn send_packet(&mut self, packet: &GatewayPacket) -> Result<()> {
        self.send_buffer.clear();
        packet.write_to(&mut self.send_buffer);

        self.socket.send(&self.send_buffer)?;
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn set_os_send_buffer(socket: &UdpSocket, bytes: usize) -> io::Result<()> {
    use nix::sys::socket::{setsockopt, sockopt};

    setsockopt(socket, sockopt::SndBuf, &bytes)?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn set_os_send_buffer(_socket: &UdpSocket, _bytes: usize) -> io::Result<()> {
    Ok(())
}
