//! End-to-end forward loop tests over loopback UDP.

use std::net::UdpSocket;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cangw_rs::{
    BusFrame, BusSource, Gateway, GatewayError, GatewayPacket, PACKET_SIZE, Result, UdpSink,
};

/// Replays a scripted sequence of read outcomes, then clears the
/// running flag so the loop terminates.
struct ScriptedSource {
    script: Vec<Result<BusFrame>>,
    running: Arc<AtomicBool>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<BusFrame>>, running: Arc<AtomicBool>) -> Self {
        let mut script = script;
        script.reverse();
        Self { script, running }
    }
}

impl BusSource for ScriptedSource {
    fn read_frame(&mut self) -> Result<BusFrame> {
        match self.script.pop() {
            Some(outcome) => outcome,
            None => {
                self.running.store(false, Ordering::Relaxed);
                Err(GatewayError::NotCanFd)
            }
        }
    }
}

fn recoverable() -> GatewayError {
    std::io::Error::from(std::io::ErrorKind::Interrupted).into()
}

#[test]
fn forwards_frames_as_fixed_size_datagrams() {
    let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
    receiver
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let dest = receiver.local_addr().unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let source = ScriptedSource::new(
        vec![
            Ok(BusFrame::with_flags(0x123, &[0xAA, 0xBB, 0xCC], true, false).unwrap()),
            Ok(BusFrame::new(0x1FFF_FFFF | cangw_rs::frame::EFF_FLAG, &[]).unwrap()),
        ],
        running.clone(),
    );
    let sink = UdpSink::connect(dest).unwrap();

    Gateway::new(source, sink).run(&running).unwrap();

    let mut buf = [0u8; 256];

    let (len, _) = receiver.recv_from(&mut buf).unwrap();
    assert_eq!(len, PACKET_SIZE);
    let first = GatewayPacket::from_bytes(&buf[..len]).unwrap();
    assert_eq!(first.can_id, 0x123);
    assert_eq!(first.dlc, 3);
    assert_eq!(first.flags, 0x01);
    assert_eq!(first.payload(), &[0xAA, 0xBB, 0xCC]);
    assert!(first.data[3..].iter().all(|&b| b == 0));

    let (len, _) = receiver.recv_from(&mut buf).unwrap();
    assert_eq!(len, PACKET_SIZE);
    let second = GatewayPacket::from_bytes(&buf[..len]).unwrap();
    assert_eq!(second.can_id, 0x1FFF_FFFF | cangw_rs::frame::EFF_FLAG);
    assert_eq!(second.dlc, 0);
    assert_eq!(second.flags, 0x00);
    assert!(second.data.iter().all(|&b| b == 0));

    // Receipt order and forward-time stamping are preserved.
    assert!(first.timestamp_ns <= second.timestamp_ns);
}

#[test]
fn survives_transient_read_errors_then_forwards_once() {
    let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
    receiver
        .set_read_timeout(Some(Duration::from_millis(500)))
        .unwrap();
    let dest = receiver.local_addr().unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let source = ScriptedSource::new(
        vec![
            Err(recoverable()),
            Err(recoverable()),
            Err(recoverable()),
            Ok(BusFrame::new(0x42, &[0x01]).unwrap()),
        ],
        running.clone(),
    );
    let sink = UdpSink::connect(dest).unwrap();

    Gateway::new(source, sink).run(&running).unwrap();

    let mut buf = [0u8; 256];
    let (len, _) = receiver.recv_from(&mut buf).unwrap();
    let packet = GatewayPacket::from_bytes(&buf[..len]).unwrap();
    assert_eq!(packet.can_id, 0x42);
    assert_eq!(packet.payload(), &[0x01]);

    // No datagram was produced for the three failed reads.
    let result = receiver.recv_from(&mut buf);
    assert!(result.is_err());
}

#[test]
fn no_stale_bytes_across_reused_packet_buffer() {
    let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
    receiver
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let dest = receiver.local_addr().unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let source = ScriptedSource::new(
        vec![
            Ok(BusFrame::new(0x10, &[0xFF; 64]).unwrap()),
            Ok(BusFrame::new(0x11, &[0x22; 4]).unwrap()),
        ],
        running.clone(),
    );
    let sink = UdpSink::connect(dest).unwrap();

    Gateway::new(source, sink).run(&running).unwrap();

    let mut buf = [0u8; 256];
    receiver.recv_from(&mut buf).unwrap();

    let (len, _) = receiver.recv_from(&mut buf).unwrap();
    let packet = GatewayPacket::from_bytes(&buf[..len]).unwrap();
    assert_eq!(packet.dlc, 4);
    assert_eq!(packet.payload(), &[0x22; 4]);
    assert!(packet.data[4..].iter().all(|&b| b == 0));
}
