//! Exercises `UdpTransceiver` and `DualUdpTransceiver` over real loopback
//! sockets. Serial hardware isn't available in CI, so UDP is the only
//! transport here that can be driven end to end without a fixture.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::thread::sleep;
use std::time::Duration;

use frameforge_core::Transceiver;
use frameforge_transport::{DualUdpTransceiver, UdpTransceiver};

fn free_port() -> u16 {
    let socket = std::net::UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    socket.local_addr().unwrap().port()
}

#[test]
fn connected_udp_transceivers_exchange_bytes() {
    let a_port = free_port();
    let b_port = free_port();
    let a_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), a_port);
    let b_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), b_port);

    let mut a = UdpTransceiver::connected(a_addr, b_addr);
    let mut b = UdpTransceiver::connected(b_addr, a_addr);
    assert!(a.init());
    assert!(b.init());

    a.send(b"hello");
    sleep(Duration::from_millis(20));

    let mut buf = [0u8; 16];
    let n = b.recv(&mut buf);
    assert_eq!(&buf[..n], b"hello");

    a.deinit();
    b.deinit();
}

#[test]
fn udp_recv_is_nonblocking_when_idle() {
    let port = free_port();
    let mut t = UdpTransceiver::recv_only(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port));
    assert!(t.init());

    let mut buf = [0u8; 16];
    assert_eq!(t.recv(&mut buf), 0);
}

#[test]
fn dual_udp_transceiver_sends_and_receives_across_port_pair() {
    let left_recv_port = free_port();
    let left_send_port = free_port();

    let mut left = DualUdpTransceiver::new(IpAddr::V4(Ipv4Addr::LOCALHOST), left_recv_port, left_send_port);
    let mut right = DualUdpTransceiver::new(IpAddr::V4(Ipv4Addr::LOCALHOST), left_send_port, left_recv_port);
    assert!(left.init());
    assert!(right.init());

    left.send(b"ping");
    sleep(Duration::from_millis(20));

    let mut buf = [0u8; 16];
    let n = right.recv(&mut buf);
    assert_eq!(&buf[..n], b"ping");
}
