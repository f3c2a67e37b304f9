//! UDP echo traffic used by the loopback test commands.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::{LoopbackServer, LoopbackTraffic, MAX_LOOPBACK_PAYLOAD, PLATFORM_TARGET};

const RESPONDER_POLL: Duration = Duration::from_millis(100);
const RESPONDER_IDLE_LIMIT: Duration = Duration::from_secs(180);
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);
const MAX_DATAGRAM: usize = 64 * 1024;

/// Background thread echoing datagrams from the test tool.
#[derive(Debug)]
pub(crate) struct LoopbackResponder {
    local_addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl LoopbackResponder {
    pub(crate) fn start(server: LoopbackServer) -> io::Result<Self> {
        let socket = UdpSocket::bind((server.local, server.port))?;
        socket.set_read_timeout(Some(RESPONDER_POLL))?;
        let local_addr = socket.local_addr()?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = thread::spawn(move || run_responder(&socket, server, &flag));
        info!(
            target: PLATFORM_TARGET,
            %local_addr,
            tool = %server.tool,
            "loopback responder started"
        );
        Ok(Self {
            local_addr,
            shutdown,
            handle: Some(handle),
        })
    }

    #[cfg(test)]
    pub(crate) const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub(crate) fn stop(mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!(target: PLATFORM_TARGET, "loopback responder thread panicked");
        }
        info!(
            target: PLATFORM_TARGET,
            local_addr = %self.local_addr,
            "loopback responder stopped"
        );
    }
}

impl Drop for LoopbackResponder {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn run_responder(socket: &UdpSocket, server: LoopbackServer, shutdown: &AtomicBool) {
    let mut buffer = vec![0_u8; MAX_DATAGRAM];
    let mut last_activity = Instant::now();
    while !shutdown.load(Ordering::SeqCst) {
        if last_activity.elapsed() > RESPONDER_IDLE_LIMIT {
            info!(target: PLATFORM_TARGET, "loopback responder idle, stopping");
            break;
        }
        match socket.recv_from(&mut buffer) {
            Ok((len, peer)) if peer.ip() == server.tool => {
                last_activity = Instant::now();
                let payload = buffer.get(..len).unwrap_or_default();
                if let Err(error) = socket.send_to(payload, peer) {
                    warn!(target: PLATFORM_TARGET, %error, "loopback echo failed");
                }
            }
            Ok((_, peer)) => {
                debug!(target: PLATFORM_TARGET, %peer, "ignoring datagram from unknown peer");
            }
            Err(error) if is_timeout(&error) => {}
            Err(error) => {
                warn!(target: PLATFORM_TARGET, %error, "loopback receive failed");
                thread::sleep(RESPONDER_POLL);
            }
        }
    }
}

/// Sends paced echo traffic and counts the replies.
pub(crate) fn exchange(traffic: LoopbackTraffic) -> io::Result<u32> {
    if traffic.size > MAX_LOOPBACK_PAYLOAD {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload of {} bytes exceeds a UDP datagram", traffic.size),
        ));
    }
    let bind_addr: SocketAddr = if traffic.peer.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(bind_addr)?;
    socket.connect((traffic.peer, traffic.port))?;

    let interval = pacing_interval(traffic.rate);
    let payload = vec![0x5a_u8; traffic.size];
    let mut buffer = vec![0_u8; traffic.size.max(1)];
    let mut received = 0_u32;
    for _ in 0..traffic.count {
        socket.send(&payload)?;
        received += drain(&socket, &mut buffer, interval)?;
    }
    received += drain(&socket, &mut buffer, DRAIN_TIMEOUT)?;
    debug!(
        target: PLATFORM_TARGET,
        sent = traffic.count,
        received,
        "loopback exchange finished"
    );
    Ok(received)
}

fn pacing_interval(rate: f64) -> Duration {
    if rate.is_finite() && rate > 0.0 {
        Duration::try_from_secs_f64(rate.recip()).unwrap_or(Duration::from_secs(1))
    } else {
        Duration::from_secs(1)
    }
}

fn drain(socket: &UdpSocket, buffer: &mut [u8], window: Duration) -> io::Result<u32> {
    let deadline = Instant::now() + window;
    let mut received = 0;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(received);
        }
        socket.set_read_timeout(Some(remaining))?;
        match socket.recv(buffer) {
            Ok(_) => received += 1,
            Err(error) if is_timeout(&error) => return Ok(received),
            Err(error) if error.kind() == io::ErrorKind::ConnectionRefused => {}
            Err(error) => return Err(error),
        }
    }
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
