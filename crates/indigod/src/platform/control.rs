//! Request/reply client for hostapd and wpa_supplicant control sockets.
//!
//! Both daemons listen on a Unix datagram socket and answer each command on
//! the sender's bound address, so the client binds a private socket inside a
//! temporary directory for the duration of one exchange.

use std::io;
use std::os::unix::net::UnixDatagram;
use std::time::Duration;

use camino::Utf8Path;
use tracing::debug;

use super::{PLATFORM_TARGET, PlatformError};

const CONTROL_TIMEOUT: Duration = Duration::from_secs(3);
const MAX_REPLY_BYTES: usize = 4096;

pub(crate) fn request(socket: &Utf8Path, command: &str) -> Result<String, PlatformError> {
    let control_error = |source: io::Error| PlatformError::Control {
        socket: socket.to_path_buf(),
        source,
    };
    let local_dir = tempfile::Builder::new()
        .prefix("indigod-ctrl")
        .tempdir()
        .map_err(control_error)?;
    let client = UnixDatagram::bind(local_dir.path().join("client")).map_err(control_error)?;
    client.connect(socket.as_std_path()).map_err(control_error)?;
    client
        .set_read_timeout(Some(CONTROL_TIMEOUT))
        .map_err(control_error)?;
    client.send(command.as_bytes()).map_err(control_error)?;
    debug!(target: PLATFORM_TARGET, %socket, command, "control request sent");

    let mut buffer = vec![0_u8; MAX_REPLY_BYTES];
    loop {
        let received = client.recv(&mut buffer).map_err(control_error)?;
        let reply = buffer.get(..received).unwrap_or_default();
        // Attached monitors also receive "<level>event" lines; skip them.
        if reply.first() == Some(&b'<') {
            continue;
        }
        return Ok(String::from_utf8_lossy(reply).into_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn exchanges_one_command() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("wlan0");
        let server = UnixDatagram::bind(&path).expect("bind control socket");
        let responder = thread::spawn(move || {
            let mut buffer = [0_u8; 64];
            let (len, peer) = server.recv_from(&mut buffer).expect("receive command");
            let peer = peer.as_pathname().expect("client is bound").to_path_buf();
            server.send_to(b"<3>CTRL-EVENT-SCAN-STARTED", &peer).expect("send event");
            server.send_to(b"OK\n", &peer).expect("send reply");
            buffer.get(..len).map(<[u8]>::to_vec).expect("command bytes")
        });

        let socket = Utf8Path::from_path(&path).expect("utf8 path");
        let reply = request(socket, "DISCONNECT").expect("control exchange");

        assert_eq!(reply, "OK\n");
        assert_eq!(responder.join().expect("join responder"), b"DISCONNECT");
    }

    #[test]
    fn missing_socket_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent");
        let socket = Utf8Path::from_path(&path).expect("utf8 path");
        let error = request(socket, "PING").expect_err("no listener");
        assert!(matches!(error, PlatformError::Control { .. }));
    }
}
