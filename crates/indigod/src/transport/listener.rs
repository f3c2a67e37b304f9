//! Listener implementation for the controller endpoint.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use indigo_config::ServiceEndpoint;
use tracing::{info, warn};

use super::{DatagramHandler, DatagramReply, LISTENER_TARGET, ListenerError};

const RECEIVE_TIMEOUT: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);
const MAX_DATAGRAM_BYTES: usize = 64 * 1024;

/// UDP listener bound to the controller endpoint.
#[derive(Debug)]
pub struct DatagramListener {
    endpoint: ServiceEndpoint,
    socket: UdpSocket,
}

impl DatagramListener {
    /// Binds the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the endpoint does not resolve or the
    /// socket cannot be bound.
    pub fn bind(endpoint: &ServiceEndpoint) -> Result<Self, ListenerError> {
        let addr = endpoint.resolve()?;
        let socket =
            UdpSocket::bind(addr).map_err(|source| ListenerError::Bind { addr, source })?;
        Ok(Self {
            endpoint: endpoint.clone(),
            socket,
        })
    }

    /// Address the socket is bound to.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr().ok()
    }

    /// Starts serving datagrams on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Timeout`] when the receive timeout that lets
    /// the thread observe shutdown cannot be set.
    pub fn start(self, handler: Arc<dyn DatagramHandler>) -> Result<ListenerHandle, ListenerError> {
        self.socket
            .set_read_timeout(Some(RECEIVE_TIMEOUT))
            .map_err(|source| ListenerError::Timeout { source })?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::clone(&shutdown);
        let handle = thread::spawn(move || run_receive_loop(&self, &shutdown_flag, &*handler));
        Ok(ListenerHandle {
            shutdown,
            handle: Some(handle),
        })
    }
}

/// Handle to the background listener thread.
#[derive(Debug)]
pub struct ListenerHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Asks the listener thread to stop after the current datagram.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Waits for the listener thread to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] when the thread panicked.
    pub fn join(mut self) -> Result<(), ListenerError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => Ok(()),
                Err(_) => Err(ListenerError::ThreadPanic),
            }
        } else {
            Ok(())
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn run_receive_loop(
    listener: &DatagramListener,
    shutdown: &AtomicBool,
    handler: &dyn DatagramHandler,
) {
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        "datagram listener active"
    );
    let mut buffer = vec![0_u8; MAX_DATAGRAM_BYTES];
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match listener.socket.recv_from(&mut buffer) {
            Ok((len, peer)) => {
                last_error = None;
                let datagram = buffer.get(..len).unwrap_or_default();
                handler.handle(datagram, &DatagramReply::new(&listener.socket, peer));
            }
            Err(error) if is_timeout(&error) => {}
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "datagram receive error"
                    );
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        "datagram listener stopped"
    );
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}
