//! Operating-system collaborator used by the command handlers.
//!
//! Handlers never spawn processes or touch sockets directly. Everything that
//! reaches outside the agent goes through [`Platform`], which keeps handler
//! logic testable with recording doubles.

mod control;
mod loopback;
mod system;

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::process::ExitStatus;

use camino::{Utf8Path, Utf8PathBuf};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::state::ChannelWidth;

pub use self::system::SystemPlatform;

pub(crate) const PLATFORM_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::platform");

/// Wireless daemons managed by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Daemon {
    /// Access-point daemon.
    #[strum(serialize = "hostapd")]
    Hostapd,
    /// Station daemon.
    #[strum(serialize = "wpa_supplicant")]
    WpaSupplicant,
}

impl Daemon {
    /// Executable and process name.
    #[must_use]
    pub fn program(self) -> &'static str {
        self.into()
    }
}

/// A daemon invocation assembled by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonLaunch {
    daemon: Daemon,
    args: Vec<String>,
}

const HOSTAPD_PID_FILE: &str = "/var/run/hostapd.pid";
const HOSTAPD_LOG_FILE: &str = "/var/log/hostapd.log";
const WPAS_LOG_FILE: &str = "/var/log/supplicant.log";

impl DaemonLaunch {
    /// Background hostapd with a global control interface.
    #[must_use]
    pub fn hostapd(global_ctrl: &Utf8Path, debug_args: &str, conf: &Utf8Path) -> Self {
        let mut args = vec![
            "-B".to_owned(),
            "-P".to_owned(),
            HOSTAPD_PID_FILE.to_owned(),
            "-g".to_owned(),
            global_ctrl.to_string(),
        ];
        push_flags(&mut args, debug_args);
        args.extend([conf.to_string(), "-f".to_owned(), HOSTAPD_LOG_FILE.to_owned()]);
        Self {
            daemon: Daemon::Hostapd,
            args,
        }
    }

    /// Background wpa_supplicant logging to the supplicant log file.
    #[must_use]
    pub fn wpa_supplicant(conf: &Utf8Path, debug_args: &str, interface: &str) -> Self {
        let mut args = vec!["-B".to_owned(), "-c".to_owned(), conf.to_string()];
        push_flags(&mut args, debug_args);
        args.extend([
            "-i".to_owned(),
            interface.to_owned(),
            "-f".to_owned(),
            WPAS_LOG_FILE.to_owned(),
        ]);
        Self {
            daemon: Daemon::WpaSupplicant,
            args,
        }
    }

    /// Background wpa_supplicant used only for scanning.
    #[must_use]
    pub fn wpa_supplicant_quiet(conf: &Utf8Path, interface: &str) -> Self {
        Self {
            daemon: Daemon::WpaSupplicant,
            args: vec![
                "-B".to_owned(),
                "-c".to_owned(),
                conf.to_string(),
                "-i".to_owned(),
                interface.to_owned(),
            ],
        }
    }

    /// Daemon being launched.
    #[must_use]
    pub const fn daemon(&self) -> Daemon {
        self.daemon
    }

    /// Command-line arguments after the program name.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn push_flags(args: &mut Vec<String>, flags: &str) {
    args.extend(flags.split_whitespace().map(str::to_owned));
}

/// Largest UDP payload an IPv4 datagram can carry.
pub const MAX_LOOPBACK_PAYLOAD: usize = 65_507;

/// UDP echo exchange driven from the agent side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopbackTraffic {
    /// Peer that echoes packets back.
    pub peer: IpAddr,
    /// Peer UDP port.
    pub port: u16,
    /// Packets per second.
    pub rate: f64,
    /// Packets to send.
    pub count: u32,
    /// Payload size in bytes, at most [`MAX_LOOPBACK_PAYLOAD`].
    pub size: usize,
}

/// Echo responder the controller drives traffic against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopbackServer {
    /// Only datagrams from this address are echoed.
    pub tool: IpAddr,
    /// Local address to bind.
    pub local: Ipv4Addr,
    /// Local UDP port to bind.
    pub port: u16,
}

/// Broadcast ARP probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpProbe {
    /// Interface the requests leave from.
    pub interface: String,
    /// Address being resolved.
    pub target: Ipv4Addr,
    /// Requests to send.
    pub count: u32,
    /// Requests per second.
    pub rate: u32,
}

/// Errors raised by platform operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A helper program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A helper program reported failure.
    #[error("{program} exited with {status}")]
    CommandFailed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
    },
    /// Program output could not be interpreted.
    #[error("unexpected output from {program}: {detail}")]
    UnexpectedOutput {
        /// Program name.
        program: String,
        /// What was wrong.
        detail: String,
    },
    /// A filesystem operation failed.
    #[error("file operation on {path} failed: {source}")]
    File {
        /// Affected path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A daemon control socket exchange failed.
    #[error("control socket {socket} failed: {source}")]
    Control {
        /// Socket path.
        socket: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A traffic test socket failed.
    #[error("traffic test failed: {source}")]
    Traffic {
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Operations the handlers need from the host.
#[cfg_attr(test, mockall::automock)]
pub trait Platform: Send + Sync {
    /// First IPv4 address of `interface`, if any.
    fn interface_ipv4(&self, interface: &str) -> Result<Option<Ipv4Addr>, PlatformError>;

    /// Hardware address of `interface`.
    fn mac_address(&self, interface: &str) -> Result<String, PlatformError>;

    /// Brings `interface` up with `address/24`.
    fn assign_static_ip(&self, interface: &str, address: Ipv4Addr) -> Result<(), PlatformError>;

    /// Removes every address from `interface`.
    fn flush_ip(&self, interface: &str) -> Result<(), PlatformError>;

    /// Stops every instance of `daemon`.
    fn stop_daemon(&self, daemon: Daemon) -> Result<(), PlatformError>;

    /// Reports whether `daemon` is running.
    fn daemon_running(&self, daemon: Daemon) -> Result<bool, PlatformError>;

    /// Starts a daemon and reports whether it exited successfully.
    fn launch_daemon(&self, launch: &DaemonLaunch) -> Result<bool, PlatformError>;

    /// Replaces the contents of `path`.
    fn write_file(&self, path: &Utf8Path, contents: &str) -> Result<(), PlatformError>;

    /// Removes `path`; a missing file is not an error.
    fn remove_file(&self, path: &Utf8Path) -> Result<(), PlatformError>;

    /// Copies `from` over `to`.
    fn copy_file(&self, from: &Utf8Path, to: &Utf8Path) -> Result<(), PlatformError>;

    /// Clears any soft block on the wireless radios.
    fn unblock_radio(&self) -> Result<(), PlatformError>;

    /// Reloads the wireless driver.
    fn reload_driver(&self) -> Result<(), PlatformError>;

    /// Disables 802.11ax in the wireless driver.
    fn disable_ax(&self) -> Result<(), PlatformError>;

    /// Applies a channel width to the radio behind `interface`.
    fn set_channel_width(&self, interface: &str, width: ChannelWidth)
    -> Result<(), PlatformError>;

    /// Turns station power save on or off.
    fn set_power_save(&self, interface: &str, enabled: bool) -> Result<(), PlatformError>;

    /// Reads the current station power save mode.
    fn power_save(&self, interface: &str) -> Result<bool, PlatformError>;

    /// Sends a command over a daemon control socket and returns the reply.
    fn control_request(&self, socket: &Utf8Path, command: &str) -> Result<String, PlatformError>;

    /// Starts the echo responder, replacing any running one.
    fn start_loopback(&self, server: LoopbackServer) -> Result<(), PlatformError>;

    /// Stops the echo responder if it is running.
    fn stop_loopback(&self) -> Result<(), PlatformError>;

    /// Sends echo traffic and returns how many replies arrived.
    fn send_loopback(&self, traffic: LoopbackTraffic) -> Result<u32, PlatformError>;

    /// Sends broadcast ARP requests and returns how many replies arrived.
    fn send_arp(&self, probe: &ArpProbe) -> Result<u32, PlatformError>;
}
