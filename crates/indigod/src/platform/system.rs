//! [`Platform`] backed by the host's networking utilities.

use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::process::{Command, Output};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8Path;
use indigo_config::Config;
use tracing::{debug, info};

use super::loopback::{self, LoopbackResponder};
use super::{
    ArpProbe, Daemon, DaemonLaunch, LoopbackServer, LoopbackTraffic, PLATFORM_TARGET, Platform,
    PlatformError, control,
};
use crate::state::ChannelWidth;

const STOP_WAIT: Duration = Duration::from_secs(2);
const STOP_POLL: Duration = Duration::from_millis(100);

/// Drives `ip`, `iw`, `rfkill`, `killall` and friends.
#[derive(Debug, Default)]
pub struct SystemPlatform {
    driver_module: Option<String>,
    loopback: Mutex<Option<LoopbackResponder>>,
}

impl SystemPlatform {
    /// Builds a platform from the agent configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            driver_module: config.driver_module().map(str::to_owned),
            loopback: Mutex::new(None),
        }
    }

    fn take_responder(&self) -> Option<LoopbackResponder> {
        self.loopback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

fn run(program: &str, args: &[&str]) -> Result<Output, PlatformError> {
    debug!(target: PLATFORM_TARGET, program, ?args, "running helper");
    Command::new(program)
        .args(args)
        .output()
        .map_err(|source| PlatformError::Spawn {
            program: program.to_owned(),
            source,
        })
}

fn run_checked(program: &str, args: &[&str]) -> Result<Output, PlatformError> {
    let output = run(program, args)?;
    if output.status.success() {
        Ok(output)
    } else {
        Err(PlatformError::CommandFailed {
            program: program.to_owned(),
            status: output.status,
        })
    }
}

fn file_error(path: &Utf8Path) -> impl FnOnce(io::Error) -> PlatformError + '_ {
    move |source| PlatformError::File {
        path: path.to_path_buf(),
        source,
    }
}

/// Extracts the first address from `ip -4 -o addr show` output.
fn parse_ipv4(output: &str) -> Option<Ipv4Addr> {
    let mut tokens = output.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "inet" {
            let cidr = tokens.next()?;
            let address = cidr.split('/').next()?;
            return address.parse().ok();
        }
    }
    None
}

/// Reads `Power save: on|off` from `iw dev <if> get power_save`.
fn parse_power_save(output: &str) -> Option<bool> {
    let value = output.trim().strip_prefix("Power save:")?.trim();
    match value {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// Seconds `arping` may run: one per `rate` frames plus one.
///
/// A zero rate is treated as one frame per second.
fn arping_deadline(count: u32, rate: u32) -> u32 {
    count
        .checked_div(rate.max(1))
        .unwrap_or(count)
        .saturating_add(1)
}

/// Reads the reply count from `arping` output.
fn parse_arping_replies(output: &str) -> Option<u32> {
    output.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("Received ")?;
        rest.split_whitespace().next()?.parse().ok()
    })
}

impl Platform for SystemPlatform {
    fn interface_ipv4(&self, interface: &str) -> Result<Option<Ipv4Addr>, PlatformError> {
        let output = run("ip", &["-4", "-o", "addr", "show", "dev", interface])?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(parse_ipv4(&String::from_utf8_lossy(&output.stdout)))
    }

    fn mac_address(&self, interface: &str) -> Result<String, PlatformError> {
        let path = Utf8Path::new("/sys/class/net")
            .join(interface)
            .join("address");
        let address = fs::read_to_string(&path).map_err(file_error(&path))?;
        Ok(address.trim().to_owned())
    }

    fn assign_static_ip(&self, interface: &str, address: Ipv4Addr) -> Result<(), PlatformError> {
        run_checked("ip", &["link", "set", "dev", interface, "up"])?;
        let cidr = format!("{address}/24");
        run_checked("ip", &["addr", "add", &cidr, "dev", interface])?;
        Ok(())
    }

    fn flush_ip(&self, interface: &str) -> Result<(), PlatformError> {
        run_checked("ip", &["addr", "flush", "dev", interface])?;
        Ok(())
    }

    fn stop_daemon(&self, daemon: Daemon) -> Result<(), PlatformError> {
        // killall fails when nothing is running, which is the goal anyway.
        run("killall", &[daemon.program()])?;
        let deadline = Instant::now() + STOP_WAIT;
        while self.daemon_running(daemon)? && Instant::now() < deadline {
            thread::sleep(STOP_POLL);
        }
        Ok(())
    }

    fn daemon_running(&self, daemon: Daemon) -> Result<bool, PlatformError> {
        Ok(run("pidof", &[daemon.program()])?.status.success())
    }

    fn launch_daemon(&self, launch: &DaemonLaunch) -> Result<bool, PlatformError> {
        let program = launch.daemon().program();
        info!(
            target: PLATFORM_TARGET,
            program,
            args = ?launch.args(),
            "launching daemon"
        );
        let status = Command::new(program)
            .args(launch.args())
            .status()
            .map_err(|source| PlatformError::Spawn {
                program: program.to_owned(),
                source,
            })?;
        Ok(status.success())
    }

    fn write_file(&self, path: &Utf8Path, contents: &str) -> Result<(), PlatformError> {
        fs::write(path, contents).map_err(file_error(path))
    }

    fn remove_file(&self, path: &Utf8Path) -> Result<(), PlatformError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(file_error(path)(error)),
        }
    }

    fn copy_file(&self, from: &Utf8Path, to: &Utf8Path) -> Result<(), PlatformError> {
        fs::copy(from, to).map_err(file_error(from))?;
        Ok(())
    }

    fn unblock_radio(&self) -> Result<(), PlatformError> {
        run_checked("rfkill", &["unblock", "wlan"])?;
        Ok(())
    }

    fn reload_driver(&self) -> Result<(), PlatformError> {
        let Some(module) = self.driver_module.as_deref() else {
            debug!(target: PLATFORM_TARGET, "no driver module configured, skipping reload");
            return Ok(());
        };
        run_checked("modprobe", &["-r", module])?;
        run_checked("modprobe", &[module])?;
        info!(target: PLATFORM_TARGET, module, "wireless driver reloaded");
        Ok(())
    }

    fn disable_ax(&self) -> Result<(), PlatformError> {
        debug!(
            target: PLATFORM_TARGET,
            "802.11ax cannot be disabled without vendor tooling, skipping"
        );
        Ok(())
    }

    fn set_channel_width(
        &self,
        interface: &str,
        width: ChannelWidth,
    ) -> Result<(), PlatformError> {
        debug!(
            target: PLATFORM_TARGET,
            interface,
            %width,
            "channel width is left to the station daemon on this platform"
        );
        Ok(())
    }

    fn set_power_save(&self, interface: &str, enabled: bool) -> Result<(), PlatformError> {
        let mode = if enabled { "on" } else { "off" };
        run_checked("iw", &["dev", interface, "set", "power_save", mode])?;
        Ok(())
    }

    fn power_save(&self, interface: &str) -> Result<bool, PlatformError> {
        let output = run_checked("iw", &["dev", interface, "get", "power_save"])?;
        let text = String::from_utf8_lossy(&output.stdout);
        parse_power_save(&text).ok_or_else(|| PlatformError::UnexpectedOutput {
            program: "iw".to_owned(),
            detail: text.trim().to_owned(),
        })
    }

    fn control_request(&self, socket: &Utf8Path, command: &str) -> Result<String, PlatformError> {
        control::request(socket, command)
    }

    fn start_loopback(&self, server: LoopbackServer) -> Result<(), PlatformError> {
        if let Some(previous) = self.take_responder() {
            previous.stop();
        }
        let responder = LoopbackResponder::start(server)
            .map_err(|source| PlatformError::Traffic { source })?;
        *self
            .loopback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(responder);
        Ok(())
    }

    fn stop_loopback(&self) -> Result<(), PlatformError> {
        if let Some(responder) = self.take_responder() {
            responder.stop();
        }
        Ok(())
    }

    fn send_loopback(&self, traffic: LoopbackTraffic) -> Result<u32, PlatformError> {
        loopback::exchange(traffic).map_err(|source| PlatformError::Traffic { source })
    }

    fn send_arp(&self, probe: &ArpProbe) -> Result<u32, PlatformError> {
        let count = probe.count.to_string();
        let deadline = arping_deadline(probe.count, probe.rate).to_string();
        let target = probe.target.to_string();
        let output = run(
            "arping",
            &["-b", "-c", &count, "-w", &deadline, "-I", &probe.interface, &target],
        )?;
        let text = String::from_utf8_lossy(&output.stdout);
        parse_arping_replies(&text).ok_or_else(|| PlatformError::UnexpectedOutput {
            program: "arping".to_owned(),
            detail: text.lines().last().unwrap_or_default().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "3: wlan0    inet 192.168.1.20/24 brd 192.168.1.255 scope global wlan0\n",
        Some(Ipv4Addr::new(192, 168, 1, 20))
    )]
    #[case("", None)]
    #[case("3: wlan0    inet garbage/24", None)]
    fn parses_interface_addresses(#[case] output: &str, #[case] expected: Option<Ipv4Addr>) {
        assert_eq!(parse_ipv4(output), expected);
    }

    #[rstest]
    #[case(2, 1, 3)]
    #[case(10, 4, 3)]
    #[case(5, 0, 6)]
    #[case(u32::MAX, 1, u32::MAX)]
    fn arping_deadline_never_overflows(
        #[case] count: u32,
        #[case] rate: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(arping_deadline(count, rate), expected);
    }

    #[rstest]
    #[case("Power save: on\n", Some(true))]
    #[case("Power save: off", Some(false))]
    #[case("command failed", None)]
    fn parses_power_save(#[case] output: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_power_save(output), expected);
    }

    #[test]
    fn parses_arping_summary() {
        let output = "ARPING 10.0.0.1 from 10.0.0.2 wlan0\n\
                      Unicast reply from 10.0.0.1 [AA:BB:CC:DD:EE:FF]  1.2ms\n\
                      Sent 2 probes (2 broadcast(s))\n\
                      Received 1 response(s)\n";
        assert_eq!(parse_arping_replies(output), Some(1));
    }

    #[test]
    fn file_operations_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(dir.path()).expect("utf8 temp dir");
        let platform = SystemPlatform::default();
        let source = root.join("hostapd.conf");
        let copy = root.join("hostapd.reset");

        platform.write_file(&source, "ssid=Indigo\n").expect("write");
        platform.copy_file(&source, &copy).expect("copy");
        assert_eq!(fs::read_to_string(&copy).expect("read copy"), "ssid=Indigo\n");

        platform.remove_file(&source).expect("remove");
        platform.remove_file(&source).expect("removing twice is fine");
        assert!(!source.exists());
    }
}
