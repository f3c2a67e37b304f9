//! Test double for [`Platform`] that records every call.
//!
//! Files live in memory so scenarios can assert on generated configuration
//! without touching the host. Answers to queries are scripted per test.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Mutex, MutexGuard};

use camino::{Utf8Path, Utf8PathBuf};

use crate::platform::{
    ArpProbe, Daemon, DaemonLaunch, LoopbackServer, LoopbackTraffic, Platform, PlatformError,
};
use crate::state::ChannelWidth;

/// Side effects observed by the recording platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    AssignStaticIp(String, Ipv4Addr),
    FlushIp(String),
    StopDaemon(Daemon),
    Launch(DaemonLaunch),
    Write(Utf8PathBuf),
    Remove(Utf8PathBuf),
    Copy(Utf8PathBuf, Utf8PathBuf),
    UnblockRadio,
    ReloadDriver,
    DisableAx,
    ChannelWidth(String, ChannelWidth),
    PowerSave(String, bool),
    Control(Utf8PathBuf, String),
    StartLoopback(LoopbackServer),
    StopLoopback,
    SendLoopback(LoopbackTraffic),
    SendArp(ArpProbe),
}

#[derive(Debug)]
struct Script {
    addresses: HashMap<String, Ipv4Addr>,
    mac: String,
    launch_succeeds: bool,
    running: bool,
    control_answer: String,
    power_save_sticks: bool,
    power_save: bool,
    loopback_replies: u32,
    arp_replies: u32,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            addresses: HashMap::new(),
            mac: "00:11:22:33:44:55".to_owned(),
            launch_succeeds: true,
            running: false,
            control_answer: "OK\n".to_owned(),
            power_save_sticks: true,
            power_save: false,
            loopback_replies: 0,
            arp_replies: 0,
        }
    }
}

/// Platform double with scripted answers and recorded side effects.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    files: Mutex<HashMap<Utf8PathBuf, String>>,
    script: Mutex<Script>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("recording platform mutex poisoned")
}

impl RecordingPlatform {
    /// Gives `interface` an IPv4 address.
    pub fn with_address(&self, interface: &str, address: Ipv4Addr) -> &Self {
        lock(&self.script)
            .addresses
            .insert(interface.to_owned(), address);
        self
    }

    /// Makes daemon launches report failure.
    pub fn fail_launches(&self) -> &Self {
        lock(&self.script).launch_succeeds = false;
        self
    }

    /// Makes stopped daemons keep running.
    pub fn keep_running(&self) -> &Self {
        lock(&self.script).running = true;
        self
    }

    /// Sets the answer every control request receives.
    pub fn answer_control(&self, answer: &str) -> &Self {
        answer.clone_into(&mut lock(&self.script).control_answer);
        self
    }

    /// Makes power save changes silently not apply.
    pub fn ignore_power_save(&self) -> &Self {
        lock(&self.script).power_save_sticks = false;
        self
    }

    /// Sets how many loopback replies arrive.
    pub fn loopback_replies(&self, replies: u32) -> &Self {
        lock(&self.script).loopback_replies = replies;
        self
    }

    /// Sets how many ARP replies arrive.
    pub fn arp_replies(&self, replies: u32) -> &Self {
        lock(&self.script).arp_replies = replies;
        self
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<PlatformCall> {
        lock(&self.calls).clone()
    }

    /// Contents of a file written through the platform.
    #[must_use]
    pub fn file(&self, path: &Utf8Path) -> Option<String> {
        lock(&self.files).get(path).cloned()
    }

    /// Commands sent over control sockets, in order.
    #[must_use]
    pub fn control_commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Control(_, command) => Some(command),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        lock(&self.calls).push(call);
    }
}

impl Platform for RecordingPlatform {
    fn interface_ipv4(&self, interface: &str) -> Result<Option<Ipv4Addr>, PlatformError> {
        Ok(lock(&self.script).addresses.get(interface).copied())
    }

    fn mac_address(&self, _interface: &str) -> Result<String, PlatformError> {
        Ok(lock(&self.script).mac.clone())
    }

    fn assign_static_ip(&self, interface: &str, address: Ipv4Addr) -> Result<(), PlatformError> {
        self.record(PlatformCall::AssignStaticIp(interface.to_owned(), address));
        Ok(())
    }

    fn flush_ip(&self, interface: &str) -> Result<(), PlatformError> {
        self.record(PlatformCall::FlushIp(interface.to_owned()));
        Ok(())
    }

    fn stop_daemon(&self, daemon: Daemon) -> Result<(), PlatformError> {
        self.record(PlatformCall::StopDaemon(daemon));
        Ok(())
    }

    fn daemon_running(&self, _daemon: Daemon) -> Result<bool, PlatformError> {
        Ok(lock(&self.script).running)
    }

    fn launch_daemon(&self, launch: &DaemonLaunch) -> Result<bool, PlatformError> {
        self.record(PlatformCall::Launch(launch.clone()));
        Ok(lock(&self.script).launch_succeeds)
    }

    fn write_file(&self, path: &Utf8Path, contents: &str) -> Result<(), PlatformError> {
        self.record(PlatformCall::Write(path.to_path_buf()));
        lock(&self.files).insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }

    fn remove_file(&self, path: &Utf8Path) -> Result<(), PlatformError> {
        self.record(PlatformCall::Remove(path.to_path_buf()));
        lock(&self.files).remove(path);
        Ok(())
    }

    fn copy_file(&self, from: &Utf8Path, to: &Utf8Path) -> Result<(), PlatformError> {
        self.record(PlatformCall::Copy(from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    fn unblock_radio(&self) -> Result<(), PlatformError> {
        self.record(PlatformCall::UnblockRadio);
        Ok(())
    }

    fn reload_driver(&self) -> Result<(), PlatformError> {
        self.record(PlatformCall::ReloadDriver);
        Ok(())
    }

    fn disable_ax(&self) -> Result<(), PlatformError> {
        self.record(PlatformCall::DisableAx);
        Ok(())
    }

    fn set_channel_width(
        &self,
        interface: &str,
        width: ChannelWidth,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::ChannelWidth(interface.to_owned(), width));
        Ok(())
    }

    fn set_power_save(&self, interface: &str, enabled: bool) -> Result<(), PlatformError> {
        self.record(PlatformCall::PowerSave(interface.to_owned(), enabled));
        let mut script = lock(&self.script);
        if script.power_save_sticks {
            script.power_save = enabled;
        }
        Ok(())
    }

    fn power_save(&self, _interface: &str) -> Result<bool, PlatformError> {
        Ok(lock(&self.script).power_save)
    }

    fn control_request(&self, socket: &Utf8Path, command: &str) -> Result<String, PlatformError> {
        self.record(PlatformCall::Control(socket.to_path_buf(), command.to_owned()));
        Ok(lock(&self.script).control_answer.clone())
    }

    fn start_loopback(&self, server: LoopbackServer) -> Result<(), PlatformError> {
        self.record(PlatformCall::StartLoopback(server));
        Ok(())
    }

    fn stop_loopback(&self) -> Result<(), PlatformError> {
        self.record(PlatformCall::StopLoopback);
        Ok(())
    }

    fn send_loopback(&self, traffic: LoopbackTraffic) -> Result<u32, PlatformError> {
        self.record(PlatformCall::SendLoopback(traffic));
        Ok(lock(&self.script).loopback_replies)
    }

    fn send_arp(&self, probe: &ArpProbe) -> Result<u32, PlatformError> {
        self.record(PlatformCall::SendArp(probe.clone()));
        Ok(lock(&self.script).arp_replies)
    }
}
