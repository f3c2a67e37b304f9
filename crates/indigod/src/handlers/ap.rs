//! Access-point commands.

use std::fmt::Write as _;
use std::net::Ipv4Addr;

use camino::Utf8PathBuf;
use indigo_protocol::TlvId;
use tracing::warn;

use super::{
    control_argument, control_command, debug_level, flag_set, optional_control_argument,
};
use crate::configgen::{generate_ap_config, network_directive};
use crate::context::{AgentContext, Band};
use crate::dispatch::{DISPATCH_TARGET, HandlerError, PlatformResultExt, Reply, Request};
use crate::platform::{ArpProbe, Daemon, DaemonLaunch};

pub(crate) const AP_CONFIGURED: &str = "DUT configured as AP : Configuration file created";
pub(crate) const AP_NOT_CONFIGURED: &str = "Failed to create hostapd configuration";
pub(crate) const AP_STARTED: &str = "AP is up : Hostapd service is active";
pub(crate) const AP_NOT_STARTED: &str = "Failed to start hostapd";
pub(crate) const AP_STOPPED: &str = "AP stop completed : Hostapd service is inactive.";
pub(crate) const AP_NOT_STOPPED: &str = "hostapd stop not ok";

const DEFAULT_ARP_COUNT: u32 = 2;
const DEFAULT_ARP_RATE: u32 = 1;

/// Renders the request into the hostapd configuration file.
///
/// A `hw_mode` field picks the band interface; without one the previously
/// selected interface is kept. The band and control directory are only
/// recorded once the file is written.
pub(crate) fn configure(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let band = request.optional_text(TlvId::HW_MODE)?.map(Band::from_hw_mode);
    let interface = match band {
        Some(band) => ctx.band_interface(band),
        None => ctx.ap_interface(),
    };

    let config = match generate_ap_config(request.tlvs(), interface) {
        Ok(config) => config,
        Err(error) => {
            warn!(target: DISPATCH_TARGET, %error, "hostapd configuration not generated");
            return Ok(Reply::not_ok(AP_NOT_CONFIGURED));
        }
    };
    ctx.platform()
        .write_file(ctx.config().hostapd_conf(), config.text())
        .or_fail(AP_NOT_CONFIGURED)?;
    if let Some(band) = band {
        ctx.select_band(band);
    }
    ctx.set_hostapd_ctrl(config.control_interface());
    Ok(Reply::ok(AP_CONFIGURED))
}

pub(crate) fn start_up(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let global_ctrl = match request.non_empty_text(TlvId::GLOBAL_CTRL_IFACE)? {
        Some(path) => Utf8PathBuf::from(path.trim()),
        None => ctx.config().hostapd_global_ctrl().to_path_buf(),
    };
    if let Some(level) = debug_level(request)? {
        ctx.state_mut().set_hostapd_debug_level(level);
    }

    let launch = DaemonLaunch::hostapd(
        &global_ctrl,
        ctx.state().hostapd_debug_args(),
        ctx.config().hostapd_conf(),
    );
    let started = ctx
        .platform()
        .launch_daemon(&launch)
        .or_fail(AP_NOT_STARTED)?;
    Ok(if started {
        Reply::ok(AP_STARTED)
    } else {
        Reply::not_ok(AP_NOT_STARTED)
    })
}

/// Stops hostapd and reports whether it is really gone.
pub(crate) fn stop(_request: &Request<'_>, ctx: &mut AgentContext) -> Result<Reply, HandlerError> {
    let platform = ctx.platform();
    platform
        .stop_daemon(Daemon::Hostapd)
        .or_fail(AP_NOT_STOPPED)?;
    platform
        .remove_file(ctx.config().hostapd_conf())
        .or_fail(AP_NOT_STOPPED)?;
    if let Err(error) = platform.unblock_radio() {
        warn!(target: DISPATCH_TARGET, %error, "radio left blocked");
    }
    let running = platform
        .daemon_running(Daemon::Hostapd)
        .or_fail(AP_NOT_STOPPED)?;
    Ok(if running {
        Reply::not_ok(AP_NOT_STOPPED)
    } else {
        Reply::ok(AP_STOPPED)
    })
}

pub(crate) fn trigger_channel_switch(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let channel: u16 = request.required_parsed(TlvId::CHANNEL)?;
    let frequency: u32 = request.required_parsed(TlvId::FREQUENCY)?;
    control_command(
        ctx,
        &ctx.hostapd_socket(),
        &format!("CHAN_SWITCH {channel} {frequency}"),
        "Channel switch triggered",
        "Failed to trigger channel switch",
    )
}

pub(crate) fn send_disconnect(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let address = control_argument(request, TlvId::ADDRESS)?;
    control_command(
        ctx,
        &ctx.hostapd_socket(),
        &format!("DISASSOCIATE {address} reason=1"),
        "Disconnect sent to station",
        "Failed to disconnect station",
    )
}

/// Sets a runtime hostapd parameter.
///
/// The MBO association-disallow field wins when present; otherwise the GAS
/// comeback delay is required.
pub(crate) fn set_parameter(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let id = if request.non_empty_text(TlvId::MBO_ASSOC_DISALLOW)?.is_some() {
        TlvId::MBO_ASSOC_DISALLOW
    } else {
        TlvId::GAS_COMEBACK_DELAY
    };
    let value = control_argument(request, id)?;
    let Some(directive) = network_directive(id) else {
        return Err(HandlerError::invalid(id, value));
    };
    control_command(
        ctx,
        &ctx.hostapd_socket(),
        &format!("SET {} {value}", directive.name),
        "Parameter set",
        "Failed to set parameter",
    )
}

/// Sends a BSS transition management request to one station.
pub(crate) fn send_btm_request(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let bssid = control_argument(request, TlvId::BSSID)?;
    let mut command = format!("BSS_TM_REQ {bssid}");
    if let Some(value) = optional_control_argument(request, TlvId::DISASSOC_IMMINENT)? {
        let _ = write!(command, " disassoc_imminent={value}");
    }
    if let Some(value) = optional_control_argument(request, TlvId::DISASSOC_TIMER)? {
        let _ = write!(command, " disassoc_timer={value}");
    }
    if let Some(value) = optional_control_argument(request, TlvId::REASSOCIATION_RETRY_DELAY)? {
        let _ = write!(command, " mbo=0:{value}:0");
    }
    let termination = optional_control_argument(request, TlvId::BSS_TERMINATION)?
        .filter(|value| *value != "0");
    let tsf = optional_control_argument(request, TlvId::BSS_TERMINATION_TSF)?;
    let duration = optional_control_argument(request, TlvId::BSS_TERMINATION_DURATION)?;
    if let (Some(_), Some(tsf), Some(duration)) = (termination, tsf, duration) {
        let _ = write!(command, " bss_term={tsf},{duration}");
    }
    if flag_set(request, TlvId::CANDIDATE_LIST)? {
        command.push_str(" pref=1");
    }
    control_command(
        ctx,
        &ctx.hostapd_socket(),
        &command,
        "BTM request sent",
        "Failed to send BTM request",
    )
}

/// Broadcasts ARP requests for a target and reports the replies.
pub(crate) fn send_arp_messages(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let target: Ipv4Addr = request.required_parsed(TlvId::ARP_TARGET_IP)?;
    let probe = ArpProbe {
        interface: ctx.ap_interface().to_owned(),
        target,
        count: request.parsed_or(TlvId::ARP_FRAME_COUNT, DEFAULT_ARP_COUNT)?,
        rate: request.parsed_or(TlvId::ARP_TRANSMISSION_RATE, DEFAULT_ARP_RATE)?,
    };
    let replies = match ctx.platform().send_arp(&probe) {
        Ok(replies) => replies,
        Err(error) => {
            warn!(target: DISPATCH_TARGET, %error, "ARP probe failed");
            0
        }
    };
    let reply = if replies > 0 {
        Reply::ok("ARP replies received")
    } else {
        Reply::not_ok("No ARP replies received")
    };
    Ok(reply.with_field(TlvId::ARP_RECV_NUM, replies.to_string()))
}
