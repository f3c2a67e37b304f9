//! Station commands.

use std::thread;
use std::time::Duration;

use camino::Utf8Path;
use indigo_protocol::TlvId;
use tracing::{debug, warn};

use super::{control_argument, control_command, debug_level, flag_set};
use crate::configgen::{RadioAction, generate_sta_config, network_directive};
use crate::context::AgentContext;
use crate::dispatch::{DISPATCH_TARGET, HandlerError, PlatformResultExt, Reply, Request};
use crate::platform::{Daemon, DaemonLaunch};
use crate::state::{ChannelWidth, PhyMode};

pub(crate) const STA_CONFIGURED: &str =
    "Test Platform configured as STA : Configuration file created";
pub(crate) const STA_NOT_CONFIGURED: &str = "Failed to create wpa_supplicant configuration";
pub(crate) const STA_STARTED: &str = "STA is up : wpa_supplicant service is active";
pub(crate) const STA_NOT_STARTED: &str = "Failed to start wpa_supplicant";

const NEIGHBOR_REPORT_REQUEST: &str = "NeighborReportReq";
const QUERY_LIST_WITH_CELL_PREF: &str = "QueryListWithCellPref";
const SCAN_POLL_ATTEMPTS: u32 = 20;
const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Renders the request into the wpa_supplicant configuration file.
///
/// Writing the file consumes any staged PHY mode and channel width; a failed
/// render or write leaves them staged. The driver changes they imply are
/// applied after the file is written, followed by the last known channel
/// width.
pub(crate) fn configure(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let mut state = ctx.state().clone();
    let config = match generate_sta_config(request.tlvs(), &mut state) {
        Ok(config) => config,
        Err(error) => {
            warn!(target: DISPATCH_TARGET, %error, "wpa_supplicant configuration not generated");
            return Ok(Reply::not_ok(STA_NOT_CONFIGURED));
        }
    };
    ctx.platform()
        .write_file(ctx.config().wpas_conf(), config.text())
        .or_fail(STA_NOT_CONFIGURED)?;
    *ctx.state_mut() = state;
    ctx.set_wpas_ctrl(config.control_interface());

    let platform = ctx.platform();
    for action in config.radio_actions() {
        let applied = match action {
            RadioAction::DisableAx => platform.disable_ax(),
            RadioAction::ReloadDriver => platform.reload_driver(),
        };
        applied.or_fail("Failed to apply PHY mode")?;
    }
    let width = ctx.state().last_channel_width().unwrap_or(ChannelWidth::Auto);
    platform
        .set_channel_width(ctx.sta_interface(), width)
        .or_fail("Failed to apply channel width")?;
    Ok(Reply::ok(STA_CONFIGURED))
}

/// Writes a minimal configuration and starts wpa_supplicant on it.
pub(crate) fn start_up(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let control = control_argument(request, TlvId::CONTROL_INTERFACE)?;
    if let Some(level) = debug_level(request)? {
        ctx.state_mut().set_wpas_debug_level(level);
    }
    ctx.platform()
        .stop_daemon(Daemon::WpaSupplicant)
        .or_fail(STA_NOT_STARTED)?;
    ctx.platform()
        .write_file(
            ctx.config().wpas_conf(),
            &format!("ctrl_interface={control}\nap_scan=1\n"),
        )
        .or_fail(STA_NOT_STARTED)?;
    ctx.set_wpas_ctrl(Utf8Path::new(control));
    launch_supplicant(ctx)
}

/// Restarts wpa_supplicant on the current configuration file.
pub(crate) fn associate(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    if let Some(level) = debug_level(request)? {
        ctx.state_mut().set_wpas_debug_level(level);
    }
    ctx.platform()
        .stop_daemon(Daemon::WpaSupplicant)
        .or_fail(STA_NOT_STARTED)?;
    launch_supplicant(ctx)
}

fn launch_supplicant(ctx: &AgentContext) -> Result<Reply, HandlerError> {
    let launch = DaemonLaunch::wpa_supplicant(
        ctx.config().wpas_conf(),
        ctx.state().wpas_debug_args(),
        ctx.sta_interface(),
    );
    let started = ctx
        .platform()
        .launch_daemon(&launch)
        .or_fail(STA_NOT_STARTED)?;
    Ok(if started {
        Reply::ok(STA_STARTED)
    } else {
        Reply::not_ok(STA_NOT_STARTED)
    })
}

pub(crate) fn stop(_request: &Request<'_>, ctx: &mut AgentContext) -> Result<Reply, HandlerError> {
    const FAILURE: &str = "Failed to stop wpa_supplicant";
    let platform = ctx.platform();
    platform
        .stop_daemon(Daemon::WpaSupplicant)
        .or_fail(FAILURE)?;
    platform
        .remove_file(ctx.config().wpas_conf())
        .or_fail(FAILURE)?;
    platform.flush_ip(ctx.sta_interface()).or_fail(FAILURE)?;
    Ok(Reply::ok("STA is disconnected"))
}

pub(crate) fn send_disconnect(
    _request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    control_command(
        ctx,
        &ctx.wpas_socket(),
        "DISCONNECT",
        "STA disconnected",
        "Failed to disconnect STA",
    )
}

pub(crate) fn send_reconnect(
    _request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    control_command(
        ctx,
        &ctx.wpas_socket(),
        "RECONNECT",
        "STA reconnecting",
        "Failed to reconnect STA",
    )
}

pub(crate) fn set_parameter(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let id = TlvId::MBO_IGNORE_ASSOC_DISALLOW;
    let value = control_argument(request, id)?;
    let Some(directive) = network_directive(id) else {
        return Err(HandlerError::invalid(id, value));
    };
    control_command(
        ctx,
        &ctx.wpas_socket(),
        &format!("SET {} {value}", directive.name),
        "Parameter set",
        "Failed to set parameter",
    )
}

pub(crate) fn send_btm_query(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let reason = control_argument(request, TlvId::BTM_QUERY_REASON_CODE)?;
    let mut command = format!("WNM_BSS_QUERY {reason}");
    if flag_set(request, TlvId::CANDIDATE_LIST)? {
        command.push_str(" list");
    }
    control_command(
        ctx,
        &ctx.wpas_socket(),
        &command,
        "BTM query sent",
        "Failed to send BTM query",
    )
}

/// Scans for a BSS and sends it an ANQP query.
///
/// wpa_supplicant is restarted on a scanning configuration. The query is sent
/// once the target BSS shows up in the scan results, or after the poll budget
/// runs out.
pub(crate) fn send_anqp_query(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    const FAILURE: &str = "Failed to send ANQP query";
    let bssid = control_argument(request, TlvId::BSSID)?;
    let suffix = match request.non_empty_text(TlvId::ANQP_INFO_ID)?.map(str::trim) {
        None => "",
        Some(NEIGHBOR_REPORT_REQUEST) => " 272",
        Some(QUERY_LIST_WITH_CELL_PREF) => " mbo:2",
        Some(other) => return Err(HandlerError::invalid(TlvId::ANQP_INFO_ID, other)),
    };

    let platform = ctx.platform();
    let conf = ctx.config().wpas_conf();
    platform
        .stop_daemon(Daemon::WpaSupplicant)
        .or_fail(FAILURE)?;
    platform
        .write_file(conf, &scan_config(ctx))
        .or_fail(FAILURE)?;
    let launched = platform
        .launch_daemon(&DaemonLaunch::wpa_supplicant_quiet(conf, ctx.sta_interface()))
        .or_fail(FAILURE)?;
    if !launched {
        return Ok(Reply::not_ok(FAILURE));
    }

    let socket = ctx.wpas_socket();
    let scan = control_command(ctx, &socket, "SCAN", "", FAILURE)?;
    if !scan.status().is_ok() {
        return Ok(scan);
    }
    wait_for_bss(ctx, &socket, bssid);
    control_command(
        ctx,
        &socket,
        &format!("ANQP_GET {bssid}{suffix}"),
        "ANQP query sent",
        FAILURE,
    )
}

fn scan_config(ctx: &AgentContext) -> String {
    format!(
        "ctrl_interface={}\nap_scan=1\ninterworking=1\n",
        ctx.wpas_ctrl()
    )
}

fn wait_for_bss(ctx: &AgentContext, socket: &Utf8Path, bssid: &str) {
    let query = format!("BSS {bssid}");
    for _ in 0..SCAN_POLL_ATTEMPTS {
        match ctx.platform().control_request(socket, &query) {
            Ok(answer) if !answer.trim().is_empty() && !answer.starts_with("FAIL") => return,
            Ok(_) => {}
            Err(error) => debug!(target: DISPATCH_TARGET, %error, "scan result poll failed"),
        }
        thread::sleep(SCAN_POLL_INTERVAL);
    }
    debug!(target: DISPATCH_TARGET, bssid, "BSS not seen before ANQP query");
}

/// Stages a PHY mode for the next station configuration.
///
/// `auto` is applied immediately by reloading the driver and leaves nothing
/// staged. Unknown values leave the state untouched.
pub(crate) fn set_phy_mode(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let text = request.required_text(TlvId::PHY_MODE)?;
    let mode: PhyMode = text
        .trim()
        .parse()
        .map_err(|_| HandlerError::invalid(TlvId::PHY_MODE, text))?;
    if mode == PhyMode::Auto {
        ctx.platform()
            .reload_driver()
            .or_fail("Failed to reload wireless driver")?;
        ctx.state_mut().clear_pending_phy_mode();
        return Ok(Reply::ok("PHY mode set to auto"));
    }
    ctx.state_mut().set_pending_phy_mode(mode);
    Ok(Reply::ok(format!("PHY mode {mode} staged")))
}

/// Stages a channel width; `auto` is also applied to the radio right away.
pub(crate) fn set_channel_width(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let text = request.required_text(TlvId::CHANNEL_WIDTH)?;
    let width: ChannelWidth = text
        .trim()
        .parse()
        .map_err(|_| HandlerError::invalid(TlvId::CHANNEL_WIDTH, text))?;
    if width == ChannelWidth::Auto {
        ctx.platform()
            .set_channel_width(ctx.sta_interface(), width)
            .or_fail("Failed to apply channel width")?;
    }
    ctx.state_mut().set_pending_channel_width(width);
    Ok(Reply::ok(format!("Channel width {width} staged")))
}

/// Switches station power save and confirms the resulting mode.
pub(crate) fn set_power_save(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    const FAILURE: &str = "Failed to set power save mode";
    let enabled = request.required_text(TlvId::STA_POWER_SAVE)?.trim() != "False";
    let platform = ctx.platform();
    let interface = ctx.sta_interface();
    platform
        .set_power_save(interface, enabled)
        .or_fail(FAILURE)?;
    let current = platform.power_save(interface).or_fail(FAILURE)?;
    Ok(if current == enabled {
        Reply::ok(if enabled {
            "Power save is on"
        } else {
            "Power save is off"
        })
    } else {
        Reply::not_ok(FAILURE)
    })
}
