//! Device-level commands: addressing, version, reset and loopback traffic.

use std::net::{IpAddr, Ipv4Addr};

use indigo_protocol::TlvId;
use tracing::{debug, warn};

use super::debug_level;
use crate::context::AgentContext;
use crate::dispatch::{DISPATCH_TARGET, HandlerError, PlatformResultExt, Reply, Request};
use crate::platform::{Daemon, LoopbackServer, LoopbackTraffic, MAX_LOOPBACK_PAYLOAD};

/// Version reported to the controller.
pub(crate) const CONTROL_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOOPBACK_RATE: f64 = 1.0;
const DEFAULT_LOOPBACK_COUNT: u32 = 10;
const DEFAULT_LOOPBACK_SIZE: usize = 1000;

const STA_ROLE: &str = "1";
const AP_ROLE: &str = "2";

pub(crate) fn get_control_app_version(
    _request: &Request<'_>,
    _ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    Ok(Reply::ok(CONTROL_APP_VERSION).with_field(TlvId::CONTROL_APP_VERSION, CONTROL_APP_VERSION))
}

/// Reports the bridge address, falling back to the wireless interface.
pub(crate) fn get_ip_addr(
    _request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let bridge = ctx.config().bridge_interface();
    let address = match ctx.platform().interface_ipv4(bridge) {
        Ok(Some(address)) => Some(address),
        Ok(None) => None,
        Err(error) => {
            debug!(target: DISPATCH_TARGET, %error, bridge, "bridge has no usable address");
            None
        }
    };
    let address = match address {
        Some(address) => Some(address),
        None => ctx
            .platform()
            .interface_ipv4(ctx.sta_interface())
            .or_fail("Failed to read interface address")?,
    };
    Ok(match address {
        Some(address) => {
            let text = address.to_string();
            Reply::ok(text.clone()).with_field(TlvId::DUT_WLAN_IP_ADDR, text)
        }
        None => Reply::not_ok("No IP address assigned"),
    })
}

pub(crate) fn get_mac_addr(
    _request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let mac = ctx
        .platform()
        .mac_address(ctx.sta_interface())
        .or_fail("Unable to get mac address")?;
    Ok(Reply::ok(mac.clone()).with_field(TlvId::DUT_MAC_ADDR, mac))
}

pub(crate) fn assign_static_ip(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let address: Ipv4Addr = request.required_parsed(TlvId::STATIC_IP)?;
    ctx.platform()
        .assign_static_ip(ctx.sta_interface(), address)
        .or_fail("Failed to assign static IP")?;
    Ok(Reply::ok(
        "Static Ip successfully assigned to wireless interface",
    ))
}

/// Returns one role to its initial state.
///
/// The role's daemon is stopped, its interface loses every address and its
/// configuration file is restored from the reset template, or removed when
/// no template is configured. A debug level carried by the request replaces
/// the role's current level.
pub(crate) fn device_reset(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let role = request.required_text(TlvId::ROLE)?;
    let level = debug_level(request)?;
    let (daemon, interface, conf, template) = match role.trim() {
        STA_ROLE => (
            Daemon::WpaSupplicant,
            ctx.sta_interface(),
            ctx.config().wpas_conf(),
            ctx.config().sta_reset_template(),
        ),
        AP_ROLE => (
            Daemon::Hostapd,
            ctx.ap_interface(),
            ctx.config().hostapd_conf(),
            ctx.config().ap_reset_template(),
        ),
        _ => return Err(HandlerError::invalid(TlvId::ROLE, role)),
    };

    let platform = ctx.platform();
    platform
        .stop_daemon(daemon)
        .or_fail("Failed to stop wireless daemon")?;
    platform
        .flush_ip(interface)
        .or_fail("Failed to flush interface address")?;
    let restored = match template {
        Some(template) => platform.copy_file(template, conf),
        None => platform.remove_file(conf),
    };
    restored.or_fail("Failed to restore configuration file")?;

    if let Some(level) = level {
        let state = ctx.state_mut();
        match daemon {
            Daemon::Hostapd => state.set_hostapd_debug_level(level),
            Daemon::WpaSupplicant => state.set_wpas_debug_level(level),
        }
    }
    Ok(Reply::ok("Device reset successfully"))
}

/// Starts the echo responder on the first interface holding an address.
pub(crate) fn start_loopback(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let tool: IpAddr = request.required_parsed(TlvId::TOOL_IP_ADDRESS)?;
    let port: u16 = request.required_parsed(TlvId::TOOL_UDP_PORT)?;
    let Some(local) = local_address(ctx) else {
        return Ok(Reply::not_ok("No local address for loopback server"));
    };
    ctx.platform()
        .start_loopback(LoopbackServer { tool, local, port })
        .or_fail("Failed to start loopback server")?;
    Ok(Reply::ok("Loopback server in idle state"))
}

fn local_address(ctx: &AgentContext) -> Option<Ipv4Addr> {
    let config = ctx.config();
    [
        config.bridge_interface(),
        config.wireless_interface(),
        config.wired_interface(),
    ]
    .into_iter()
    .find_map(|interface| match ctx.platform().interface_ipv4(interface) {
        Ok(address) => address,
        Err(error) => {
            debug!(target: DISPATCH_TARGET, %error, interface, "skipping interface");
            None
        }
    })
}

pub(crate) fn stop_loopback(
    _request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    ctx.platform()
        .stop_loopback()
        .or_fail("Failed to stop loopback server")?;
    Ok(Reply::ok("Loopback server is stopped"))
}

/// Sends echo traffic to the controller and reports how much came back.
///
/// The received count is present on every reply that reaches the traffic
/// stage, failed ones included.
pub(crate) fn send_loopback_data(
    request: &Request<'_>,
    ctx: &mut AgentContext,
) -> Result<Reply, HandlerError> {
    let peer: IpAddr = request.required_parsed(TlvId::DUT_IP_ADDRESS)?;
    let port: u16 = request.required_parsed(TlvId::DUT_UDP_PORT)?;
    let rate: f64 = request.parsed_or(TlvId::UDP_PACKET_RATE, DEFAULT_LOOPBACK_RATE)?;
    if !(rate.is_finite() && rate > 0.0) {
        return Err(HandlerError::invalid(TlvId::UDP_PACKET_RATE, rate.to_string()));
    }
    let count = request.parsed_or(TlvId::PACKET_COUNT, DEFAULT_LOOPBACK_COUNT)?;
    let size: usize = request.parsed_or(TlvId::UDP_PACKET_SIZE, DEFAULT_LOOPBACK_SIZE)?;
    if size > MAX_LOOPBACK_PAYLOAD {
        return Err(HandlerError::invalid(TlvId::UDP_PACKET_SIZE, size.to_string()));
    }

    let traffic = LoopbackTraffic {
        peer,
        port,
        rate,
        count,
        size,
    };
    let received = match ctx.platform().send_loopback(traffic) {
        Ok(received) => received,
        Err(error) => {
            warn!(target: DISPATCH_TARGET, %error, "loopback traffic failed");
            0
        }
    };
    let reply = if received > 0 {
        Reply::ok("Send loopback data successfully")
    } else {
        Reply::not_ok("Send loopback data failed")
    };
    Ok(reply.with_field(TlvId::LOOP_BACK_DATA_RECEIVED, received.to_string()))
}
