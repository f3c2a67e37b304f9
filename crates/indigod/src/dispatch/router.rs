//! Command code to handler routing.
//!
//! The table is a closed `match` over [`ApiCommand`], so adding a command
//! without deciding how to serve it fails to compile.

use indigo_protocol::ApiCommand;

use crate::context::AgentContext;
use crate::handlers::{ap, basic, sta};

use super::errors::HandlerError;
use super::reply::Reply;
use super::request::Request;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Signature shared by every command handler.
pub(crate) type Handler = fn(&Request<'_>, &mut AgentContext) -> Result<Reply, HandlerError>;

/// Returns the handler serving `command`, or `None` when it is unsupported.
pub(crate) fn handler_for(command: ApiCommand) -> Option<Handler> {
    let handler: Handler = match command {
        ApiCommand::StartUpAp => ap::start_up,
        ApiCommand::StopAp => ap::stop,
        ApiCommand::ConfigureAp => ap::configure,
        ApiCommand::TriggerApChannelSwitch => ap::trigger_channel_switch,
        ApiCommand::SendApDisconnect => ap::send_disconnect,
        ApiCommand::SetApParameter => ap::set_parameter,
        ApiCommand::SendApBtmRequest => ap::send_btm_request,
        ApiCommand::SendApArpMessages => ap::send_arp_messages,
        ApiCommand::AssociateSta => sta::associate,
        ApiCommand::ConfigureSta => sta::configure,
        ApiCommand::StopSta => sta::stop,
        ApiCommand::SendStaDisconnect => sta::send_disconnect,
        ApiCommand::SendStaReconnect => sta::send_reconnect,
        ApiCommand::SetStaParameter => sta::set_parameter,
        ApiCommand::SendStaBtmQuery => sta::send_btm_query,
        ApiCommand::SendStaAnqpQuery => sta::send_anqp_query,
        ApiCommand::StartUpSta => sta::start_up,
        ApiCommand::SetStaPhyMode => sta::set_phy_mode,
        ApiCommand::SetStaChannelWidth => sta::set_channel_width,
        ApiCommand::SetStaPowerSave => sta::set_power_save,
        ApiCommand::GetIpAddr => basic::get_ip_addr,
        ApiCommand::GetMacAddr => basic::get_mac_addr,
        ApiCommand::GetControlAppVersion => basic::get_control_app_version,
        ApiCommand::StartLoopback => basic::start_loopback,
        ApiCommand::StopLoopback => basic::stop_loopback,
        ApiCommand::AssignStaticIp => basic::assign_static_ip,
        ApiCommand::DeviceReset => basic::device_reset,
        ApiCommand::SendLoopbackData => basic::send_loopback_data,
        ApiCommand::CreateNewInterfaceBridgeNetwork => return None,
    };
    Some(handler)
}
