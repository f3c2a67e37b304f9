//! Command handlers.
//!
//! Each handler reads its fields through [`Request`], touches the host only
//! through [`crate::platform::Platform`] and returns a [`Reply`]. Handlers
//! never build packets themselves.

pub(crate) mod ap;
pub(crate) mod basic;
pub(crate) mod sta;

use camino::Utf8Path;
use indigo_protocol::TlvId;
use tracing::debug;

use crate::context::AgentContext;
use crate::dispatch::{DISPATCH_TARGET, HandlerError, PlatformResultExt, Reply, Request};
use crate::state::DebugLevel;

/// Reads an optional debug level field.
fn debug_level(request: &Request<'_>) -> Result<Option<DebugLevel>, HandlerError> {
    Ok(request
        .non_empty_text(TlvId::DEBUG_LEVEL)?
        .map(DebugLevel::from_text))
}

/// Reads a field that is interpolated into a daemon control command.
///
/// Control commands are whitespace separated, so values carrying whitespace
/// or control characters would smuggle extra arguments.
fn control_argument<'a>(request: &Request<'a>, id: TlvId) -> Result<&'a str, HandlerError> {
    let value = request.required_text(id)?;
    check_argument(id, value)
}

fn optional_control_argument<'a>(
    request: &Request<'a>,
    id: TlvId,
) -> Result<Option<&'a str>, HandlerError> {
    request
        .non_empty_text(id)?
        .map(|value| check_argument(id, value))
        .transpose()
}

fn check_argument(id: TlvId, value: &str) -> Result<&str, HandlerError> {
    let value = value.trim();
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(HandlerError::invalid(id, value));
    }
    Ok(value)
}

/// Sends a control command and maps the daemon's `OK`/`FAIL` answer.
fn control_command(
    ctx: &AgentContext,
    socket: &Utf8Path,
    command: &str,
    success: &'static str,
    failure: &'static str,
) -> Result<Reply, HandlerError> {
    let answer = ctx
        .platform()
        .control_request(socket, command)
        .or_fail(failure)?;
    if answer.trim_start().starts_with("OK") {
        Ok(Reply::ok(success))
    } else {
        debug!(
            target: DISPATCH_TARGET,
            %socket,
            command,
            answer = answer.trim(),
            "daemon refused control command"
        );
        Ok(Reply::not_ok(failure))
    }
}

/// True when a flag field carries `1`.
fn flag_set(request: &Request<'_>, id: TlvId) -> Result<bool, HandlerError> {
    Ok(request
        .optional_text(id)?
        .is_some_and(|value| value.trim() == "1"))
}
