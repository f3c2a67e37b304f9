//! Error types for request dispatch and command handling.
//!
//! Nothing here escapes the dispatcher. Every variant is turned into a NOT_OK
//! reply so the controller always receives a well-formed response.

use indigo_protocol::{ApiCommand, DecodeError, TlvId, ValueError};
use thiserror::Error;

use crate::platform::PlatformError;

use super::reply::Reply;

/// Message for requests lacking a mandatory field.
pub const INSUFFICIENT_TLV: &str = "Insufficient TLV";
/// Message for fields whose value cannot be used.
pub const INVALID_TLV: &str = "Invalid TLV value";
/// Message for datagrams that do not decode.
pub const MALFORMED_REQUEST: &str = "Malformed request";
/// Message for command codes without a handler.
pub const UNSUPPORTED_COMMAND: &str = "Unsupported command";

/// Failures raised inside a command handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A mandatory field is absent.
    #[error("missing field {id}")]
    MissingField {
        /// Expected field.
        id: TlvId,
    },
    /// A field is oversize or not text.
    #[error("field {id} is unreadable: {source}")]
    UnreadableField {
        /// Offending field.
        id: TlvId,
        /// Why it was rejected.
        #[source]
        source: ValueError,
    },
    /// A field is text but not an accepted value.
    #[error("field {id} has invalid value {value:?}")]
    InvalidValue {
        /// Offending field.
        id: TlvId,
        /// Value as received.
        value: String,
    },
    /// The platform could not carry out the action.
    #[error("{failure}: {source}")]
    Platform {
        /// Reply message for the controller.
        failure: &'static str,
        /// Underlying platform error.
        #[source]
        source: PlatformError,
    },
}

impl HandlerError {
    /// Creates a missing field error.
    pub const fn missing(id: TlvId) -> Self {
        Self::MissingField { id }
    }

    /// Creates an invalid value error.
    pub fn invalid(id: TlvId, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            id,
            value: value.into(),
        }
    }

    /// Converts the error into the reply sent to the controller.
    #[must_use]
    pub fn into_reply(self) -> Reply {
        match self {
            Self::MissingField { .. } => Reply::not_ok(INSUFFICIENT_TLV),
            Self::UnreadableField { .. } | Self::InvalidValue { .. } => Reply::not_ok(INVALID_TLV),
            Self::Platform { failure, .. } => Reply::not_ok(failure),
        }
    }
}

/// Attaches a controller-facing failure message to platform results.
pub trait PlatformResultExt<T> {
    /// Maps a platform error to [`HandlerError::Platform`] with `failure`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when `self` is an error.
    fn or_fail(self, failure: &'static str) -> Result<T, HandlerError>;
}

impl<T> PlatformResultExt<T> for Result<T, PlatformError> {
    fn or_fail(self, failure: &'static str) -> Result<T, HandlerError> {
        self.map_err(|source| HandlerError::Platform { failure, source })
    }
}

/// Failures detected before a handler runs.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The datagram did not decode.
    #[error("malformed request: {source}")]
    Malformed {
        /// Decoder error.
        #[source]
        source: DecodeError,
    },
    /// The command code is not known.
    #[error("unknown command code 0x{code:04x}")]
    UnknownCommand {
        /// Raw command code.
        code: u16,
    },
    /// The command is known but has no handler.
    #[error("command {} is not supported", command.name())]
    Unsupported {
        /// Known command without a handler.
        command: ApiCommand,
    },
}

impl DispatchError {
    /// Creates an unknown command error.
    pub const fn unknown_command(code: u16) -> Self {
        Self::UnknownCommand { code }
    }

    /// Creates an unsupported command error.
    pub const fn unsupported(command: ApiCommand) -> Self {
        Self::Unsupported { command }
    }

    /// Converts the error into the reply sent to the controller.
    #[must_use]
    pub fn into_reply(self) -> Reply {
        match self {
            Self::Malformed { .. } => Reply::not_ok(MALFORMED_REQUEST),
            Self::UnknownCommand { .. } | Self::Unsupported { .. } => {
                Reply::not_ok(UNSUPPORTED_COMMAND)
            }
        }
    }
}

impl From<DecodeError> for DispatchError {
    fn from(source: DecodeError) -> Self {
        Self::Malformed { source }
    }
}
