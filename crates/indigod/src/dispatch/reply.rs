//! Handler results and their encoding into response packets.

use std::borrow::Cow;

use indigo_protocol::{ACK_COMMAND, PacketBuilder, Status, TlvId};
use tracing::warn;

use super::router::DISPATCH_TARGET;

/// Message carried by every acknowledgement.
pub const ACK_MESSAGE: &str = "ACK: Command received";

/// Outcome of one command: status, message and any extra fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    status: Status,
    message: Cow<'static, str>,
    fields: Vec<(TlvId, String)>,
}

impl Reply {
    /// Successful reply.
    #[must_use]
    pub fn ok(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_status(Status::Ok, message)
    }

    /// Failed reply.
    #[must_use]
    pub fn not_ok(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_status(Status::NotOk, message)
    }

    /// Reply with an explicit status.
    #[must_use]
    pub fn with_status(status: Status, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Appends an extra text field.
    #[must_use]
    pub fn with_field(mut self, id: TlvId, value: impl Into<String>) -> Self {
        self.fields.push((id, value.into()));
        self
    }

    /// Reply status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// First extra field carrying `id`.
    #[must_use]
    pub fn field(&self, id: TlvId) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field_id, _)| *field_id == id)
            .map(|(_, value)| value.as_str())
    }

    /// Builds the response packet echoing `sequence`.
    #[must_use]
    pub fn into_packet(self, sequence: u16) -> PacketBuilder {
        let mut builder = PacketBuilder::new_response(sequence);
        self.write_fields(&mut builder);
        builder
    }

    fn write_fields(&self, builder: &mut PacketBuilder) {
        builder.append_byte(TlvId::STATUS, self.status.as_byte());
        append_text(builder, TlvId::MESSAGE, &self.message);
        for (id, value) in &self.fields {
            append_text(builder, *id, value);
        }
    }
}

/// Builds the acknowledgement sent before a response.
#[must_use]
pub fn acknowledgement(sequence: u16) -> PacketBuilder {
    let mut builder = PacketBuilder::new(ACK_COMMAND, sequence);
    Reply::ok(ACK_MESSAGE).write_fields(&mut builder);
    builder
}

fn append_text(builder: &mut PacketBuilder, id: TlvId, value: &str) {
    if let Err(error) = builder.append_bytes(id, value) {
        warn!(target: DISPATCH_TARGET, %error, "dropping oversize response field");
    }
}
