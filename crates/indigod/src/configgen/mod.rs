//! Renders request fields into daemon configuration text.
//!
//! Both renders walk the request TLVs in arrival order and translate each
//! known id through a static directive table. Unknown ids are logged and
//! skipped so newer controllers can send fields this agent does not know.
//! Every value is read as bounded UTF-8 text and rejected when it would break
//! the line-oriented output, so a render either succeeds completely or leaves
//! nothing to write.

mod ap;
mod sta;
mod tables;

use camino::Utf8PathBuf;
use indigo_protocol::{Tlv, TlvId, ValueError};
use thiserror::Error;

pub use self::ap::{ApConfig, generate_ap_config};
pub use self::sta::{RadioAction, StaConfig, generate_sta_config};
pub(crate) use self::tables::network_directive;

const CONFIGGEN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::configgen");

/// Reasons a configuration render produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request carried no control interface path.
    #[error("no control interface field in the request")]
    MissingControlInterface,
    /// A field value was oversize or not text.
    #[error("field {id} has an unusable value: {source}")]
    InvalidValue {
        /// Offending field.
        id: TlvId,
        /// Why the value was rejected.
        #[source]
        source: ValueError,
    },
    /// A field value contains a line break or other control character.
    #[error("field {id} contains control characters")]
    ControlCharacters {
        /// Offending field.
        id: TlvId,
    },
}

/// Reads a TLV value that will be written into a configuration line.
pub(crate) fn directive_value(tlv: &Tlv) -> Result<&str, GenerationError> {
    let value = tlv.text().map_err(|source| GenerationError::InvalidValue {
        id: tlv.id(),
        source,
    })?;
    if value.chars().any(char::is_control) {
        return Err(GenerationError::ControlCharacters { id: tlv.id() });
    }
    Ok(value)
}

/// Line-oriented `key=value` output buffer.
#[derive(Debug, Default)]
struct ConfigText {
    text: String,
}

impl ConfigText {
    fn raw(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn directive(&mut self, key: &str, value: &str) {
        self.text.push_str(key);
        self.text.push('=');
        self.text.push_str(value);
        self.text.push('\n');
    }

    fn quoted_directive(&mut self, key: &str, value: &str) {
        self.text.push_str(key);
        self.text.push_str("=\"");
        self.text.push_str(value);
        self.text.push_str("\"\n");
    }

    fn finish(self) -> String {
        self.text
    }
}

fn control_interface_path(value: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(value)
}
