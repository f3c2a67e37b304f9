//! Access-point daemon configuration render.

use camino::Utf8PathBuf;
use indigo_protocol::{Tlv, TlvId};
use tracing::{debug, warn};

use super::tables::{MU_EDCA_PARAMETERS, network_directive};
use super::{CONFIGGEN_TARGET, ConfigText, GenerationError, control_interface_path, directive_value};

/// Rendered access-point configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApConfig {
    text: String,
    control_interface: Utf8PathBuf,
}

impl ApConfig {
    /// Configuration file contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Control socket directory announced by the request.
    #[must_use]
    pub fn control_interface(&self) -> &Utf8PathBuf {
        &self.control_interface
    }
}

/// Renders an access-point configuration for `interface`.
///
/// # Errors
///
/// Returns [`GenerationError::MissingControlInterface`] when no control
/// interface field is present, or a value error for a known field whose value
/// cannot be written as a single line.
pub fn generate_ap_config(tlvs: &[Tlv], interface: &str) -> Result<ApConfig, GenerationError> {
    let mut output = ConfigText::default();
    output.directive("ctrl_interface_group", "0");
    output.directive("interface", interface);

    let mut control_interface = None;
    for tlv in tlvs {
        let Some(directive) = network_directive(tlv.id()) else {
            warn!(
                target: CONFIGGEN_TARGET,
                id = %tlv.id(),
                "unknown access point configuration field"
            );
            continue;
        };
        let value = directive_value(tlv)?;
        output.directive(directive.name, value);

        if tlv.id() == TlvId::CONTROL_INTERFACE {
            control_interface = Some(control_interface_path(value));
        }
        if tlv.id() == TlvId::HE_MU_EDCA {
            for line in MU_EDCA_PARAMETERS {
                output.raw(line);
            }
        }
    }

    let Some(control_interface) = control_interface else {
        warn!(
            target: CONFIGGEN_TARGET,
            "access point configuration has no control interface"
        );
        return Err(GenerationError::MissingControlInterface);
    };
    let text = output.finish();
    debug!(
        target: CONFIGGEN_TARGET,
        bytes = text.len(),
        %control_interface,
        "rendered access point configuration"
    );
    Ok(ApConfig {
        text,
        control_interface,
    })
}
