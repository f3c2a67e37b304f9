//! Station daemon configuration render.
//!
//! The render consumes the staged PHY mode and channel width from
//! [`PlatformState`]. Radio changes that cannot be expressed as directives are
//! returned as [`RadioAction`]s for the caller to apply.

use camino::Utf8PathBuf;
use indigo_protocol::{Tlv, TlvId};
use tracing::{debug, warn};

use super::tables::{global_sta_directive, network_directive};
use super::{CONFIGGEN_TARGET, ConfigText, GenerationError, control_interface_path, directive_value};
use crate::state::{ChannelWidth, PhyMode, PlatformState};

/// Radio change requested by a PHY mode that directives cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioAction {
    /// Turn off 802.11ax support in the driver.
    DisableAx,
    /// Reload the wireless driver with default capabilities.
    ReloadDriver,
}

/// Rendered station configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaConfig {
    text: String,
    control_interface: Utf8PathBuf,
    radio_actions: Vec<RadioAction>,
}

impl StaConfig {
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

    /// Driver changes implied by the consumed PHY mode.
    #[must_use]
    pub fn radio_actions(&self) -> &[RadioAction] {
        &self.radio_actions
    }
}

#[derive(Debug, Default)]
struct KeyManagement {
    transition: bool,
    sae_only: bool,
    owe: bool,
}

impl KeyManagement {
    fn observe(&mut self, value: &str) {
        let psk = value.contains("WPA-PSK");
        let sae = value.contains("SAE");
        self.transition |= psk && sae;
        self.sae_only |= sae && !psk;
        self.owe |= value.contains("OWE");
    }

    const fn derived_pmf(&self) -> Option<&'static str> {
        if self.transition {
            Some("1")
        } else if self.sae_only || self.owe {
            Some("2")
        } else {
            None
        }
    }
}

/// Renders a station configuration and consumes staged radio settings.
///
/// # Errors
///
/// Returns [`GenerationError::MissingControlInterface`] before touching any
/// state when no control interface field is present, or a value error when a
/// known field cannot be written as a single line. Staged settings are only
/// consumed by a successful render.
pub fn generate_sta_config(
    tlvs: &[Tlv],
    state: &mut PlatformState,
) -> Result<StaConfig, GenerationError> {
    let Some(control) = tlvs.iter().find(|tlv| tlv.id() == TlvId::CONTROL_INTERFACE) else {
        warn!(
            target: CONFIGGEN_TARGET,
            "station configuration has no control interface"
        );
        return Err(GenerationError::MissingControlInterface);
    };
    let control_interface = control_interface_path(directive_value(control)?);

    let mut output = ConfigText::default();
    output.directive("ap_scan", "1");
    output.directive("pmf", "1");

    for tlv in tlvs {
        if let Some(directive) = global_sta_directive(tlv.id()) {
            output.directive(directive.name, directive_value(tlv)?);
        }
    }

    output.raw("network={");
    let mut key_management = KeyManagement::default();
    let mut explicit_pmf = false;
    for tlv in tlvs {
        if global_sta_directive(tlv.id()).is_some() {
            continue;
        }
        let Some(directive) = network_directive(tlv.id()) else {
            warn!(
                target: CONFIGGEN_TARGET,
                id = %tlv.id(),
                "unknown station configuration field"
            );
            continue;
        };
        let value = directive_value(tlv)?;
        if tlv.id() == TlvId::IEEE80211_W || tlv.id() == TlvId::STA_IEEE80211_W {
            explicit_pmf = true;
        }
        if tlv.id() == TlvId::KEY_MGMT {
            key_management.observe(value);
        }
        if directive.quoted {
            output.quoted_directive(directive.name, value);
        } else {
            output.directive(directive.name, value);
        }
    }

    if !explicit_pmf && let Some(pmf) = key_management.derived_pmf() {
        output.directive("ieee80211w", pmf);
    }

    let radio_actions = apply_staged_radio(&mut output, state);
    output.raw("}");

    let text = output.finish();
    debug!(
        target: CONFIGGEN_TARGET,
        bytes = text.len(),
        %control_interface,
        "rendered station configuration"
    );
    Ok(StaConfig {
        text,
        control_interface,
        radio_actions,
    })
}

fn apply_staged_radio(output: &mut ConfigText, state: &mut PlatformState) -> Vec<RadioAction> {
    let Some(mode) = state.take_phy_mode() else {
        return Vec::new();
    };
    let (directives, actions) = phy_mode_effects(mode);
    for line in directives {
        output.raw(line);
    }

    let width = state.take_channel_width();
    if width == Some(ChannelWidth::Mhz20) && matches!(mode, PhyMode::Bgn | PhyMode::Na) {
        output.raw("disable_ht40=1");
    }
    actions.to_vec()
}

const fn phy_mode_effects(mode: PhyMode) -> (&'static [&'static str], &'static [RadioAction]) {
    match mode {
        PhyMode::Auto | PhyMode::B => (&[], &[]),
        PhyMode::Bgn | PhyMode::Ac => (&[], &[RadioAction::DisableAx]),
        PhyMode::Bg | PhyMode::A => (&["disable_ht=1"], &[RadioAction::DisableAx]),
        PhyMode::Na => (&["disable_vht=1"], &[RadioAction::DisableAx]),
        PhyMode::AxG | PhyMode::AxA => (&[], &[RadioAction::ReloadDriver]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn field(id: TlvId, value: &str) -> Tlv {
        Tlv::new(id, value.as_bytes())
    }

    #[fixture]
    fn state() -> PlatformState {
        PlatformState::default()
    }

    fn base_fields(key_mgmt: &str) -> Vec<Tlv> {
        vec![
            field(TlvId::CONTROL_INTERFACE, "/var/run/wpa_supplicant"),
            field(TlvId::SSID, "Indigo"),
            field(TlvId::KEY_MGMT, key_mgmt),
        ]
    }

    #[rstest]
    fn renders_global_then_network_block(mut state: PlatformState) {
        let tlvs = vec![
            field(TlvId::SSID, "Indigo"),
            field(TlvId::CONTROL_INTERFACE, "/var/run/wpa_supplicant"),
            field(TlvId::SAE_PWE, "2"),
            field(TlvId::PSK, "12345678"),
        ];
        let config = generate_sta_config(&tlvs, &mut state).expect("render");
        assert_eq!(
            config.text(),
            "ap_scan=1\npmf=1\nctrl_interface=/var/run/wpa_supplicant\nsae_pwe=2\n\
             network={\nssid=\"Indigo\"\npsk=\"12345678\"\n}\n"
        );
        assert_eq!(config.control_interface().as_str(), "/var/run/wpa_supplicant");
    }

    #[rstest]
    #[case("WPA-PSK SAE", Some("ieee80211w=1"))]
    #[case("SAE", Some("ieee80211w=2"))]
    #[case("OWE", Some("ieee80211w=2"))]
    #[case("WPA-PSK", None)]
    fn security_mode_derives_protected_frames(
        mut state: PlatformState,
        #[case] key_mgmt: &str,
        #[case] expected: Option<&str>,
    ) {
        let config = generate_sta_config(&base_fields(key_mgmt), &mut state).expect("render");
        let derived = config.text().lines().find(|line| line.starts_with("ieee80211w="));
        assert_eq!(derived, expected);
    }

    #[rstest]
    fn explicit_protected_frames_suppresses_derivation(mut state: PlatformState) {
        let mut tlvs = base_fields("SAE");
        tlvs.push(field(TlvId::STA_IEEE80211_W, "1"));
        let config = generate_sta_config(&tlvs, &mut state).expect("render");
        let lines: Vec<_> = config
            .text()
            .lines()
            .filter(|line| line.starts_with("ieee80211w="))
            .collect();
        assert_eq!(lines, vec!["ieee80211w=1"]);
    }

    #[rstest]
    fn missing_control_interface_leaves_state_untouched(mut state: PlatformState) {
        state.set_pending_phy_mode(PhyMode::Na);
        let tlvs = [field(TlvId::SSID, "Indigo")];
        assert_eq!(
            generate_sta_config(&tlvs, &mut state),
            Err(GenerationError::MissingControlInterface)
        );
        assert_eq!(state.phy_mode().pending(), Some(PhyMode::Na));
    }

    #[rstest]
    fn staged_phy_and_width_apply_once(mut state: PlatformState) {
        state.set_pending_phy_mode(PhyMode::Na);
        state.set_pending_channel_width(ChannelWidth::Mhz20);
        let tlvs = base_fields("WPA-PSK");

        let first = generate_sta_config(&tlvs, &mut state).expect("first render");
        assert!(first.text().contains("disable_vht=1\n"));
        assert!(first.text().contains("disable_ht40=1\n"));
        assert_eq!(first.radio_actions(), &[RadioAction::DisableAx]);

        let second = generate_sta_config(&tlvs, &mut state).expect("second render");
        assert!(!second.text().contains("disable_vht=1"));
        assert!(!second.text().contains("disable_ht40=1"));
        assert!(second.radio_actions().is_empty());
    }

    #[rstest]
    #[case(PhyMode::Bg, Some("disable_ht=1"), &[RadioAction::DisableAx])]
    #[case(PhyMode::A, Some("disable_ht=1"), &[RadioAction::DisableAx])]
    #[case(PhyMode::Bgn, None, &[RadioAction::DisableAx])]
    #[case(PhyMode::Ac, None, &[RadioAction::DisableAx])]
    #[case(PhyMode::AxG, None, &[RadioAction::ReloadDriver])]
    #[case(PhyMode::B, None, &[])]
    fn phy_modes_map_to_effects(
        mut state: PlatformState,
        #[case] mode: PhyMode,
        #[case] directive: Option<&str>,
        #[case] actions: &[RadioAction],
    ) {
        state.set_pending_phy_mode(mode);
        let config = generate_sta_config(&base_fields("WPA-PSK"), &mut state).expect("render");
        if let Some(line) = directive {
            assert!(config.text().contains(line));
        }
        assert!(!config.text().contains("disable_ht40"));
        assert_eq!(config.radio_actions(), actions);
    }

    #[rstest]
    fn width_without_matching_mode_is_still_consumed(mut state: PlatformState) {
        state.set_pending_phy_mode(PhyMode::Ac);
        state.set_pending_channel_width(ChannelWidth::Mhz20);
        let config = generate_sta_config(&base_fields("WPA-PSK"), &mut state).expect("render");
        assert!(!config.text().contains("disable_ht40"));
        assert_eq!(state.channel_width().pending(), None);
        assert_eq!(state.last_channel_width(), Some(ChannelWidth::Mhz20));
    }

    #[rstest]
    fn width_waits_for_a_phy_mode(mut state: PlatformState) {
        state.set_pending_channel_width(ChannelWidth::Mhz40);
        generate_sta_config(&base_fields("WPA-PSK"), &mut state).expect("render");
        assert_eq!(state.channel_width().pending(), Some(ChannelWidth::Mhz40));
    }

    #[rstest]
    fn identical_inputs_render_identically(mut state: PlatformState) {
        let mut other = state.clone();
        state.set_pending_phy_mode(PhyMode::Bgn);
        other.set_pending_phy_mode(PhyMode::Bgn);
        let tlvs = base_fields("WPA-PSK SAE");
        assert_eq!(
            generate_sta_config(&tlvs, &mut state),
            generate_sta_config(&tlvs, &mut other)
        );
        assert_eq!(state, other);
    }

    #[rstest]
    fn unknown_fields_do_not_abort(mut state: PlatformState) {
        let mut tlvs = base_fields("WPA-PSK");
        tlvs.push(field(TlvId::new(0xffff), "extra"));
        let config = generate_sta_config(&tlvs, &mut state).expect("render");
        assert!(!config.text().contains("extra"));
    }
}
