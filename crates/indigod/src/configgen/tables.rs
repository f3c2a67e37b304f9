//! Static TLV to directive name tables.

use indigo_protocol::TlvId;

/// Maps a request field onto a daemon configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Directive {
    pub(crate) id: TlvId,
    pub(crate) name: &'static str,
    pub(crate) quoted: bool,
}

impl Directive {
    const fn plain(id: TlvId, name: &'static str) -> Self {
        Self {
            id,
            name,
            quoted: false,
        }
    }

    const fn quoted(id: TlvId, name: &'static str) -> Self {
        Self {
            id,
            name,
            quoted: true,
        }
    }
}

/// Per-network directives shared by the access-point and station renders.
pub(crate) const NETWORK_DIRECTIVES: &[Directive] = &[
    Directive::quoted(TlvId::SSID, "ssid"),
    Directive::plain(TlvId::CHANNEL, "channel"),
    Directive::plain(TlvId::WEP_KEY0, "wep_key0"),
    Directive::plain(TlvId::AUTH_ALGORITHM, "auth_algs"),
    Directive::plain(TlvId::WEP_DEFAULT_KEY, "wep_default_key"),
    Directive::plain(TlvId::IEEE80211_D, "ieee80211d"),
    Directive::plain(TlvId::IEEE80211_N, "ieee80211n"),
    Directive::plain(TlvId::IEEE80211_AC, "ieee80211ac"),
    Directive::plain(TlvId::COUNTRY_CODE, "country_code"),
    Directive::plain(TlvId::WMM_ENABLED, "wmm_enabled"),
    Directive::plain(TlvId::WPA, "wpa"),
    Directive::plain(TlvId::WPA_KEY_MGMT, "wpa_key_mgmt"),
    Directive::plain(TlvId::RSN_PAIRWISE, "rsn_pairwise"),
    Directive::plain(TlvId::WPA_PASSPHRASE, "wpa_passphrase"),
    Directive::plain(TlvId::WPA_PAIRWISE, "wpa_pairwise"),
    Directive::plain(TlvId::HT_CAPAB, "ht_capab"),
    Directive::plain(TlvId::IEEE80211_W, "ieee80211w"),
    Directive::plain(TlvId::IEEE80211_H, "ieee80211h"),
    Directive::plain(TlvId::VHT_OPER_CHWIDTH, "vht_oper_chwidth"),
    Directive::plain(TlvId::VHT_CAPAB, "vht_capab"),
    Directive::plain(TlvId::IEEE8021_X, "ieee8021x"),
    Directive::plain(TlvId::EAP_SERVER, "eap_server"),
    Directive::plain(TlvId::AUTH_SERVER_ADDR, "auth_server_addr"),
    Directive::plain(TlvId::AUTH_SERVER_PORT, "auth_server_port"),
    Directive::plain(TlvId::AUTH_SERVER_SHARED_SECRET, "auth_server_shared_secret"),
    Directive::plain(TlvId::HW_MODE, "hw_mode"),
    Directive::plain(TlvId::VHT_OPER_CENTR_FREQ, "vht_oper_centr_freq_seg0_idx"),
    Directive::plain(TlvId::IE_OVERRIDE, "own_ie_override"),
    Directive::plain(TlvId::MBO, "mbo"),
    Directive::plain(TlvId::MBO_CELL_DATA_CONN_PREF, "mbo_cell_data_conn_pref"),
    Directive::plain(TlvId::MBO_ASSOC_DISALLOW, "mbo_assoc_disallow"),
    Directive::plain(TlvId::GAS_COMEBACK_DELAY, "gas_comeback_delay"),
    Directive::plain(TlvId::BSS_TRANSITION, "bss_transition"),
    Directive::plain(TlvId::INTERWORKING, "interworking"),
    Directive::plain(TlvId::RRM_NEIGHBOR_REPORT, "rrm_neighbor_report"),
    Directive::plain(TlvId::MBO_IGNORE_ASSOC_DISALLOW, "ignore_assoc_disallow"),
    Directive::plain(TlvId::SAE_GROUPS, "sae_groups"),
    Directive::plain(TlvId::IEEE80211_AX, "ieee80211ax"),
    Directive::plain(TlvId::HE_OPER_CHWIDTH, "he_oper_chwidth"),
    Directive::plain(TlvId::HE_OPER_CENTR_FREQ, "he_oper_centr_freq_seg0_idx"),
    Directive::plain(TlvId::HE_MU_EDCA, "he_mu_edca_qos_info_param_count"),
    Directive::plain(TlvId::CONTROL_INTERFACE, "ctrl_interface"),
    Directive::plain(TlvId::KEY_MGMT, "key_mgmt"),
    Directive::plain(TlvId::PROTO, "proto"),
    Directive::plain(TlvId::PAIRWISE, "pairwise"),
    Directive::quoted(TlvId::PSK, "psk"),
    Directive::plain(TlvId::STA_IEEE80211_W, "ieee80211w"),
    Directive::plain(TlvId::EAP, "eap"),
    Directive::quoted(TlvId::IDENTITY, "identity"),
    Directive::quoted(TlvId::PASSWORD, "password"),
    Directive::quoted(TlvId::CA_CERT, "ca_cert"),
    Directive::quoted(TlvId::PHASE2, "phase2"),
    Directive::plain(TlvId::SAE_PWE, "sae_pwe"),
    Directive::plain(TlvId::OWE_GROUP, "owe_group"),
];

/// Station directives written once, ahead of the network block.
pub(crate) const GLOBAL_STA_DIRECTIVES: &[Directive] = &[
    Directive::plain(TlvId::CONTROL_INTERFACE, "ctrl_interface"),
    Directive::plain(TlvId::SAE_PWE, "sae_pwe"),
    Directive::plain(TlvId::STA_SAE_GROUPS, "sae_groups"),
    Directive::plain(TlvId::MBO_CELL_CAPA, "mbo_cell_capa"),
];

/// Fixed HE MU EDCA parameter block emitted after the marker directive.
pub(crate) const MU_EDCA_PARAMETERS: [&str; 19] = [
    "he_mu_edca_ac_be_aifsn=0",
    "he_mu_edca_ac_be_ecwmin=15",
    "he_mu_edca_ac_be_ecwmax=15",
    "he_mu_edca_ac_be_timer=255",
    "he_mu_edca_ac_bk_aifsn=0",
    "he_mu_edca_ac_bk_aci=1",
    "he_mu_edca_ac_bk_ecwmin=15",
    "he_mu_edca_ac_bk_ecwmax=15",
    "he_mu_edca_ac_bk_timer=255",
    "he_mu_edca_ac_vi_aifsn=0",
    "he_mu_edca_ac_vi_aci=2",
    "he_mu_edca_ac_vi_ecwmin=15",
    "he_mu_edca_ac_vi_ecwmax=15",
    "he_mu_edca_ac_vi_timer=255",
    "he_mu_edca_ac_vo_aifsn=0",
    "he_mu_edca_ac_vo_aci=3",
    "he_mu_edca_ac_vo_ecwmin=15",
    "he_mu_edca_ac_vo_ecwmax=15",
    "he_mu_edca_ac_vo_timer=255",
];

pub(crate) fn network_directive(id: TlvId) -> Option<&'static Directive> {
    NETWORK_DIRECTIVES.iter().find(|directive| directive.id == id)
}

pub(crate) fn global_sta_directive(id: TlvId) -> Option<&'static Directive> {
    GLOBAL_STA_DIRECTIVES
        .iter()
        .find(|directive| directive.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn network_table_has_unique_ids() {
        let ids: HashSet<_> = NETWORK_DIRECTIVES.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), NETWORK_DIRECTIVES.len());
    }

    #[test]
    fn lookups_resolve_known_ids() {
        let ssid = network_directive(TlvId::SSID).expect("ssid directive");
        assert_eq!(ssid.name, "ssid");
        assert!(ssid.quoted);
        assert!(network_directive(TlvId::new(0xffff)).is_none());
        assert!(global_sta_directive(TlvId::MBO_CELL_CAPA).is_some());
        assert!(global_sta_directive(TlvId::SSID).is_none());
    }
}
