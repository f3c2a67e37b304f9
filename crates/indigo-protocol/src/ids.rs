//! Well-known TLV identifiers.
//!
//! Request fields sit in the low range; response fields start at `0xA000`.
//! Identifiers outside this list still decode and are carried untouched.

use crate::tlv::TlvId;

impl TlvId {
    // Directive fields rendered into daemon configuration files.

    /// Network SSID.
    pub const SSID: Self = Self::new(0x0001);
    /// Operating channel.
    pub const CHANNEL: Self = Self::new(0x0002);
    /// First WEP key.
    pub const WEP_KEY0: Self = Self::new(0x0003);
    /// Authentication algorithm bitmap.
    pub const AUTH_ALGORITHM: Self = Self::new(0x0004);
    /// Default WEP key index.
    pub const WEP_DEFAULT_KEY: Self = Self::new(0x0005);
    /// 802.11d country information.
    pub const IEEE80211_D: Self = Self::new(0x0006);
    /// 802.11n support.
    pub const IEEE80211_N: Self = Self::new(0x0007);
    /// 802.11ac support.
    pub const IEEE80211_AC: Self = Self::new(0x0008);
    /// Regulatory country code.
    pub const COUNTRY_CODE: Self = Self::new(0x0009);
    /// WMM support.
    pub const WMM_ENABLED: Self = Self::new(0x000A);
    /// WPA version bitmap.
    pub const WPA: Self = Self::new(0x000B);
    /// AP key management suites.
    pub const WPA_KEY_MGMT: Self = Self::new(0x000C);
    /// RSN pairwise ciphers.
    pub const RSN_PAIRWISE: Self = Self::new(0x000D);
    /// WPA passphrase.
    pub const WPA_PASSPHRASE: Self = Self::new(0x000E);
    /// WPA pairwise ciphers.
    pub const WPA_PAIRWISE: Self = Self::new(0x000F);
    /// HT capabilities.
    pub const HT_CAPAB: Self = Self::new(0x0010);
    /// AP protected management frames.
    pub const IEEE80211_W: Self = Self::new(0x0011);
    /// 802.11h spectrum management.
    pub const IEEE80211_H: Self = Self::new(0x0012);
    /// VHT operating channel width.
    pub const VHT_OPER_CHWIDTH: Self = Self::new(0x0013);
    /// VHT capabilities.
    pub const VHT_CAPAB: Self = Self::new(0x0014);
    /// 802.1X authentication.
    pub const IEEE8021_X: Self = Self::new(0x0015);
    /// Integrated EAP server.
    pub const EAP_SERVER: Self = Self::new(0x0016);
    /// RADIUS server address.
    pub const AUTH_SERVER_ADDR: Self = Self::new(0x0017);
    /// RADIUS server port.
    pub const AUTH_SERVER_PORT: Self = Self::new(0x0018);
    /// RADIUS shared secret.
    pub const AUTH_SERVER_SHARED_SECRET: Self = Self::new(0x0019);
    /// Hardware mode, such as `a` or `g`.
    pub const HW_MODE: Self = Self::new(0x001D);
    /// VHT centre frequency segment 0 index.
    pub const VHT_OPER_CENTR_FREQ: Self = Self::new(0x001E);
    /// Raw information element override.
    pub const IE_OVERRIDE: Self = Self::new(0x0022);
    /// MBO support.
    pub const MBO: Self = Self::new(0x0023);
    /// MBO cellular data connection preference.
    pub const MBO_CELL_DATA_CONN_PREF: Self = Self::new(0x0024);
    /// MBO association disallowed reason.
    pub const MBO_ASSOC_DISALLOW: Self = Self::new(0x0025);
    /// GAS comeback delay.
    pub const GAS_COMEBACK_DELAY: Self = Self::new(0x0026);
    /// BSS transition management support.
    pub const BSS_TRANSITION: Self = Self::new(0x0027);
    /// Interworking support.
    pub const INTERWORKING: Self = Self::new(0x0028);
    /// RRM neighbour report support.
    pub const RRM_NEIGHBOR_REPORT: Self = Self::new(0x0029);
    /// Station ignores MBO association disallowed.
    pub const MBO_IGNORE_ASSOC_DISALLOW: Self = Self::new(0x002A);
    /// AP SAE groups.
    pub const SAE_GROUPS: Self = Self::new(0x002B);
    /// 802.11ax support.
    pub const IEEE80211_AX: Self = Self::new(0x002C);
    /// HE operating channel width.
    pub const HE_OPER_CHWIDTH: Self = Self::new(0x002D);
    /// HE centre frequency segment 0 index.
    pub const HE_OPER_CENTR_FREQ: Self = Self::new(0x002E);
    /// MU EDCA parameter marker; expands to the fixed MU EDCA block.
    pub const HE_MU_EDCA: Self = Self::new(0x002F);
    /// Control interface path of the daemon being configured.
    pub const CONTROL_INTERFACE: Self = Self::new(0x0030);
    /// Station key management suites.
    pub const KEY_MGMT: Self = Self::new(0x0031);
    /// Station protocol list.
    pub const PROTO: Self = Self::new(0x0032);
    /// Station pairwise ciphers.
    pub const PAIRWISE: Self = Self::new(0x0033);
    /// Station pre-shared key.
    pub const PSK: Self = Self::new(0x0034);
    /// Station protected management frames.
    pub const STA_IEEE80211_W: Self = Self::new(0x0035);
    /// EAP method.
    pub const EAP: Self = Self::new(0x0036);
    /// EAP identity.
    pub const IDENTITY: Self = Self::new(0x0037);
    /// EAP password.
    pub const PASSWORD: Self = Self::new(0x0038);
    /// CA certificate path.
    pub const CA_CERT: Self = Self::new(0x0039);
    /// EAP phase 2 parameters.
    pub const PHASE2: Self = Self::new(0x003A);
    /// SAE password element derivation.
    pub const SAE_PWE: Self = Self::new(0x003B);
    /// OWE group.
    pub const OWE_GROUP: Self = Self::new(0x003C);
    /// Station SAE groups.
    pub const STA_SAE_GROUPS: Self = Self::new(0x003D);
    /// Station MBO cellular capability.
    pub const MBO_CELL_CAPA: Self = Self::new(0x003E);

    // Operational request fields.

    /// Device role for reset: `1` station, `2` access point.
    pub const ROLE: Self = Self::new(0x0040);
    /// Daemon debug verbosity.
    pub const DEBUG_LEVEL: Self = Self::new(0x0041);
    /// Reset clear flag.
    pub const CLEAR: Self = Self::new(0x0042);
    /// Global control interface for the access point daemon.
    pub const GLOBAL_CTRL_IFACE: Self = Self::new(0x0043);
    /// Static IPv4 address for the wireless interface.
    pub const STATIC_IP: Self = Self::new(0x0044);
    /// Test tool IP address.
    pub const TOOL_IP_ADDRESS: Self = Self::new(0x0045);
    /// Test tool UDP port.
    pub const TOOL_UDP_PORT: Self = Self::new(0x0046);
    /// Device-under-test IP address.
    pub const DUT_IP_ADDRESS: Self = Self::new(0x0047);
    /// Device-under-test UDP port.
    pub const DUT_UDP_PORT: Self = Self::new(0x0048);
    /// Loopback packets per second.
    pub const UDP_PACKET_RATE: Self = Self::new(0x0049);
    /// Loopback packet count.
    pub const PACKET_COUNT: Self = Self::new(0x004A);
    /// Loopback packet size.
    pub const UDP_PACKET_SIZE: Self = Self::new(0x004B);
    /// ARP probe target.
    pub const ARP_TARGET_IP: Self = Self::new(0x004C);
    /// ARP probe count.
    pub const ARP_FRAME_COUNT: Self = Self::new(0x004D);
    /// ARP probes per second.
    pub const ARP_TRANSMISSION_RATE: Self = Self::new(0x004E);
    /// Station MAC address.
    pub const ADDRESS: Self = Self::new(0x004F);
    /// Target BSSID.
    pub const BSSID: Self = Self::new(0x0050);
    /// BTM disassociation imminent flag.
    pub const DISASSOC_IMMINENT: Self = Self::new(0x0051);
    /// BTM disassociation timer.
    pub const DISASSOC_TIMER: Self = Self::new(0x0052);
    /// MBO reassociation retry delay.
    pub const REASSOCIATION_RETRY_DELAY: Self = Self::new(0x0053);
    /// Candidate list inclusion flag.
    pub const CANDIDATE_LIST: Self = Self::new(0x0054);
    /// BSS termination flag.
    pub const BSS_TERMINATION: Self = Self::new(0x0055);
    /// BSS termination TSF.
    pub const BSS_TERMINATION_TSF: Self = Self::new(0x0056);
    /// BSS termination duration.
    pub const BSS_TERMINATION_DURATION: Self = Self::new(0x0057);
    /// Channel switch frequency.
    pub const FREQUENCY: Self = Self::new(0x0058);
    /// BTM query reason code.
    pub const BTM_QUERY_REASON_CODE: Self = Self::new(0x0059);
    /// ANQP information request name.
    pub const ANQP_INFO_ID: Self = Self::new(0x005A);
    /// Station PHY mode.
    pub const PHY_MODE: Self = Self::new(0x005B);
    /// Station channel width.
    pub const CHANNEL_WIDTH: Self = Self::new(0x005C);
    /// Station power save, `False` to disable.
    pub const STA_POWER_SAVE: Self = Self::new(0x005D);

    // Response fields.

    /// Human-readable result message.
    pub const MESSAGE: Self = Self::new(0xA000);
    /// Single-byte status; see [`crate::Status`].
    pub const STATUS: Self = Self::new(0xA001);
    /// Device-under-test WLAN IPv4 address.
    pub const DUT_WLAN_IP_ADDR: Self = Self::new(0xA002);
    /// Device-under-test MAC address.
    pub const DUT_MAC_ADDR: Self = Self::new(0xA003);
    /// Agent version string.
    pub const CONTROL_APP_VERSION: Self = Self::new(0xA004);
    /// Loopback packets echoed back.
    pub const LOOP_BACK_DATA_RECEIVED: Self = Self::new(0xA005);
    /// ARP replies received.
    pub const ARP_RECV_NUM: Self = Self::new(0xA006);
}
