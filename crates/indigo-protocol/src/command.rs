//! Command codes carried in the packet header.

/// Header command code of every final response.
pub const RESPONSE_COMMAND: u16 = 0x0000;

/// Header command code of the acknowledgement sent before a response.
pub const ACK_COMMAND: u16 = 0x0001;

/// Outcome carried in the single-byte status TLV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// The request succeeded.
    Ok = 0,
    /// The request failed.
    NotOk = 1,
}

impl Status {
    /// Returns the byte written into the status TLV.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Interprets a status byte; any nonzero value is a failure.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        if byte == 0 { Self::Ok } else { Self::NotOk }
    }

    /// Returns `true` for [`Status::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

macro_rules! api_commands {
    ($($(#[$meta:meta])* $variant:ident = $code:literal => $name:literal,)+) => {
        /// Request commands understood by the agent.
        ///
        /// The set is closed; a header carrying any other code maps to `None`
        /// in [`ApiCommand::from_code`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ApiCommand {
            $($(#[$meta])* $variant,)+
        }

        impl ApiCommand {
            /// Every known command in code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Maps a header code onto a known command.
            #[must_use]
            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns the header code for this command.
            #[must_use]
            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Returns a stable name used in logs.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

api_commands! {
    /// Launch hostapd with the generated configuration.
    StartUpAp = 0x1000 => "start_up_ap",
    /// Stop hostapd and remove its configuration.
    StopAp = 0x1001 => "stop_ap",
    /// Render the hostapd configuration file.
    ConfigureAp = 0x1002 => "configure_ap",
    /// Switch the AP to another channel.
    TriggerApChannelSwitch = 0x1003 => "trigger_ap_channel_switch",
    /// Disassociate a station from the AP.
    SendApDisconnect = 0x1004 => "send_ap_disconnect",
    /// Set a runtime AP parameter.
    SetApParameter = 0x1005 => "set_ap_parameter",
    /// Send a BSS transition management request.
    SendApBtmRequest = 0x1006 => "send_ap_btm_request",
    /// Broadcast ARP probes and count replies.
    SendApArpMessages = 0x1007 => "send_ap_arp_messages",
    /// Launch wpa_supplicant with the current configuration.
    AssociateSta = 0x2000 => "associate_sta",
    /// Render the wpa_supplicant configuration file.
    ConfigureSta = 0x2001 => "configure_sta",
    /// Stop wpa_supplicant and remove its configuration.
    StopSta = 0x2002 => "stop_sta",
    /// Ask wpa_supplicant to disconnect.
    SendStaDisconnect = 0x2003 => "send_sta_disconnect",
    /// Ask wpa_supplicant to reconnect.
    SendStaReconnect = 0x2004 => "send_sta_reconnect",
    /// Set a runtime station parameter.
    SetStaParameter = 0x2005 => "set_sta_parameter",
    /// Send a BSS transition management query.
    SendStaBtmQuery = 0x2006 => "send_sta_btm_query",
    /// Send an ANQP query.
    SendStaAnqpQuery = 0x2007 => "send_sta_anqp_query",
    /// Launch a bare wpa_supplicant.
    StartUpSta = 0x2008 => "start_up_sta",
    /// Record the PHY mode for the next station configuration.
    SetStaPhyMode = 0x2009 => "set_sta_phy_mode",
    /// Record the channel width for the next station configuration.
    SetStaChannelWidth = 0x200A => "set_sta_channel_width",
    /// Toggle station power save.
    SetStaPowerSave = 0x200B => "set_sta_power_save",
    /// Report the wireless IPv4 address.
    GetIpAddr = 0x5000 => "get_ip_addr",
    /// Report the wireless MAC address.
    GetMacAddr = 0x5001 => "get_mac_addr",
    /// Report the agent version.
    GetControlAppVersion = 0x5002 => "get_control_app_version",
    /// Start the UDP loopback responder.
    StartLoopback = 0x5003 => "start_loopback",
    /// Stop the UDP loopback responder.
    StopLoopback = 0x5004 => "stop_loopback",
    /// Create a bridge network interface; recognised but not served.
    CreateNewInterfaceBridgeNetwork = 0x5005 => "create_new_interface_bridge_network",
    /// Assign a static IPv4 address to the wireless interface.
    AssignStaticIp = 0x5006 => "assign_static_ip",
    /// Return a role to its reset state.
    DeviceReset = 0x5007 => "device_reset",
    /// Send loopback traffic and count echoes.
    SendLoopbackData = 0x5008 => "send_loopback_data",
}
