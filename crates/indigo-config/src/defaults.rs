use camino::Utf8PathBuf;

use crate::endpoint::ServiceEndpoint;
use crate::logging::LogFormat;

/// Default UDP port the controller sends requests to.
pub const DEFAULT_UDP_PORT: u16 = 9004;

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default wireless interface driven by the agent.
pub const DEFAULT_WIRELESS_INTERFACE: &str = "wlan0";

/// Default bridge interface checked first when reporting addresses.
pub const DEFAULT_BRIDGE_INTERFACE: &str = "br0";

/// Default wired interface used as a last resort for loopback traffic.
pub const DEFAULT_WIRED_INTERFACE: &str = "eth0";

/// Default hostapd configuration file.
pub const DEFAULT_HOSTAPD_CONF: &str = "/etc/hostapd/hostapd.conf";

/// Default wpa_supplicant configuration file.
pub const DEFAULT_WPAS_CONF: &str = "/etc/wpa_supplicant/wpa_supplicant.conf";

/// Default hostapd global control interface.
pub const DEFAULT_HOSTAPD_GLOBAL_CTRL: &str = "/run/hostapd-global";

/// Default hostapd per-interface control directory.
pub const DEFAULT_HOSTAPD_CTRL: &str = "/run/hostapd";

/// Default wpa_supplicant per-interface control directory.
pub const DEFAULT_WPAS_CTRL: &str = "/var/run/wpa_supplicant";

/// Default listening endpoint for controller datagrams.
#[must_use]
pub fn default_listen() -> ServiceEndpoint {
    ServiceEndpoint::udp("0.0.0.0", DEFAULT_UDP_PORT)
}

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

pub(crate) fn owned(value: &str) -> String {
    value.to_owned()
}

pub(crate) fn path(value: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(value)
}
