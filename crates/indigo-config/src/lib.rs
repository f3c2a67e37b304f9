//! Layered configuration for the Indigo test agent.
//!
//! Values resolve from built-in defaults, then an optional TOML file named by
//! `--config-path` or `INDIGO_CONFIG_PATH`, then `INDIGO_*` environment
//! variables, and finally command-line flags. Later layers win.

mod defaults;
mod endpoint;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_BRIDGE_INTERFACE, DEFAULT_HOSTAPD_CONF, DEFAULT_HOSTAPD_CTRL,
    DEFAULT_HOSTAPD_GLOBAL_CTRL, DEFAULT_LOG_FILTER, DEFAULT_UDP_PORT, DEFAULT_WIRED_INTERFACE,
    DEFAULT_WIRELESS_INTERFACE, DEFAULT_WPAS_CONF, DEFAULT_WPAS_CTRL, default_listen,
    default_log_filter, default_log_filter_string, default_log_format,
};
pub use endpoint::{EndpointParseError, EndpointResolveError, ServiceEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved agent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "INDIGO")]
pub struct Config {
    /// UDP endpoint receiving controller requests.
    #[ortho_config(default = defaults::default_listen())]
    pub listen: ServiceEndpoint,
    /// `tracing` filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Wireless interface used when no band-specific interface applies.
    #[ortho_config(default = defaults::owned(DEFAULT_WIRELESS_INTERFACE))]
    pub wireless_interface: String,
    /// Interface serving the 5 GHz band, when the device splits bands.
    pub wireless_interface_5g: Option<String>,
    /// Interface serving the 2.4 GHz band, when the device splits bands.
    pub wireless_interface_24g: Option<String>,
    /// Bridge interface.
    #[ortho_config(default = defaults::owned(DEFAULT_BRIDGE_INTERFACE))]
    pub bridge_interface: String,
    /// Wired interface.
    #[ortho_config(default = defaults::owned(DEFAULT_WIRED_INTERFACE))]
    pub wired_interface: String,
    /// Generated hostapd configuration file.
    #[ortho_config(default = defaults::path(DEFAULT_HOSTAPD_CONF))]
    pub hostapd_conf: Utf8PathBuf,
    /// Generated wpa_supplicant configuration file.
    #[ortho_config(default = defaults::path(DEFAULT_WPAS_CONF))]
    pub wpas_conf: Utf8PathBuf,
    /// hostapd global control interface passed with `-g`.
    #[ortho_config(default = defaults::path(DEFAULT_HOSTAPD_GLOBAL_CTRL))]
    pub hostapd_global_ctrl: Utf8PathBuf,
    /// Directory holding hostapd per-interface control sockets.
    #[ortho_config(default = defaults::path(DEFAULT_HOSTAPD_CTRL))]
    pub hostapd_ctrl: Utf8PathBuf,
    /// Directory holding wpa_supplicant per-interface control sockets.
    #[ortho_config(default = defaults::path(DEFAULT_WPAS_CTRL))]
    pub wpas_ctrl: Utf8PathBuf,
    /// File restored over the hostapd configuration on reset.
    pub ap_reset_template: Option<Utf8PathBuf>,
    /// File restored over the wpa_supplicant configuration on reset.
    pub sta_reset_template: Option<Utf8PathBuf>,
    /// Kernel module reloaded when the radio must be reset.
    pub driver_module: Option<String>,
    /// Sends an acknowledgement datagram before each response.
    #[ortho_config(default = true)]
    pub acknowledge_requests: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            wireless_interface: defaults::owned(DEFAULT_WIRELESS_INTERFACE),
            wireless_interface_5g: None,
            wireless_interface_24g: None,
            bridge_interface: defaults::owned(DEFAULT_BRIDGE_INTERFACE),
            wired_interface: defaults::owned(DEFAULT_WIRED_INTERFACE),
            hostapd_conf: defaults::path(DEFAULT_HOSTAPD_CONF),
            wpas_conf: defaults::path(DEFAULT_WPAS_CONF),
            hostapd_global_ctrl: defaults::path(DEFAULT_HOSTAPD_GLOBAL_CTRL),
            hostapd_ctrl: defaults::path(DEFAULT_HOSTAPD_CTRL),
            wpas_ctrl: defaults::path(DEFAULT_WPAS_CTRL),
            ap_reset_template: None,
            sta_reset_template: None,
            driver_module: None,
            acknowledge_requests: true,
        }
    }
}

impl Config {
    /// Endpoint receiving controller requests.
    #[must_use]
    pub const fn listen(&self) -> &ServiceEndpoint {
        &self.listen
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Default wireless interface.
    #[must_use]
    pub fn wireless_interface(&self) -> &str {
        &self.wireless_interface
    }

    /// Interface for 5 GHz operation, falling back to the default.
    #[must_use]
    pub fn wireless_interface_5g(&self) -> &str {
        self.wireless_interface_5g
            .as_deref()
            .unwrap_or(&self.wireless_interface)
    }

    /// Interface for 2.4 GHz operation, falling back to the default.
    #[must_use]
    pub fn wireless_interface_24g(&self) -> &str {
        self.wireless_interface_24g
            .as_deref()
            .unwrap_or(&self.wireless_interface)
    }

    /// Bridge interface.
    #[must_use]
    pub fn bridge_interface(&self) -> &str {
        &self.bridge_interface
    }

    /// Wired interface.
    #[must_use]
    pub fn wired_interface(&self) -> &str {
        &self.wired_interface
    }

    /// Generated hostapd configuration file.
    #[must_use]
    pub fn hostapd_conf(&self) -> &Utf8Path {
        &self.hostapd_conf
    }

    /// Generated wpa_supplicant configuration file.
    #[must_use]
    pub fn wpas_conf(&self) -> &Utf8Path {
        &self.wpas_conf
    }

    /// hostapd global control interface.
    #[must_use]
    pub fn hostapd_global_ctrl(&self) -> &Utf8Path {
        &self.hostapd_global_ctrl
    }

    /// hostapd per-interface control directory.
    #[must_use]
    pub fn hostapd_ctrl(&self) -> &Utf8Path {
        &self.hostapd_ctrl
    }

    /// wpa_supplicant per-interface control directory.
    #[must_use]
    pub fn wpas_ctrl(&self) -> &Utf8Path {
        &self.wpas_ctrl
    }

    /// hostapd reset template, if configured.
    #[must_use]
    pub fn ap_reset_template(&self) -> Option<&Utf8Path> {
        self.ap_reset_template.as_deref()
    }

    /// wpa_supplicant reset template, if configured.
    #[must_use]
    pub fn sta_reset_template(&self) -> Option<&Utf8Path> {
        self.sta_reset_template.as_deref()
    }

    /// Kernel module reloaded on radio reset, if configured.
    #[must_use]
    pub fn driver_module(&self) -> Option<&str> {
        self.driver_module.as_deref()
    }

    /// Whether an acknowledgement precedes each response.
    #[must_use]
    pub const fn acknowledge_requests(&self) -> bool {
        self.acknowledge_requests
    }
}
