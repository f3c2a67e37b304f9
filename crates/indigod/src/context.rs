//! Everything a handler may read or mutate while serving one request.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use indigo_config::Config;

use crate::platform::Platform;
use crate::state::PlatformState;

/// Radio band selected by an access-point configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// 2.4 GHz.
    Ghz24,
    /// 5 GHz.
    Ghz5,
}

impl Band {
    /// Maps a hostapd `hw_mode` value onto a band.
    #[must_use]
    pub fn from_hw_mode(hw_mode: &str) -> Self {
        if hw_mode.starts_with('a') {
            Self::Ghz5
        } else {
            Self::Ghz24
        }
    }
}

/// Request-handling context owned by the dispatcher.
///
/// Holds the platform state, the control socket directories announced by the
/// most recent configuration requests and the interface chosen for the access
/// point.
pub struct AgentContext {
    config: Config,
    state: PlatformState,
    hostapd_ctrl: Utf8PathBuf,
    wpas_ctrl: Utf8PathBuf,
    ap_interface: String,
    platform: Arc<dyn Platform>,
}

impl AgentContext {
    /// Builds a context with defaults taken from `config`.
    #[must_use]
    pub fn new(config: Config, platform: Arc<dyn Platform>) -> Self {
        Self {
            hostapd_ctrl: config.hostapd_ctrl().to_path_buf(),
            wpas_ctrl: config.wpas_ctrl().to_path_buf(),
            ap_interface: config.wireless_interface().to_owned(),
            state: PlatformState::default(),
            config,
            platform,
        }
    }

    /// Agent configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Platform state shared across requests.
    #[must_use]
    pub const fn state(&self) -> &PlatformState {
        &self.state
    }

    /// Mutable platform state.
    pub const fn state_mut(&mut self) -> &mut PlatformState {
        &mut self.state
    }

    /// Host collaborator.
    #[must_use]
    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Station interface.
    #[must_use]
    pub fn sta_interface(&self) -> &str {
        self.config.wireless_interface()
    }

    /// Interface the access point runs on.
    #[must_use]
    pub fn ap_interface(&self) -> &str {
        &self.ap_interface
    }

    /// Configured interface serving `band`.
    #[must_use]
    pub fn band_interface(&self, band: Band) -> &str {
        match band {
            Band::Ghz5 => self.config.wireless_interface_5g(),
            Band::Ghz24 => self.config.wireless_interface_24g(),
        }
    }

    /// Selects the access-point interface for `band`.
    pub fn select_band(&mut self, band: Band) {
        self.ap_interface = self.band_interface(band).to_owned();
    }

    /// Records the hostapd control directory announced by a configuration.
    pub fn set_hostapd_ctrl(&mut self, dir: &Utf8Path) {
        self.hostapd_ctrl = dir.to_path_buf();
    }

    /// Records the wpa_supplicant control directory announced by a request.
    pub fn set_wpas_ctrl(&mut self, dir: &Utf8Path) {
        self.wpas_ctrl = dir.to_path_buf();
    }

    /// Control socket of the running access point.
    #[must_use]
    pub fn hostapd_socket(&self) -> Utf8PathBuf {
        self.hostapd_ctrl.join(&self.ap_interface)
    }

    /// Directory holding the station control sockets.
    #[must_use]
    pub fn wpas_ctrl(&self) -> &Utf8Path {
        &self.wpas_ctrl
    }

    /// Control socket of the running station.
    #[must_use]
    pub fn wpas_socket(&self) -> Utf8PathBuf {
        self.wpas_ctrl.join(self.sta_interface())
    }
}
