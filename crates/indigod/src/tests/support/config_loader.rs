//! Test configuration loaders for success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use camino::Utf8PathBuf;
use indigo_config::{Config, ServiceEndpoint};
use ortho_config::OrthoError;
use tempfile::TempDir;

use crate::bootstrap::ConfigLoader;

/// Loader binding loopback and keeping generated files in a temporary directory.
pub struct TestConfigLoader {
    dir: TempDir,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temporary directory"),
        }
    }

    /// Configuration handed out by [`ConfigLoader::load`].
    #[must_use]
    pub fn config(&self) -> Config {
        let dir = Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf())
            .expect("temporary directory was not valid UTF-8");
        Config {
            listen: ServiceEndpoint::udp("127.0.0.1", 0),
            hostapd_conf: dir.join("hostapd.conf"),
            wpas_conf: dir.join("wpa_supplicant.conf"),
            ..Config::default()
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config())
    }
}

/// Loader that intentionally fails by passing an invalid listen endpoint.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("indigod"),
            OsString::from("--listen"),
            OsString::from("tcp://127.0.0.1:9004"),
        ];
        Config::load_from_iter(args)
    }
}
