//! Behavioural coverage for layered configuration loading.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use indigo_config::{
    Config, DEFAULT_WIRELESS_INTERFACE, ServiceEndpoint, default_listen, default_log_filter,
    default_log_format,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const LISTEN_VAR: &str = "INDIGO_LISTEN";

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = TempDir::new().expect("failed to create temporary directory");
        Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("indigod")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        }
    }

    fn write_config(&self, listen: &ServiceEndpoint) {
        let path = self.temp_dir.path().join("indigo.toml");
        let toml = format!("listen = \"{listen}\"\nwireless_interface = \"wlan9\"\n");
        fs::write(&path, toml).expect("failed to write configuration");

        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` on the 2024 edition; `Drop`
        // restores every override and `ENV_MUTEX` serialises scenarios.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }
        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        self.loaded
            .borrow()
            .clone()
            .expect("configuration was not loaded")
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(previous) => unsafe { std::env::set_var(&key, previous) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn endpoint(text: &str) -> ServiceEndpoint {
    text.parse()
        .unwrap_or_else(|error| panic!("invalid endpoint '{text}': {error}"))
}

#[given("a configuration file setting the listen endpoint to \"{listen}\"")]
fn given_configuration_file(harness: &Harness, listen: String) {
    harness.write_config(&endpoint(&listen));
}

#[given("the environment overrides the listen endpoint to \"{listen}\"")]
fn given_environment_override(harness: &Harness, listen: String) {
    harness.set_env(LISTEN_VAR, &listen);
}

#[when("the CLI sets the listen endpoint to \"{listen}\"")]
fn when_cli_override(harness: &Harness, listen: String) {
    harness.push_cli_arg("--listen");
    harness.push_cli_arg(listen);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the listen endpoint to \"{listen}\"")]
fn then_resolved_listen(harness: &Harness, listen: String) {
    let config = harness.config();
    assert_eq!(config.listen(), &endpoint(&listen));
    assert_eq!(config.wireless_interface(), "wlan9");
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.listen(), &default_listen());
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.wireless_interface(), DEFAULT_WIRELESS_INTERFACE);
    assert!(config.acknowledge_requests());
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply without overrides"
)]
fn defaults_apply(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Configuration file overrides defaults"
)]
fn file_overrides_defaults(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Command line overrides the environment"
)]
fn cli_overrides_environment(#[from(harness)] harness: Harness) {
    let _ = harness;
}
