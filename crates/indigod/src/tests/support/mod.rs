//! Test harness utilities shared by the behavioural and unit suites.

mod config_loader;
mod platform;
mod reporter;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use platform::{PlatformCall, RecordingPlatform};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use world::{TestWorld, world};
