//! Wi-Fi test agent daemon.
//!
//! The agent receives binary command packets from a certification test
//! controller over UDP, runs the matching command against the local hostapd
//! and wpa_supplicant stack, and answers each request with a status packet.
//!
//! Requests flow through three layers:
//!
//! 1. [`transport`] reads one datagram at a time and optionally acknowledges
//!    it.
//! 2. [`dispatch`] decodes the packet, routes the command code to a handler
//!    and encodes the reply. No failure escapes this layer.
//! 3. The handlers render daemon configuration through [`configgen`], keep
//!    cross-request radio settings in [`state`], and reach the host only
//!    through the [`platform::Platform`] trait.
//!
//! Bootstrap loads layered configuration, installs structured telemetry and
//! reports each lifecycle step through a [`HealthReporter`].

mod bootstrap;
pub mod configgen;
pub mod context;
pub mod dispatch;
mod handlers;
mod health;
pub mod platform;
mod process;
pub mod state;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    Agent, BootstrapError, ConfigLoader, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
