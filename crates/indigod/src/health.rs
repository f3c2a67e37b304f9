//! Structured health reporting for agent lifecycle events.

use std::net::SocketAddr;
use std::sync::Arc;

use indigo_config::Config;
use indigo_protocol::{ApiCommand, Status};

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the listener is serving requests.
    fn listener_started(&self, addr: SocketAddr);

    /// Invoked after the listener thread has stopped.
    fn listener_stopped(&self);

    /// Invoked after every request has been answered.
    fn request_completed(&self, command: u16, sequence: u16, status: Status);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn listener_started(&self, addr: SocketAddr) {
        (**self).listener_started(addr);
    }

    fn listener_stopped(&self) {
        (**self).listener_stopped();
    }

    fn request_completed(&self, command: u16, sequence: u16, status: Status) {
        (**self).request_completed(command, sequence, status);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting agent bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            listen = %config.listen(),
            wireless_interface = config.wireless_interface(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "agent bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "agent bootstrap failed"
        );
    }

    fn listener_started(&self, addr: SocketAddr) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_started",
            %addr,
            "accepting controller requests"
        );
    }

    fn listener_stopped(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_stopped",
            "controller listener stopped"
        );
    }

    fn request_completed(&self, command: u16, sequence: u16, status: Status) {
        let name = ApiCommand::from_code(command).map_or("unknown", ApiCommand::name);
        tracing::info!(
            target: HEALTH_TARGET,
            event = "request_completed",
            command = name,
            code = command,
            sequence,
            ok = status.is_ok(),
            "request answered"
        );
    }
}
