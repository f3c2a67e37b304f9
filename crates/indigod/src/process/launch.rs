//! Supervises agent launch sequencing and runtime orchestration.

use std::sync::Arc;

use indigo_config::Config;
use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::context::AgentContext;
use crate::dispatch::{AgentDatagramHandler, Dispatcher};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::platform::{Platform, SystemPlatform};
use crate::transport::DatagramListener;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Builds the host collaborator once configuration is known.
pub(crate) type PlatformFactory = Box<dyn FnOnce(&Config) -> Arc<dyn Platform> + Send>;

/// Collaborators required to launch the agent runtime.
pub(crate) struct LaunchPlan<L, S> {
    pub(crate) loader: L,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) platform: PlatformFactory,
    pub(crate) shutdown: S,
}

/// Runs the agent using the production collaborators.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, the listener or signal handling
/// fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    let plan = LaunchPlan {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        platform: Box::new(|config: &Config| -> Arc<dyn Platform> {
            Arc::new(SystemPlatform::from_config(config))
        }),
        shutdown: SystemShutdownSignal,
    };
    run_daemon_with(plan)
}

/// Runs the agent with injected collaborators.
pub(crate) fn run_daemon_with<L, S>(plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        platform,
        shutdown,
    } = plan;

    info!(target: PROCESS_TARGET, "starting agent runtime");
    let agent = bootstrap_with(&loader, reporter)?;
    let (config, reporter) = agent.into_parts();

    let listener = DatagramListener::bind(config.listen())?;
    let addr = listener.local_addr();
    let acknowledge = config.acknowledge_requests();
    let platform = platform(&config);
    let dispatcher = Arc::new(Dispatcher::new(
        AgentContext::new(config, platform),
        Arc::clone(&reporter),
    ));
    let handle = listener.start(Arc::new(AgentDatagramHandler::new(dispatcher, acknowledge)))?;
    if let Some(addr) = addr {
        reporter.listener_started(addr);
    }

    shutdown.wait()?;
    handle.shutdown();
    handle.join()?;
    reporter.listener_stopped();
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
