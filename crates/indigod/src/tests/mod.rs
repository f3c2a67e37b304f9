//! Test suites for the agent runtime.

mod bootstrap_behaviour;
pub(crate) mod support;
