//! Stack manifest parsing
//!
//! The manifest (`stack.yml` by default) declares the API name, tool
//! settings, the deployable components, and the deployment order. Loading
//! produces an immutable [`DeploymentPlan`] that the sequencer walks.

mod loader;
mod plan;
mod schema;

pub use loader::load;
pub use plan::{
    BuildSettings, Component, ComponentKind, DeploymentPlan, PlatformPolicy, Settings,
};
