//! stackctl - container stack deployment tool
//!
//! Reads a declarative stack manifest describing an API's components and
//! deployment order, then sequences container engine, compose, and
//! cluster CLI invocations to build, push, apply, and tear down the
//! stack on one of two platforms: compose or kubernetes.

pub mod cli;
pub mod commands;
pub mod error;
pub mod exec;
pub mod manifest;
pub mod registry;
pub mod sequencer;
pub mod ui;

pub use error::{StackError, StackResult};
pub use manifest::{Component, ComponentKind, DeploymentPlan};
pub use sequencer::{Platform, Sequencer};
