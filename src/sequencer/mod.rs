//! Deployment sequencing
//!
//! The sequencer walks the plan's ordered component list and drives
//! external tools through the command runner, one platform at a time.

mod engine;
mod options;
mod platform;
mod report;

pub use engine::Sequencer;
pub use options::{BuildOptions, UpOptions};
pub use platform::{ComposeDriver, KubernetesDriver, Platform, PlatformDriver};
pub use report::{BuildReport, UpReport};
