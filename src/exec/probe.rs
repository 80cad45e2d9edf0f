//! Tool availability probing
//!
//! Probes run a lightweight version invocation and treat exit 0 as
//! available. Results are ephemeral; availability is re-checked per
//! operation rather than cached across commands.

use std::path::Path;

use super::command::CommandRunner;

/// Outcome of probing an external tool
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub available: bool,
    /// Resolved invocation prefix, e.g. `["docker", "compose"]`
    pub command: Vec<String>,
}

impl ProbeResult {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            command: Vec::new(),
        }
    }
}

/// Check one invocation form by appending `version` and running it.
///
/// A spawn failure (binary missing) and a non-zero exit both resolve to
/// unavailable; callers that want to distinguish them log at debug level.
pub fn probe_invocation(runner: &dyn CommandRunner, prefix: &[String], root: &Path) -> ProbeResult {
    let mut cmd = prefix.to_vec();
    cmd.push("version".to_string());

    match runner.run(&cmd, root) {
        Ok(output) if output.success() => ProbeResult {
            available: true,
            command: prefix.to_vec(),
        },
        _ => ProbeResult::unavailable(),
    }
}
