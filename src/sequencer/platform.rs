//! Deployment platforms
//!
//! The platform set is closed. Each variant carries its probe and
//! teardown forms behind [`PlatformDriver`]; the sequencer selects
//! flow shape by matching on [`Platform`].

use std::fmt;
use std::path::Path;

use crate::exec::{probe_invocation, CommandRunner, ProbeResult};
use crate::manifest::Settings;

/// Supported deployment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Compose,
    Kubernetes,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Compose => "compose",
            Platform::Kubernetes => "kubernetes",
        }
    }

    pub fn driver(&self) -> &'static dyn PlatformDriver {
        match self {
            Platform::Compose => &ComposeDriver,
            Platform::Kubernetes => &KubernetesDriver,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-platform probe and invocation forms
pub trait PlatformDriver {
    fn platform(&self) -> Platform;

    /// Tool name for "not found" diagnostics
    fn tool_name(&self) -> &'static str;

    /// Resolve the tool invocation prefix, or unavailable
    fn probe(&self, runner: &dyn CommandRunner, settings: &Settings, root: &Path) -> ProbeResult;

    /// Bulk teardown command built on the probed prefix
    fn teardown(&self, prefix: &[String]) -> Vec<String>;
}

/// Compose driver. The compose CLI ships either as a standalone
/// `docker-compose` binary or as the `docker compose` plugin; the probe
/// tries them in that order and keeps whichever answers.
pub struct ComposeDriver;

impl PlatformDriver for ComposeDriver {
    fn platform(&self) -> Platform {
        Platform::Compose
    }

    fn tool_name(&self) -> &'static str {
        "docker-compose"
    }

    fn probe(&self, runner: &dyn CommandRunner, _settings: &Settings, root: &Path) -> ProbeResult {
        let standalone = probe_invocation(runner, &["docker-compose".to_string()], root);
        if standalone.available {
            return standalone;
        }
        probe_invocation(
            runner,
            &["docker".to_string(), "compose".to_string()],
            root,
        )
    }

    fn teardown(&self, prefix: &[String]) -> Vec<String> {
        let mut cmd = prefix.to_vec();
        cmd.push("down".to_string());
        cmd
    }
}

/// Kubernetes driver. The cluster CLI invocation comes from manifest
/// settings, so wrapped forms like `minikube kubectl --` work unchanged.
pub struct KubernetesDriver;

impl PlatformDriver for KubernetesDriver {
    fn platform(&self) -> Platform {
        Platform::Kubernetes
    }

    fn tool_name(&self) -> &'static str {
        "kubectl"
    }

    fn probe(&self, runner: &dyn CommandRunner, settings: &Settings, root: &Path) -> ProbeResult {
        probe_invocation(runner, &settings.kubectl_command, root)
    }

    fn teardown(&self, prefix: &[String]) -> Vec<String> {
        let mut cmd = prefix.to_vec();
        cmd.extend([
            "delete".to_string(),
            "pods,deployments,services".to_string(),
            "--all".to_string(),
        ]);
        cmd
    }
}
