//! Deployment sequencer
//!
//! Executes build, up, down, and update against a loaded plan. Everything
//! is single-threaded and blocking: one external command at a time, in
//! manifest order, no retries. The apply loop is the one place where a
//! failure can be tolerated (`ignore`); every other failing step aborts
//! the operation.

use std::path::{Path, PathBuf};

use crate::error::{StackError, StackResult};
use crate::exec::{display, CommandRunner, ProbeResult};
use crate::manifest::{Component, DeploymentPlan};
use crate::registry::{CredentialProvider, RegistrySession};
use crate::ui::StatusSink;

use super::options::{BuildOptions, UpOptions};
use super::platform::{Platform, PlatformDriver};
use super::report::{BuildReport, UpReport};

pub struct Sequencer<'a> {
    plan: &'a DeploymentPlan,
    driver: &'a dyn PlatformDriver,
    runner: &'a dyn CommandRunner,
    credentials: &'a dyn CredentialProvider,
    sink: &'a dyn StatusSink,
    root: PathBuf,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        plan: &'a DeploymentPlan,
        driver: &'a dyn PlatformDriver,
        runner: &'a dyn CommandRunner,
        credentials: &'a dyn CredentialProvider,
        sink: &'a dyn StatusSink,
        root: PathBuf,
    ) -> Self {
        Self {
            plan,
            driver,
            runner,
            credentials,
            sink,
            root,
        }
    }

    fn probe(&self) -> StackResult<ProbeResult> {
        let result = self.driver.probe(self.runner, &self.plan.settings, &self.root);
        if !result.available {
            return Err(StackError::ToolNotAvailable {
                tool: self.driver.tool_name().to_string(),
            });
        }
        self.sink
            .debug(&format!("using '{}'", display(&result.command)));
        Ok(result)
    }

    /// Build every ordered component's image, pushing where requested and
    /// allowed. Any build or push failure aborts; a broken image must
    /// never be partially pushed.
    pub fn build(&self, options: &BuildOptions) -> StackResult<BuildReport> {
        let session = RegistrySession::new(self.runner, self.credentials, self.sink);
        let username = session.login(self.plan.settings.registry.as_deref(), &self.root)?;

        let namespace = self
            .plan
            .settings
            .registry
            .clone()
            .unwrap_or(username);

        let mut report = BuildReport::default();
        for component in self.plan.ordered() {
            let policy = component.policy(self.driver.platform());
            if !policy.build {
                self.sink
                    .debug(&format!("{}: build disabled for {}", component, self.driver.platform()));
                report.skipped.push(component.id().to_string());
                continue;
            }

            let context = self.root.join(component.build_context());
            let dockerfile = component.dockerfile();
            if !context.join(&dockerfile).is_file() {
                self.sink
                    .debug(&format!("{}: no build file, skipping", component));
                report.skipped.push(component.id().to_string());
                continue;
            }

            let tag = format!("{}/{}", namespace, component.id());
            self.sink.info(&format!("building {}", tag));

            let cmd = vec![
                "docker".to_string(),
                "build".to_string(),
                ".".to_string(),
                "-f".to_string(),
                dockerfile.display().to_string(),
                "-t".to_string(),
                tag.clone(),
            ];
            let output = self.runner.run(&cmd, &context)?;
            if !output.success() {
                return Err(StackError::BuildFailed {
                    component: component.id().to_string(),
                    stderr: output.stderr,
                });
            }

            if options.push && policy.push {
                self.sink.info(&format!("pushing {}", tag));
                let cmd = vec!["docker".to_string(), "push".to_string(), tag.clone()];
                let output = self.runner.run(&cmd, &self.root)?;
                if !output.success() {
                    return Err(StackError::PushFailed {
                        component: component.id().to_string(),
                        stderr: output.stderr,
                    });
                }
            }

            report.tags.push(tag);
        }

        self.sink
            .success(&format!("built {} image(s)", report.tags.len()));
        Ok(report)
    }

    /// Bring the stack up. Per-component apply failures are tolerated only
    /// on kubernetes with `ignore` set; the caller still reports a failing
    /// exit when the returned report is not clean.
    pub fn up(&self, options: &UpOptions) -> StackResult<UpReport> {
        let probe = self.probe()?;

        if options.restart {
            self.sink.info("restarting: tearing the stack down first");
            self.down()?;
        }

        if options.build {
            self.build(&BuildOptions::default())?;
        }

        match self.driver.platform() {
            Platform::Kubernetes => self.up_kubernetes(&probe, options),
            Platform::Compose => self.up_compose(&probe),
        }
    }

    fn up_kubernetes(&self, probe: &ProbeResult, options: &UpOptions) -> StackResult<UpReport> {
        // Secrets are a precondition, not a best-effort step; failure here
        // is fatal even under `ignore`.
        let secrets = self.plan.settings.secrets_file.display().to_string();
        self.sink.info(&format!("applying secrets from {}", secrets));
        let output = self.runner.run(&apply_cmd(&probe.command, &secrets), &self.root)?;
        if !output.success() {
            return Err(StackError::ApplyFailed {
                target: "secrets".to_string(),
                stderr: output.stderr,
            });
        }

        let mut report = UpReport::default();
        for component in self.plan.ordered() {
            let config = component.config_file().display().to_string();
            self.sink.info(&format!("applying {}", component));

            let output = self.runner.run(&apply_cmd(&probe.command, &config), &self.root)?;
            if output.success() {
                report.applied.push(component.id().to_string());
                continue;
            }

            if options.ignore {
                self.sink
                    .error(&format!("{}: apply failed, continuing", component));
                report.failed.push(component.id().to_string());
            } else {
                return Err(StackError::ApplyFailed {
                    target: component.id().to_string(),
                    stderr: output.stderr,
                });
            }
        }

        self.sink.success(&format!(
            "applied {} of {} component(s)",
            report.applied.len(),
            self.plan.ordered_count()
        ));
        Ok(report)
    }

    fn up_compose(&self, probe: &ProbeResult) -> StackResult<UpReport> {
        let mut cmd = probe.command.clone();
        cmd.extend(["up".to_string(), "-d".to_string()]);

        self.sink.info("starting compose stack");
        let output = self.runner.run(&cmd, &self.root)?;
        if !output.success() {
            return Err(StackError::ApplyFailed {
                target: "compose stack".to_string(),
                stderr: output.stderr,
            });
        }

        self.sink.success("compose stack is up");
        Ok(UpReport {
            applied: self
                .plan
                .ordered()
                .map(|c| c.id().to_string())
                .collect(),
            failed: Vec::new(),
        })
    }

    /// Tear the whole stack down with one bulk command. Deleting an
    /// already-empty stack exits 0, so repeated invocation is safe.
    pub fn down(&self) -> StackResult<()> {
        let probe = self.probe()?;
        let cmd = self.driver.teardown(&probe.command);

        self.sink.info("tearing the stack down");
        let output = self.runner.run(&cmd, &self.root)?;
        if !output.success() {
            return Err(StackError::DeleteFailed {
                stderr: output.stderr,
            });
        }

        self.sink.success("stack removed");
        Ok(())
    }

    /// Re-apply configuration only. No image build, no secrets re-apply;
    /// every failure is fatal since there is no `ignore` flag here.
    pub fn update(&self) -> StackResult<UpReport> {
        let probe = self.probe()?;

        match self.driver.platform() {
            Platform::Compose => self.up_compose(&probe),
            Platform::Kubernetes => {
                let mut report = UpReport::default();
                for component in self.plan.ordered() {
                    let config = component.config_file().display().to_string();
                    self.sink.info(&format!("updating {}", component));

                    let output =
                        self.runner.run(&apply_cmd(&probe.command, &config), &self.root)?;
                    if !output.success() {
                        return Err(StackError::ApplyFailed {
                            target: component.id().to_string(),
                            stderr: output.stderr,
                        });
                    }
                    report.applied.push(component.id().to_string());
                }

                self.sink
                    .success(&format!("updated {} component(s)", report.applied.len()));
                Ok(report)
            }
        }
    }
}

fn apply_cmd(prefix: &[String], file: &str) -> Vec<String> {
    let mut cmd = prefix.to_vec();
    cmd.extend(["apply".to_string(), "-f".to_string(), file.to_string()]);
    cmd
}
