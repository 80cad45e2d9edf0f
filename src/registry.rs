//! Container registry authentication
//!
//! Credentials come from an injected [`CredentialProvider`] so the
//! sequencer's control flow stays testable without a live terminal. The
//! interactive provider wraps dialoguer prompts.

use std::path::Path;

use dialoguer::{Input, Password};

use crate::error::{StackError, StackResult};
use crate::exec::CommandRunner;
use crate::ui::StatusSink;

/// Registry credentials entered by the operator
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Supplies registry credentials on demand
pub trait CredentialProvider {
    fn credentials(&self, registry: &str) -> StackResult<Credentials>;
}

/// Interactive provider prompting on the terminal
pub struct PromptProvider;

impl CredentialProvider for PromptProvider {
    fn credentials(&self, registry: &str) -> StackResult<Credentials> {
        let username: String = Input::new()
            .with_prompt(format!("Username for {}", registry))
            .interact_text()
            .map_err(|e| StackError::Prompt(e.to_string()))?;
        let password: String = Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| StackError::Prompt(e.to_string()))?;
        Ok(Credentials { username, password })
    }
}

/// One authenticated exchange with a container registry
pub struct RegistrySession<'a> {
    runner: &'a dyn CommandRunner,
    provider: &'a dyn CredentialProvider,
    sink: &'a dyn StatusSink,
}

impl<'a> RegistrySession<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        provider: &'a dyn CredentialProvider,
        sink: &'a dyn StatusSink,
    ) -> Self {
        Self {
            runner,
            provider,
            sink,
        }
    }

    /// Authenticate against `host`, or the public default registry when
    /// absent. Returns the username so it can serve as the tag namespace
    /// when no registry host is configured.
    pub fn login(&self, host: Option<&str>, root: &Path) -> StackResult<String> {
        let display = match host {
            Some(host) => host.to_string(),
            None => {
                self.sink
                    .info("no registry configured, logging in to Docker Hub");
                "Docker Hub".to_string()
            }
        };

        let creds = self.provider.credentials(&display)?;

        let mut cmd = vec!["docker".to_string(), "login".to_string()];
        if let Some(host) = host {
            cmd.push(host.to_string());
        }
        cmd.extend([
            "-u".to_string(),
            creds.username.clone(),
            "-p".to_string(),
            creds.password,
        ]);

        let output = self.runner.run(&cmd, root)?;
        if !output.success() {
            return Err(StackError::AuthenticationFailed {
                registry: display,
                stderr: output.stderr,
            });
        }

        self.sink.success(&format!("logged in to {}", display));
        Ok(creds.username)
    }
}
