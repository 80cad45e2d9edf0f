//! Operation dispatch
//!
//! Bridges the parsed CLI to the sequencer: loads the plan, runs the
//! selected operation with the injected runner and credential provider,
//! and renders the summary. Returns the process exit code so the
//! partial-failure path stays observable in tests; only `main` exits.

use std::path::Path;

use anyhow::Result;

use crate::cli::{Cli, Operation};
use crate::exec::CommandRunner;
use crate::manifest;
use crate::registry::CredentialProvider;
use crate::sequencer::{BuildOptions, Sequencer, UpOptions};
use crate::ui::StatusSink;

pub fn dispatch(
    cli: Cli,
    sink: &dyn StatusSink,
    runner: &dyn CommandRunner,
    provider: &dyn CredentialProvider,
) -> Result<i32> {
    let plan = manifest::load(&cli.manifest)?;

    // Manifest paths are relative to the manifest's own directory.
    let root = cli
        .manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let (platform, operation) = cli.platform.split();
    let sequencer = Sequencer::new(&plan, platform.driver(), runner, provider, sink, root);

    match operation {
        Operation::Build { push } => {
            let report = sequencer.build(&BuildOptions { push })?;
            if cli.json {
                let summary = serde_json::json!({
                    "event": "build",
                    "platform": platform.as_str(),
                    "success": true,
                    "tags": report.tags,
                    "skipped": report.skipped,
                });
                println!("{}", serde_json::to_string(&summary)?);
            }
            Ok(0)
        }

        Operation::Up {
            ignore,
            build,
            restart,
        } => {
            let report = sequencer.up(&UpOptions {
                ignore,
                build,
                restart,
            })?;
            if cli.json {
                let summary = serde_json::json!({
                    "event": "up",
                    "platform": platform.as_str(),
                    "success": report.is_clean(),
                    "applied": report.applied,
                    "failed": report.failed,
                });
                println!("{}", serde_json::to_string(&summary)?);
            }
            if !report.is_clean() {
                sink.error(&format!(
                    "{} component(s) failed to apply",
                    report.failed.len()
                ));
                return Ok(1);
            }
            Ok(0)
        }

        Operation::Down => {
            sequencer.down()?;
            if cli.json {
                let summary = serde_json::json!({
                    "event": "down",
                    "platform": platform.as_str(),
                    "success": true,
                });
                println!("{}", serde_json::to_string(&summary)?);
            }
            Ok(0)
        }

        Operation::Update => {
            let report = sequencer.update()?;
            if cli.json {
                let summary = serde_json::json!({
                    "event": "update",
                    "platform": platform.as_str(),
                    "success": true,
                    "applied": report.applied,
                });
                println!("{}", serde_json::to_string(&summary)?);
            }
            Ok(0)
        }

        Operation::Restart | Operation::Status | Operation::Logs => {
            let name = match operation {
                Operation::Restart => "restart",
                Operation::Status => "status",
                _ => "logs",
            };
            sink.warn(&format!("'{}' is not implemented yet", name));
            if cli.json {
                let summary = serde_json::json!({
                    "event": name,
                    "platform": platform.as_str(),
                    "success": true,
                    "implemented": false,
                });
                println!("{}", serde_json::to_string(&summary)?);
            }
            Ok(0)
        }
    }
}
