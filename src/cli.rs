use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::sequencer::Platform;

/// stackctl - container stack deployment tool
#[derive(Parser, Debug)]
#[command(name = "stackctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the stack manifest
    #[arg(short, long, default_value = "stack.yml", global = true)]
    pub manifest: PathBuf,

    /// Output a machine-readable summary
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub platform: PlatformCommand,
}

#[derive(Subcommand, Debug)]
pub enum PlatformCommand {
    /// Deploy with the compose CLI
    Compose {
        #[command(subcommand)]
        operation: Operation,
    },

    /// Deploy to a Kubernetes cluster
    #[command(alias = "k8s")]
    Kubernetes {
        #[command(subcommand)]
        operation: Operation,
    },
}

impl PlatformCommand {
    pub fn split(self) -> (Platform, Operation) {
        match self {
            PlatformCommand::Compose { operation } => (Platform::Compose, operation),
            PlatformCommand::Kubernetes { operation } => (Platform::Kubernetes, operation),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Operation {
    /// Build component images
    Build {
        /// Push built images where the manifest policy allows
        #[arg(
            short,
            long,
            action = clap::ArgAction::Set,
            num_args = 0..=1,
            default_value_t = true,
            default_missing_value = "true"
        )]
        push: bool,
    },

    /// Bring the stack up
    Up {
        /// Continue past per-component apply failures
        #[arg(long)]
        ignore: bool,

        /// Build and push images first
        #[arg(short, long)]
        build: bool,

        /// Tear the stack down first
        #[arg(short, long)]
        restart: bool,
    },

    /// Tear the stack down
    Down,

    /// Re-apply component configuration only
    Update,

    /// Restart individual components (reserved)
    Restart,

    /// Show stack status (reserved)
    Status,

    /// Show component logs (reserved)
    Logs,
}
