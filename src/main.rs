//! stackctl CLI entry point
//!
//! Usage: stackctl [-m stack.yml] <compose|kubernetes|k8s> <OPERATION>
//!
//! Operations:
//!   build   Build component images
//!   up      Bring the stack up
//!   down    Tear the stack down
//!   update  Re-apply component configuration

use clap::Parser;

use stackctl::cli::Cli;
use stackctl::commands;
use stackctl::exec::SystemRunner;
use stackctl::registry::PromptProvider;
use stackctl::ui::{ConsoleSink, SilentSink, StatusSink};
use stackctl::StackError;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let console = ConsoleSink::new(cli.verbose, cli.no_color);
    let silent = SilentSink;
    // In JSON mode the summary object is the only stdout output.
    let sink: &dyn StatusSink = if json { &silent } else { &console };

    match commands::dispatch(cli, sink, &SystemRunner, &PromptProvider) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            if json {
                let payload = serde_json::json!({
                    "success": false,
                    "error": format!("{:#}", err),
                });
                println!("{}", payload);
            } else {
                match err.downcast_ref::<StackError>() {
                    Some(stack) => console.error_panel(&stack.to_string(), stack.detail()),
                    None => console.error(&format!("{:#}", err)),
                }
            }
            std::process::exit(1);
        }
    }
}
