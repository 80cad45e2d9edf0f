//! External command execution
//!
//! Everything the tool does to the outside world goes through one
//! [`CommandRunner`] abstraction, so exit-status handling and error
//! mapping are written once.

mod command;
mod probe;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub(crate) use command::display;
pub use probe::{probe_invocation, ProbeResult};
