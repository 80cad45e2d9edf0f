//! Console presentation

pub mod sink;
pub mod theme;

pub use sink::{ConsoleSink, Level, SilentSink, StatusSink};
