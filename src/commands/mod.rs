//! CLI command handlers

mod platform;

pub use platform::dispatch;
