//! Leveled status sink
//!
//! The sequencer reports progress through [`StatusSink`] so it never talks
//! to the terminal directly. [`ConsoleSink`] renders styled text;
//! [`SilentSink`] swallows everything, used by tests and `--json` mode
//! where the summary object is the only stdout output.

use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use super::theme::{borders, borders_ascii, colors, IconSet};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

/// Receives leveled progress messages from the sequencer
pub trait StatusSink {
    fn emit(&self, level: Level, message: &str);

    /// Render a fatal diagnostic with optional captured stderr
    fn error_panel(&self, title: &str, detail: Option<&str>) {
        self.emit(Level::Error, title);
        if let Some(detail) = detail {
            for line in detail.lines() {
                self.emit(Level::Error, line);
            }
        }
    }

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Terminal sink with color and unicode auto-detection
pub struct ConsoleSink {
    color: bool,
    unicode: bool,
    verbose: u8,
    icons: IconSet,
}

impl ConsoleSink {
    pub fn new(verbose: u8, no_color: bool) -> Self {
        let tty = std::io::stdout().is_terminal();
        let color = tty && !no_color && std::env::var_os("NO_COLOR").is_none();
        let unicode = tty && std::env::var_os("STACKCTL_ASCII").is_none();
        Self {
            color,
            unicode,
            verbose,
            icons: IconSet::select(unicode),
        }
    }

    #[cfg(test)]
    fn plain(verbose: u8) -> Self {
        Self {
            color: false,
            unicode: false,
            verbose,
            icons: IconSet::select(false),
        }
    }

    fn paint(&self, text: &str, color: crossterm::style::Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Rows of the bordered error panel. Every row spans the same number
    /// of columns so the corners line up.
    fn panel_lines(&self, title: &str, detail: Option<&str>) -> Vec<String> {
        let b = if self.unicode {
            (
                borders::TOP_LEFT,
                borders::TOP_RIGHT,
                borders::BOTTOM_LEFT,
                borders::BOTTOM_RIGHT,
                borders::HORIZONTAL,
                borders::VERTICAL,
            )
        } else {
            (
                borders_ascii::TOP_LEFT,
                borders_ascii::TOP_RIGHT,
                borders_ascii::BOTTOM_LEFT,
                borders_ascii::BOTTOM_RIGHT,
                borders_ascii::HORIZONTAL,
                borders_ascii::VERTICAL,
            )
        };

        let detail_lines: Vec<&str> = detail
            .map(|d| d.lines().collect())
            .unwrap_or_default();
        let width = detail_lines
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(title.chars().count() + 2))
            .max()
            .unwrap_or(0)
            .max(20);

        let mut lines = Vec::with_capacity(detail_lines.len() + 2);
        lines.push(format!(
            "{}{} {} {}{}",
            self.paint(b.0, colors::ERROR),
            self.paint(b.4, colors::ERROR),
            self.paint(title, colors::ERROR),
            self.paint(
                &b.4.repeat(width.saturating_sub(title.chars().count() + 1)),
                colors::ERROR
            ),
            self.paint(b.1, colors::ERROR),
        ));
        for line in &detail_lines {
            lines.push(format!(
                "{} {:<width$} {}",
                self.paint(b.5, colors::ERROR),
                line,
                self.paint(b.5, colors::ERROR),
                width = width
            ));
        }
        lines.push(format!(
            "{}{}{}",
            self.paint(b.2, colors::ERROR),
            self.paint(&b.4.repeat(width + 2), colors::ERROR),
            self.paint(b.3, colors::ERROR),
        ));
        lines
    }

    fn render(&self, level: Level, message: &str) -> Option<String> {
        match level {
            Level::Debug => {
                if self.verbose == 0 {
                    return None;
                }
                Some(self.paint(message, colors::DIM))
            }
            Level::Info => Some(format!(
                "{} {}",
                self.paint(self.icons.step, colors::INFO),
                message
            )),
            Level::Success => Some(format!(
                "{} {}",
                self.paint(self.icons.success, colors::SUCCESS),
                message
            )),
            Level::Warning => Some(format!(
                "{} {}",
                self.paint(self.icons.warning, colors::WARNING),
                message
            )),
            Level::Error => Some(format!(
                "{} {}",
                self.paint(self.icons.error, colors::ERROR),
                message
            )),
        }
    }
}

impl StatusSink for ConsoleSink {
    fn emit(&self, level: Level, message: &str) {
        if let Some(line) = self.render(level, message) {
            if level >= Level::Warning {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        }
    }

    fn error_panel(&self, title: &str, detail: Option<&str>) {
        for line in self.panel_lines(title, detail) {
            eprintln!("{}", line);
        }
    }
}

/// Sink that discards everything
pub struct SilentSink;

impl StatusSink for SilentSink {
    fn emit(&self, _level: Level, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_suppressed_at_zero_verbosity() {
        let sink = ConsoleSink::plain(0);
        assert!(sink.render(Level::Debug, "probing").is_none());
    }

    #[test]
    fn debug_rendered_when_verbose() {
        let sink = ConsoleSink::plain(1);
        assert_eq!(sink.render(Level::Debug, "probing").as_deref(), Some("probing"));
    }

    #[test]
    fn info_uses_step_icon() {
        let sink = ConsoleSink::plain(0);
        assert_eq!(
            sink.render(Level::Info, "applying db").as_deref(),
            Some("-> applying db")
        );
    }

    #[test]
    fn error_uses_fail_icon() {
        let sink = ConsoleSink::plain(0);
        assert_eq!(
            sink.render(Level::Error, "apply failed").as_deref(),
            Some("[FAIL] apply failed")
        );
    }

    #[test]
    fn panel_rows_span_equal_columns() {
        let sink = ConsoleSink::plain(0);
        let lines = sink.panel_lines(
            "failed to apply shop-database-db",
            Some("connection refused\na much longer second line of captured stderr"),
        );
        assert_eq!(lines.len(), 4);
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(
            widths.iter().all(|w| *w == widths[0]),
            "panel rows must align; got widths {:?}:\n{}",
            widths,
            lines.join("\n")
        );
    }

    #[test]
    fn panel_without_detail_still_aligns() {
        let sink = ConsoleSink::plain(0);
        let lines = sink.panel_lines("failed to tear the stack down", None);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn silent_sink_swallows() {
        // Must not panic or print; nothing observable to assert beyond that.
        SilentSink.emit(Level::Error, "ignored");
        SilentSink.error_panel("ignored", Some("detail"));
    }

    #[test]
    fn level_ordering() {
        assert!(Level::Error > Level::Warning);
        assert!(Level::Warning > Level::Info);
        assert!(Level::Debug < Level::Info);
    }
}
