use std::io::Write;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Cargo-style status output on stderr.
///
/// Labels are right-padded to 12 columns. `Checking out` style action lines
/// are only shown when the reporter is verbose; warnings and errors always are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Bold green action line, e.g. `      Pinned github.com/foo/bar v1.2.0`.
    pub fn status(&self, label: &str, message: &str) {
        emit(Style::new().green().bold(), label, message);
    }

    /// Like [`Reporter::status`], but only printed in verbose mode.
    pub fn detail(&self, label: &str, message: &str) {
        if self.verbose {
            emit(Style::new().cyan().bold(), label, message);
        }
    }

    pub fn warn(&self, label: &str, message: &str) {
        emit(Style::new().yellow().bold(), label, message);
    }

    pub fn error(&self, label: &str, message: &str) {
        emit(Style::new().red().bold(), label, message);
    }

    /// Animated spinner for indeterminate work; hidden in verbose mode so it
    /// does not interleave with log output.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.verbose {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

fn emit(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}
