//! Console status lines: `SEVERITY: message`, colored by severity

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use shoe_ar_core::{RunSummary, Severity};

fn paint(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Info => text.blue(),
        Severity::Success => text.green(),
        Severity::Warning => text.yellow(),
        Severity::Error => text.red(),
    }
}

/// Uncolored `SEVERITY: message` line
pub fn format_status(severity: Severity, message: &str) -> String {
    format!("{}: {}", severity.label(), message)
}

/// Prints status lines, or only the final JSON document in `--json` mode
pub struct Reporter {
    json: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn status(&self, severity: Severity, message: impl AsRef<str>) {
        if self.json {
            return;
        }
        let line = format_status(severity, message.as_ref());
        println!("{}", paint(severity, &line));
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.status(Severity::Info, message);
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.status(Severity::Success, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.status(Severity::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.status(Severity::Error, message);
    }

    /// One line per item in `summary`
    pub fn summary(&self, summary: &RunSummary) {
        for report in summary.iter() {
            self.status(report.outcome.severity(), report.message());
        }
    }

    /// Emit the machine-readable result in `--json` mode
    pub fn finish<T: Serialize>(&self, value: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}
