//! Availability check for optional external tools

use crate::outcome::{Outcome, RunSummary};
use std::process::Command;

/// Tools the viewer's development workflow can use but does not require
pub const OPTIONAL_TOOLS: [&str; 1] = ["node"];

/// Run `<program> --version` and report what it printed
#[must_use]
pub fn check_tool(program: &str) -> Outcome {
    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Outcome::Available {
                detail: if version.is_empty() {
                    "version unknown".to_string()
                } else {
                    version
                },
            }
        }
        Ok(output) => Outcome::Unavailable {
            reason: format!("`{program} --version` exited with {}", output.status),
        },
        Err(e) => Outcome::Unavailable {
            reason: format!("optional for development: {e}"),
        },
    }
}

/// Check every optional tool; never fails
#[must_use]
pub fn check_optional_tools() -> RunSummary {
    let mut summary = RunSummary::new();
    for tool in OPTIONAL_TOOLS {
        summary.push(tool, check_tool(tool));
    }
    summary
}
