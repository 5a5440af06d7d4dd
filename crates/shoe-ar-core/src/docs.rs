//! Static instruction files written to the project root
//!
//! Content is produced by pure functions so it can be checked without touching
//! the filesystem; [`write_docs`] is the only part with side effects.

use crate::outcome::{Outcome, RunSummary};
use std::path::Path;

pub const IOS_SETUP_FILE: &str = "IOS_AR_SETUP.md";
pub const IOS_FALLBACK_FILE: &str = "ios-ar-fallback.html";
pub const README_FILE: &str = "README_ENHANCED.md";

const IOS_SETUP_TEMPLATE: &str = include_str!("../templates/IOS_AR_SETUP.md");
const IOS_FALLBACK_PAGE: &str = include_str!("../templates/ios-ar-fallback.html");
const README_TEMPLATE: &str = include_str!("../templates/README_ENHANCED.md");

/// A document to be written under the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFile {
    pub name: &'static str,
    pub contents: String,
}

/// iOS AR Quick Look notes; testing URLs point at `port`
#[must_use]
pub fn ios_setup_instructions(port: u16) -> String {
    IOS_SETUP_TEMPLATE.replace("{port}", &port.to_string())
}

/// model-viewer page that picks `models/<id>.glb|.usdz` from `?id=`
#[must_use]
pub fn ios_fallback_page() -> &'static str {
    IOS_FALLBACK_PAGE
}

#[must_use]
pub fn enhanced_readme(port: u16) -> String {
    README_TEMPLATE.replace("{port}", &port.to_string())
}

/// Documents emitted alongside USDZ generation
#[must_use]
pub fn ios_docs(port: u16) -> Vec<DocFile> {
    vec![
        DocFile {
            name: IOS_FALLBACK_FILE,
            contents: ios_fallback_page().to_string(),
        },
        DocFile {
            name: IOS_SETUP_FILE,
            contents: ios_setup_instructions(port),
        },
    ]
}

/// Documents emitted by project setup
#[must_use]
pub fn setup_docs(port: u16) -> Vec<DocFile> {
    vec![DocFile {
        name: README_FILE,
        contents: enhanced_readme(port),
    }]
}

/// Write each document to `root`, overwriting existing files
pub fn write_docs(root: &Path, docs: &[DocFile]) -> RunSummary {
    let mut summary = RunSummary::new();
    for doc in docs {
        let path = root.join(doc.name);
        let outcome = match std::fs::write(&path, &doc.contents) {
            Ok(()) => {
                tracing::debug!("Wrote {}", path.display());
                Outcome::Created { path }
            }
            Err(e) => Outcome::Failed {
                reason: format!("failed to write {}: {e}", path.display()),
            },
        };
        summary.push(doc.name, outcome);
    }
    summary
}
