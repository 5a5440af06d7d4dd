//! Per-item results of a best-effort run
//!
//! Every stage processes a fixed list of items (identifiers, source files,
//! documents) and records one [`Outcome`] per item instead of stopping at the
//! first failure. Callers render the summary or assert on it directly.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Console severity of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// What happened to one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// File generated locally
    Created { path: PathBuf },
    /// File fetched from its remote source
    Downloaded { path: PathBuf, bytes: u64 },
    /// File already there, left untouched
    Present { path: PathBuf, placeholder: bool },
    /// Existing USDZ is still a marker; only the generator replaces it
    Unconverted { path: PathBuf },
    /// Marker file written because no real asset is available
    Placeholder { path: PathBuf, reason: String },
    /// Fetch failed; a marker file was written in its place
    Recovered { path: PathBuf, error: String },
    /// Nothing to do for this item
    Skipped { reason: String },
    /// The item could not be processed
    Failed { reason: String },
    /// External tool found
    Available { detail: String },
    /// External tool missing; optional
    Unavailable { reason: String },
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

impl Outcome {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Created { .. } | Self::Downloaded { .. } | Self::Available { .. } => {
                Severity::Success
            }
            Self::Present {
                placeholder: false, ..
            } => Severity::Info,
            Self::Present {
                placeholder: true, ..
            }
            | Self::Unconverted { .. }
            | Self::Placeholder { .. }
            | Self::Skipped { .. }
            | Self::Unavailable { .. } => Severity::Warning,
            Self::Recovered { .. } | Self::Failed { .. } => Severity::Error,
        }
    }

    /// Whether the item ended up unprocessed
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Human-readable status line body for `item`
    #[must_use]
    pub fn message(&self, item: &str) -> String {
        match self {
            Self::Created { path } => format!("Created {}", file_name(path)),
            Self::Downloaded { path, bytes } => {
                format!("Downloaded {item} ({bytes} bytes) to {}", path.display())
            }
            Self::Present {
                placeholder: false, ..
            } => format!("{item} already present, skipping"),
            Self::Present {
                placeholder: true, ..
            } => format!(
                "{item} is a placeholder marker; delete it or pass --retry-placeholders to fetch it again"
            ),
            Self::Unconverted { .. } => format!(
                "{item} is a placeholder marker; run `shoe-ar create-usdz` to generate it"
            ),
            Self::Placeholder { path, reason } => {
                format!("Created placeholder {} ({reason})", file_name(path))
            }
            Self::Recovered { path, error } => format!(
                "Failed to download {item}: {error}; wrote placeholder {}",
                file_name(path)
            ),
            Self::Skipped { reason } => reason.clone(),
            Self::Failed { reason } => format!("{item}: {reason}"),
            Self::Available { detail } => format!("{item} found ({detail})"),
            Self::Unavailable { reason } => format!("{item} not found ({reason})"),
        }
    }
}

/// Outcome of one item, keyed by its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub item: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ItemReport {
    #[must_use]
    pub fn message(&self) -> String {
        self.outcome.message(&self.item)
    }
}

/// Ordered collection of item outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub items: Vec<ItemReport>,
}

impl RunSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Into<String>, outcome: Outcome) {
        self.items.push(ItemReport {
            item: item.into(),
            outcome,
        });
    }

    /// Append another summary, keeping order
    pub fn extend(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First outcome recorded for `item`
    #[must_use]
    pub fn outcome_for(&self, item: &str) -> Option<&Outcome> {
        self.items
            .iter()
            .find(|report| report.item == item)
            .map(|report| &report.outcome)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.items
            .iter()
            .filter(|report| report.outcome.severity() == severity)
            .count()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.items.iter().any(|report| report.outcome.is_failure())
    }
}
