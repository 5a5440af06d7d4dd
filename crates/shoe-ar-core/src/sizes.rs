//! GLB size report for mobile performance tuning

use crate::error::AssetError;
use serde::Serialize;
use std::path::Path;

/// Models above this size are flagged (1 MiB)
pub const LARGE_MODEL_BYTES: u64 = 1024 * 1024;

pub const OPTIMIZATION_TIPS: [&str; 4] = [
    "Use Draco compression for GLB files",
    "Reduce texture sizes for mobile devices",
    "Simplify geometry for better performance",
    "Use LOD (Level of Detail) models",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSize {
    pub name: String,
    pub bytes: u64,
}

impl ModelSize {
    #[must_use]
    pub const fn is_large(&self) -> bool {
        self.bytes > LARGE_MODEL_BYTES
    }

    /// Size formatted as kilobytes with one decimal, e.g. `12.5 KB`
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // display only
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.bytes as f64 / 1024.0)
    }
}

/// Sizes of every `*.glb` directly inside `models_dir`, sorted by name.
///
/// A missing directory yields an empty list.
///
/// # Errors
/// Returns an IO error if the directory exists but cannot be listed.
pub fn model_sizes(models_dir: &Path) -> Result<Vec<ModelSize>, AssetError> {
    if !models_dir.exists() {
        return Ok(Vec::new());
    }

    let mut sizes = Vec::new();
    for entry in std::fs::read_dir(models_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_glb = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("glb"));
        let metadata = entry.metadata()?;
        if !is_glb || !metadata.is_file() {
            continue;
        }
        sizes.push(ModelSize {
            name: entry.file_name().to_string_lossy().into_owned(),
            bytes: metadata.len(),
        });
    }
    sizes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sizes)
}
