//! Asset store layout: model identifiers and the `models/` directory
//!
//! Every asset lives at `<root>/models/<id>.<ext>`. The identifier is the only
//! key joining a `.glb` to its `.usdz`; nothing else links the two files.

use crate::error::AssetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the models directory under the project root
pub const MODELS_DIR: &str = "models";

/// Identifiers shipped with the viewer
pub const DEFAULT_MODEL_IDS: [&str; 3] = ["1", "2", "3"];

/// Identifier of one shoe model, used as a file stem.
///
/// Restricted to ASCII alphanumerics, `-` and `_` so that `<id>.glb` can never
/// point outside the models directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Validate and wrap an identifier
    ///
    /// # Errors
    /// Returns [`AssetError::InvalidModelId`] for empty identifiers or ones
    /// containing characters outside `[A-Za-z0-9_-]`.
    pub fn new(id: impl Into<String>) -> Result<Self, AssetError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(id))
        } else {
            Err(AssetError::InvalidModelId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the identifier, or 0 when it is not a number
    #[must_use]
    pub fn number(&self) -> u32 {
        self.0.parse().unwrap_or(0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModelId {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModelId {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

/// The default identifier set
#[must_use]
pub fn default_model_ids() -> Vec<ModelId> {
    DEFAULT_MODEL_IDS
        .iter()
        .map(|id| ModelId((*id).to_string()))
        .collect()
}

/// The two asset kinds stored per identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Binary glTF scene
    Glb,
    /// ZIP-packaged scene for AR Quick Look
    Usdz,
}

impl AssetKind {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Glb => "glb",
            Self::Usdz => "usdz",
        }
    }

    /// File name for this kind, e.g. `2.usdz`
    #[must_use]
    pub fn file_name(self, id: &ModelId) -> String {
        format!("{id}.{}", self.extension())
    }
}

/// Handle on a project root holding the `models/` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join(MODELS_DIR)
    }

    pub fn asset_path(&self, id: &ModelId, kind: AssetKind) -> PathBuf {
        self.models_dir().join(kind.file_name(id))
    }

    pub fn glb_path(&self, id: &ModelId) -> PathBuf {
        self.asset_path(id, AssetKind::Glb)
    }

    pub fn usdz_path(&self, id: &ModelId) -> PathBuf {
        self.asset_path(id, AssetKind::Usdz)
    }

    /// Create the models directory if it is missing. Idempotent.
    ///
    /// # Errors
    /// Returns an IO error if the directory cannot be created.
    pub fn ensure_layout(&self) -> Result<(), AssetError> {
        let dir = self.models_dir();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!("Models directory ready: {}", dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_model_id_validation() {
        assert!(ModelId::new("1").is_ok());
        assert!(ModelId::new("shoe_7-b").is_ok());
        assert!(ModelId::new("").is_err());
        assert!(ModelId::new("../etc").is_err());
        assert!(ModelId::new("a/b").is_err());
        assert!(ModelId::new("1.glb").is_err());
    }

    #[test]
    fn test_model_id_number() {
        assert_eq!(ModelId::new("3").unwrap().number(), 3);
        assert_eq!(ModelId::new("12").unwrap().number(), 12);
        assert_eq!(ModelId::new("sneaker").unwrap().number(), 0);
        assert_eq!(ModelId::new("-1").unwrap().number(), 0);
    }

    #[test]
    fn test_model_id_deserialize_rejects_invalid() {
        let ok: Result<Vec<ModelId>, _> = serde_json::from_str(r#"["1", "2"]"#);
        assert_eq!(ok.unwrap().len(), 2);

        let bad: Result<Vec<ModelId>, _> = serde_json::from_str(r#"["../x"]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_default_ids() {
        let ids: Vec<String> = default_model_ids().into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_asset_paths() {
        let store = AssetStore::new("/srv/shoe-ar");
        let id = ModelId::new("2").unwrap();
        assert_eq!(store.models_dir(), PathBuf::from("/srv/shoe-ar/models"));
        assert_eq!(store.glb_path(&id), PathBuf::from("/srv/shoe-ar/models/2.glb"));
        assert_eq!(store.usdz_path(&id), PathBuf::from("/srv/shoe-ar/models/2.usdz"));
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        store.ensure_layout().unwrap();
        store.ensure_layout().unwrap();
        assert!(store.models_dir().is_dir());
    }
}
