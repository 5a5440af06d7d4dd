//! Asset provisioning: make sure every expected model path holds a file
//!
//! Missing `.glb` files are fetched from their configured source; when the
//! fetch fails a short marker text file is written instead, so the path is
//! always populated after a run. Missing `.usdz` files always get a marker;
//! generating real archives is the generator's job.
//!
//! Existing files are never re-fetched, which means a marker left by an
//! earlier failed download masks the real asset. Markers are detected and
//! reported, and [`ProvisionOptions::retry_placeholders`] opts into fetching
//! them again.

use crate::error::AssetError;
use crate::fetch::Fetch;
use crate::outcome::{Outcome, RunSummary};
use crate::store::{AssetStore, ModelId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Marker text written when a GLB download fails
pub const GLB_PLACEHOLDER: &str = "# Placeholder - replace with actual GLB model";

/// Marker text written for a USDZ that has not been generated
pub const USDZ_PLACEHOLDER: &str =
    "# USDZ placeholder - convert from GLB using Reality Converter or similar tool";

const SAMPLE_MODELS_BASE: &str =
    "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0";

/// Remote origin of one model file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSource {
    /// File name inside the models directory, e.g. `1.glb`
    pub file: String,
    /// HTTP(S) URL to download it from
    pub url: String,
}

impl AssetSource {
    pub fn new(file: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            url: url.into(),
        }
    }

    /// Destination path, refusing names that are not a bare file name
    fn destination(&self, models_dir: &Path) -> Result<PathBuf, AssetError> {
        let name = Path::new(&self.file);
        match name.file_name() {
            Some(file_name) if file_name == name.as_os_str() => Ok(models_dir.join(name)),
            _ => Err(AssetError::InvalidFileName(self.file.clone())),
        }
    }
}

/// Khronos glTF sample models used as stand-in shoes
#[must_use]
pub fn default_sources() -> Vec<AssetSource> {
    [
        ("1.glb", "Duck/glTF-Binary/Duck.glb"),
        ("2.glb", "Box/glTF-Binary/Box.glb"),
        ("3.glb", "Sphere/glTF-Binary/Sphere.glb"),
    ]
    .into_iter()
    .map(|(file, path)| AssetSource::new(file, format!("{SAMPLE_MODELS_BASE}/{path}")))
    .collect()
}

/// Knobs for [`provision`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Fetch again when the existing file is a marker from a failed download
    pub retry_placeholders: bool,
}

/// Whether `path` holds one of our marker texts rather than a real asset
///
/// # Errors
/// Returns an IO error if the file cannot be read.
pub fn is_placeholder_marker(path: &Path) -> Result<bool, AssetError> {
    let longest = GLB_PLACEHOLDER.len().max(USDZ_PLACEHOLDER.len());
    let mut head = Vec::with_capacity(longest);
    File::open(path)?
        .take(longest as u64)
        .read_to_end(&mut head)?;
    Ok(head.starts_with(GLB_PLACEHOLDER.as_bytes())
        || head.starts_with(USDZ_PLACEHOLDER.as_bytes()))
}

fn present(path: PathBuf) -> (Outcome, bool) {
    let placeholder = match is_placeholder_marker(&path) {
        Ok(marker) => marker,
        Err(e) => {
            debug!("Could not inspect {}: {}", path.display(), e);
            false
        }
    };
    (Outcome::Present { path, placeholder }, placeholder)
}

/// Populate the store: fetch missing GLBs, write markers for missing USDZs.
///
/// Runs sequentially, one request at a time. Sources whose file already exists
/// are not requested.
///
/// # Errors
/// Returns an error only if the models directory cannot be created; per-file
/// failures are recorded in the summary.
pub async fn provision<F: Fetch>(
    store: &AssetStore,
    ids: &[ModelId],
    sources: &[AssetSource],
    fetcher: &F,
    options: ProvisionOptions,
) -> Result<RunSummary, AssetError> {
    store.ensure_layout()?;
    let models_dir = store.models_dir();
    info!(
        "Provisioning {} sources and {} USDZ slots in {}",
        sources.len(),
        ids.len(),
        models_dir.display()
    );

    let mut summary = RunSummary::new();

    for source in sources {
        let path = match source.destination(&models_dir) {
            Ok(path) => path,
            Err(e) => {
                summary.push(source.file.as_str(), Outcome::Failed {
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if path.exists() {
            let (outcome, placeholder) = present(path.clone());
            if !(placeholder && options.retry_placeholders) {
                summary.push(source.file.as_str(), outcome);
                continue;
            }
            info!("Retrying placeholder {}", path.display());
        }

        summary.push(source.file.as_str(), fetch_into(fetcher, source, path).await);
    }

    for id in ids {
        let path = store.usdz_path(id);
        let item = path
            .file_name()
            .map_or_else(|| id.to_string(), |n| n.to_string_lossy().into_owned());
        if path.exists() {
            let outcome = match present(path) {
                (Outcome::Present { path, .. }, true) => Outcome::Unconverted { path },
                (outcome, _) => outcome,
            };
            summary.push(item, outcome);
            continue;
        }
        let outcome = match std::fs::write(&path, USDZ_PLACEHOLDER) {
            Ok(()) => Outcome::Placeholder {
                path,
                reason: "run `shoe-ar create-usdz` to generate it".to_string(),
            },
            Err(e) => Outcome::Failed {
                reason: format!("failed to write placeholder: {e}"),
            },
        };
        summary.push(item, outcome);
    }

    Ok(summary)
}

async fn fetch_into<F: Fetch>(fetcher: &F, source: &AssetSource, path: PathBuf) -> Outcome {
    match fetcher.fetch(&source.url).await {
        Ok(bytes) => match std::fs::write(&path, &bytes) {
            Ok(()) => Outcome::Downloaded {
                path,
                bytes: bytes.len() as u64,
            },
            Err(e) => Outcome::Failed {
                reason: format!("failed to write {}: {e}", path.display()),
            },
        },
        Err(fetch_err) => {
            warn!("Failed to download {}: {}", source.url, fetch_err);
            match std::fs::write(&path, GLB_PLACEHOLDER) {
                Ok(()) => Outcome::Recovered {
                    path,
                    error: fetch_err.to_string(),
                },
                Err(e) => Outcome::Failed {
                    reason: format!(
                        "download failed ({fetch_err}) and placeholder could not be written: {e}"
                    ),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Severity;
    use crate::store::default_model_ids;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Records every requested URL; URLs containing "missing" fail
    #[derive(Default)]
    struct RecordingFetcher {
        requests: Mutex<Vec<String>>,
    }

    impl RecordingFetcher {
        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Fetch for RecordingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
            self.requests.lock().unwrap().push(url.to_string());
            if url.contains("missing") {
                Err(AssetError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                })
            } else {
                Ok(b"glTF\x02\x00\x00\x00".to_vec())
            }
        }
    }

    fn sources() -> Vec<AssetSource> {
        vec![
            AssetSource::new("1.glb", "https://assets.test/Duck.glb"),
            AssetSource::new("2.glb", "https://assets.test/missing/Box.glb"),
        ]
    }

    #[tokio::test]
    async fn test_populates_every_path() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let fetcher = RecordingFetcher::default();
        let ids = default_model_ids();

        let summary = provision(&store, &ids, &sources(), &fetcher, ProvisionOptions::default())
            .await
            .unwrap();

        assert!(!summary.has_failures());
        assert!(matches!(
            summary.outcome_for("1.glb"),
            Some(Outcome::Downloaded { bytes: 8, .. })
        ));
        assert!(matches!(
            summary.outcome_for("2.glb"),
            Some(Outcome::Recovered { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(store.models_dir().join("2.glb")).unwrap(),
            GLB_PLACEHOLDER
        );
        for id in &ids {
            assert_eq!(
                std::fs::read_to_string(store.usdz_path(id)).unwrap(),
                USDZ_PLACEHOLDER
            );
        }
        assert_eq!(summary.count(Severity::Error), 1);
    }

    #[tokio::test]
    async fn test_second_run_makes_no_requests() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let ids = default_model_ids();

        let first = RecordingFetcher::default();
        provision(&store, &ids, &sources(), &first, ProvisionOptions::default())
            .await
            .unwrap();
        assert_eq!(first.requests().len(), 2);

        let second = RecordingFetcher::default();
        let summary = provision(&store, &ids, &sources(), &second, ProvisionOptions::default())
            .await
            .unwrap();
        assert!(second.requests().is_empty());
        assert!(summary
            .iter()
            .all(|r| matches!(
                r.outcome,
                Outcome::Present { .. } | Outcome::Unconverted { .. }
            )));
    }

    #[tokio::test]
    async fn test_markers_are_flagged_and_retried_on_request() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        store.ensure_layout().unwrap();
        std::fs::write(store.models_dir().join("1.glb"), GLB_PLACEHOLDER).unwrap();
        let fetcher = RecordingFetcher::default();

        let summary = provision(&store, &[], &sources()[..1], &fetcher, ProvisionOptions::default())
            .await
            .unwrap();
        assert!(matches!(
            summary.outcome_for("1.glb"),
            Some(Outcome::Present {
                placeholder: true,
                ..
            })
        ));
        assert!(fetcher.requests().is_empty());

        let retry = ProvisionOptions {
            retry_placeholders: true,
        };
        let summary = provision(&store, &[], &sources()[..1], &fetcher, retry)
            .await
            .unwrap();
        assert!(matches!(
            summary.outcome_for("1.glb"),
            Some(Outcome::Downloaded { .. })
        ));
        assert_eq!(fetcher.requests(), vec!["https://assets.test/Duck.glb"]);
    }

    #[tokio::test]
    async fn test_usdz_markers_point_at_generator() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let ids = vec![ModelId::new("1").unwrap(), ModelId::new("2").unwrap()];
        let fetcher = RecordingFetcher::default();
        provision(&store, &ids, &[], &fetcher, ProvisionOptions::default())
            .await
            .unwrap();
        std::fs::write(store.usdz_path(&ids[1]), b"PK\x03\x04").unwrap();

        let retry = ProvisionOptions {
            retry_placeholders: true,
        };
        let summary = provision(&store, &ids, &[], &fetcher, retry).await.unwrap();

        let marker = summary.outcome_for("1.usdz").unwrap();
        assert!(matches!(marker, Outcome::Unconverted { .. }));
        assert_eq!(marker.severity(), Severity::Warning);
        let line = marker.message("1.usdz");
        assert!(line.contains("shoe-ar create-usdz"), "{line}");
        assert!(!line.contains("--retry-placeholders"), "{line}");
        assert!(matches!(
            summary.outcome_for("2.usdz"),
            Some(Outcome::Present {
                placeholder: false,
                ..
            })
        ));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_retry_leaves_real_assets_alone() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        store.ensure_layout().unwrap();
        std::fs::write(store.models_dir().join("1.glb"), b"glTF real").unwrap();
        let fetcher = RecordingFetcher::default();
        let retry = ProvisionOptions {
            retry_placeholders: true,
        };

        provision(&store, &[], &sources()[..1], &fetcher, retry)
            .await
            .unwrap();
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_source_names_outside_models_dir() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let fetcher = RecordingFetcher::default();
        let bad = vec![AssetSource::new("../escape.glb", "https://assets.test/x.glb")];

        let summary = provision(&store, &[], &bad, &fetcher, ProvisionOptions::default())
            .await
            .unwrap();
        assert!(summary.has_failures());
        assert!(fetcher.requests().is_empty());
        assert!(!dir.path().join("escape.glb").exists());
    }

    #[test]
    fn test_marker_detection() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("m.usdz");
        let real = dir.path().join("r.usdz");
        let short = dir.path().join("s.glb");
        std::fs::write(&marker, USDZ_PLACEHOLDER).unwrap();
        std::fs::write(&real, b"PK\x03\x04").unwrap();
        std::fs::write(&short, b"#").unwrap();

        assert!(is_placeholder_marker(&marker).unwrap());
        assert!(!is_placeholder_marker(&real).unwrap());
        assert!(!is_placeholder_marker(&short).unwrap());
    }

    #[test]
    fn test_default_sources() {
        let sources = default_sources();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].file, "1.glb");
        assert!(sources[0].url.ends_with("/Duck/glTF-Binary/Duck.glb"));
        assert!(sources[2].url.ends_with("/Sphere/glTF-Binary/Sphere.glb"));
    }
}
