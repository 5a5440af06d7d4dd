//! Placeholder USDZ generation from existing GLB files
//!
//! Generation is gated on the presence of `<id>.glb`, never on its content:
//! the GLB bytes are not read. Each identifier is handled independently and a
//! failure for one does not stop the others.

use crate::outcome::{Outcome, RunSummary};
use crate::scene::scene_description;
use crate::store::{AssetStore, ModelId};
use crate::usdz::{entry_name, write_usdz};
use tracing::{info, warn};

/// Build `<id>.usdz` for every identifier whose `<id>.glb` exists.
///
/// Existing `.usdz` files are overwritten.
pub fn generate_placeholders(store: &AssetStore, ids: &[ModelId]) -> RunSummary {
    info!(
        "Generating USDZ placeholders for {} models in {}",
        ids.len(),
        store.models_dir().display()
    );

    let mut summary = RunSummary::new();
    for id in ids {
        summary.push(id.as_str(), generate_one(store, id));
    }
    summary
}

fn generate_one(store: &AssetStore, id: &ModelId) -> Outcome {
    let glb = store.glb_path(id);
    if !glb.exists() {
        warn!("No GLB for model {}, skipping", id);
        return Outcome::Skipped {
            reason: format!("GLB file not found: {}", glb.display()),
        };
    }

    let usdz = store.usdz_path(id);
    let scene = scene_description(id);
    match write_usdz(&usdz, &entry_name(id.as_str()), &scene) {
        Ok(()) => Outcome::Created { path: usdz },
        Err(e) => {
            warn!("Failed to write {}: {}", usdz.display(), e);
            Outcome::Failed {
                reason: format!("failed to write {}: {e}", usdz.display()),
            }
        }
    }
}
