//! ZIP packaging of a scene into a `.usdz`-named container
//!
//! The result is a plain ZIP whose single member is the USDA text. It is not a
//! conforming USDZ package (no alignment padding, deflated member), only the
//! container shape AR Quick Look testing needs.

use crate::error::AssetError;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Content type served for `.usdz` files
pub const USDZ_CONTENT_TYPE: &str = "model/vnd.usdz+zip";

/// Member name inside the archive for a scene, e.g. `1.usd`
#[must_use]
pub fn entry_name(stem: &str) -> String {
    format!("{stem}.usd")
}

/// Write `scene` into a ZIP at `dest` as the single member `entry`.
///
/// The archive is staged in a temporary file next to `dest` and moved into
/// place once complete, so a failed write never leaves a truncated `.usdz`
/// behind. The member timestamp is pinned to the ZIP epoch so identical input
/// yields identical bytes.
///
/// # Errors
/// Returns [`AssetError::Io`] or [`AssetError::Zip`] if staging, writing or
/// renaming fails.
pub fn write_usdz(dest: &Path, entry: &str, scene: &str) -> Result<(), AssetError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staged = tempfile::Builder::new()
        .prefix(".usdz-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tracing::debug!("Staging {} at {}", entry, staged.path().display());

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(staged);
    zip.start_file(entry, options)?;
    zip.write_all(scene.as_bytes())?;
    let staged = zip.finish()?;

    staged.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
