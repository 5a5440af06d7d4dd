//! shoe-ar-core: asset tooling for the shoe AR viewer
//!
//! This crate provides:
//! - The asset store layout (`<root>/models/<id>.glb|.usdz`)
//! - Placeholder USDZ generation for AR Quick Look testing
//! - Provisioning of sample GLB models with marker-file fallback
//! - Generated setup documents
//! - A GLB size report and an optional-tool check
//!
//! Every multi-item operation is best effort and returns a [`RunSummary`] with
//! one [`Outcome`] per item.

pub mod config;
pub mod docs;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod outcome;
pub mod provision;
pub mod scene;
pub mod sizes;
pub mod store;
pub mod tooling;
pub mod usdz;

// Re-exports for convenience
pub use config::{resolve_config, Config};
pub use error::AssetError;
pub use fetch::{Fetch, HttpFetcher};
pub use generator::generate_placeholders;
pub use outcome::{ItemReport, Outcome, RunSummary, Severity};
pub use provision::{provision, AssetSource, ProvisionOptions};
pub use scene::scene_description;
pub use store::{AssetKind, AssetStore, ModelId};
pub use usdz::USDZ_CONTENT_TYPE;
