//! Remote asset fetching
//!
//! Provisioning goes through the [`Fetch`] trait so the download step can be
//! swapped out. [`HttpFetcher`] is the real implementation: a single GET per
//! URL with a timeout, no retry and no checksum verification.

use crate::error::AssetError;
use reqwest::Client as HttpClient;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Source of remote asset bytes
pub trait Fetch {
    /// Fetch the full body behind `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, AssetError>> + Send;
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: HttpClient,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    ///
    /// # Errors
    /// Returns [`AssetError::Http`] if the client cannot be built (TLS backend
    /// initialisation failure).
    pub fn new(timeout: Duration) -> Result<Self, AssetError> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("shoe-ar/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

/// Reject anything other than http:// and https://
fn validate_scheme(url: &str) -> Result<(), AssetError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(AssetError::InvalidUrl(url.to_string()))
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        validate_scheme(url)?;
        info!("Downloading {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(size) = response.content_length() {
            debug!("Download size: {} bytes", size);
        }

        let bytes = response.bytes().await?;
        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
