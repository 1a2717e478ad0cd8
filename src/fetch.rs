//! HTTP retrieval of binary image payloads.
//!
//! A tiny collaborator boundary: the image exporter asks for bytes by URL and
//! treats any failure as a per-record skip, so the trait only needs one
//! operation. Tests substitute a canned fetcher.

use crate::error::{HarvestError, Result};
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the payload at `url`; non-2xx responses are errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`ImageFetcher`] backed by a shared `reqwest` client.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)
            .map_err(|e| HarvestError::Params(format!("invalid image url {url:?}: {e}")))?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
