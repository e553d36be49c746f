//! Scrape-based fallback provider
//!
//! Normalizes the post URL, POSTs it as a form to the download service,
//! decodes the obfuscated response and extracts ranked variants from the
//! recovered download table.

use crate::core::ResolvedMedia;
use crate::error::IgdlError;
use crate::provider::{decoder, table, Provider};
use crate::utils::url::normalize;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Fixed scrape endpoint
const SNAPSAVE_ENDPOINT: &str = "https://snapsave.app/action.php?lang=en";

/// Referer the service expects from its own form page
const SNAPSAVE_REFERER: &str = "https://snapsave.app/";

/// Provider backed by the snapsave scrape service
pub struct SnapSaveProvider {
    client: Client,
    endpoint: String,
}

impl SnapSaveProvider {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: SNAPSAVE_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint, for tests against a local stub
    #[cfg(test)]
    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Provider for SnapSaveProvider {
    fn name(&self) -> &'static str {
        "snapsave"
    }

    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, IgdlError> {
        let normalized = normalize(url);
        debug!(url = %normalized, "posting to scrape endpoint");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Referer", SNAPSAVE_REFERER)
            .header("Origin", "https://snapsave.app")
            .form(&[("url", normalized.as_str())])
            .send()
            .await?;
        let raw = response.text().await?;

        let fragment = decoder::decode(&raw)?;
        let variants = table::parse_download_table(&fragment)?;
        debug!(count = variants.len(), "scrape provider recovered variants");

        Ok(ResolvedMedia { variants })
    }
}
