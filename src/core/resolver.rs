//! Resolution orchestrator: the fallback chain over all providers

use crate::core::ResolvedMedia;
use crate::error::{IgdlError, ProviderFailure};
use crate::provider::{build_client, CobaltProvider, HttpClientConfig, Provider, SnapSaveProvider};
use crate::utils::url::is_post_url;
use std::time::Duration;
use tracing::{info, warn};

/// Resolves post URLs by trying providers in a fixed priority order.
///
/// The structured API goes first; the scrape path is the fallback when
/// the API is unreachable or returns nothing useful. Providers run
/// strictly sequentially and the first success short-circuits the chain.
pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
    deadline: Option<Duration>,
}

impl Resolver {
    /// Create a resolver with the default provider chain
    pub fn new() -> Result<Self, IgdlError> {
        let config = HttpClientConfig::default();
        let client = build_client(&config)?;
        Ok(Self::with_providers(vec![
            Box::new(CobaltProvider::new(client.clone())),
            Box::new(SnapSaveProvider::new(client)),
        ]))
    }

    /// Create a resolver over an explicit provider chain
    pub fn with_providers(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            deadline: None,
        }
    }

    /// Set a per-request deadline covering the whole chain
    pub fn with_timeout(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Resolve a raw post URL into a ranked, non-empty variant list.
    ///
    /// Input that doesn't match the post-path allowlist fails fast with
    /// `InvalidUrl` before any provider is charged a network round-trip.
    /// Individual provider failures are recorded and the next provider
    /// runs; only exhaustion of the full chain surfaces to the caller.
    /// When the deadline expires the in-flight request is aborted and a
    /// `Timeout` error is returned, never a partial result.
    pub async fn resolve(&self, raw_url: &str) -> Result<ResolvedMedia, IgdlError> {
        if !is_post_url(raw_url) {
            return Err(IgdlError::InvalidUrl(format!(
                "not a recognized post URL: {}",
                raw_url
            )));
        }

        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.run_chain(raw_url))
                .await
                .map_err(|_| IgdlError::Timeout(deadline.into()))?,
            None => self.run_chain(raw_url).await,
        }
    }

    async fn run_chain(&self, url: &str) -> Result<ResolvedMedia, IgdlError> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            info!(provider = provider.name(), "trying provider");
            match provider.resolve(url).await {
                Ok(media) if !media.variants.is_empty() => {
                    info!(
                        provider = provider.name(),
                        variants = media.variants.len(),
                        "provider succeeded"
                    );
                    return Ok(media);
                }
                Ok(_) => {
                    // Contract violation: success must carry variants
                    warn!(provider = provider.name(), "provider returned no variants");
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        error: IgdlError::NoMediaFound,
                    });
                }
                Err(error) => {
                    warn!(provider = provider.name(), %error, "provider failed, falling back");
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        error,
                    });
                }
            }
        }

        Err(IgdlError::ExhaustedProviders(failures))
    }
}
