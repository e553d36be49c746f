//! Shared HTTP client construction for providers

use crate::error::IgdlError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Browser User-Agent sent to both external services; they reject
/// obvious bot agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Build the reqwest client shared by all providers.
///
/// One client per resolver; per-request state is never shared beyond
/// the connection pool.
pub fn build_client(config: &HttpClientConfig) -> Result<Client, IgdlError> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_with_defaults() {
        let config = HttpClientConfig::default();
        assert!(build_client(&config).is_ok());
    }
}
