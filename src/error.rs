//! Error types for igdl

use thiserror::Error;

/// Main error type for igdl operations
#[derive(Debug, Error)]
pub enum IgdlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("{0}")]
    ProviderReported(String),

    #[error("No media found")]
    NoMediaFound,

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(#[from] reqwest::Error),

    #[error("Resolution timed out after {0}")]
    Timeout(humantime::Duration),

    #[error("All providers failed ({})", format_failures(.0))]
    ExhaustedProviders(Vec<ProviderFailure>),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Parse error: {0}")]
    ParseError(#[from] std::num::ParseIntError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

/// One recorded provider failure within a resolution attempt
#[derive(Debug)]
pub struct ProviderFailure {
    /// Name of the provider that failed
    pub provider: String,
    /// The error it failed with
    pub error: IgdlError,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl IgdlError {
    /// Check if the message may originate from an external service.
    ///
    /// `ProviderReported` text is relayed from outside the system and must be
    /// treated as untrusted display text, never as logic.
    pub fn is_external_message(&self) -> bool {
        matches!(self, IgdlError::ProviderReported(_))
    }

    /// Check if this error came out of a single provider attempt, meaning
    /// the orchestrator may still recover by trying the next provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            IgdlError::DecodeError(_)
                | IgdlError::ProviderReported(_)
                | IgdlError::NoMediaFound
                | IgdlError::ProviderUnavailable(_)
        )
    }
}
