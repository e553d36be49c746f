//! Resolved media variants returned to the caller

use serde::Serialize;

/// One concrete downloadable link with an associated quality label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaVariant {
    /// Quality/resolution descriptor, e.g. "1080p (video)"
    pub label: String,
    /// Absolute, directly fetchable URL
    pub url: String,
    /// Preview image URL, when the provider exposes one
    #[serde(rename = "thumbnailUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl MediaVariant {
    /// Create a variant without a thumbnail
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            thumbnail_url: None,
        }
    }
}

/// A successful resolution: one or more variants, best-quality first.
///
/// Invariant: never empty. A provider that cannot produce at least one
/// variant reports an error instead of an empty result.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedMedia {
    pub variants: Vec<MediaVariant>,
}

impl ResolvedMedia {
    /// The default variant surfaced to callers that only want one link.
    ///
    /// `None` only for a hand-built empty value; resolution never
    /// returns one.
    pub fn best(&self) -> Option<&MediaVariant> {
        self.variants.first()
    }
}
