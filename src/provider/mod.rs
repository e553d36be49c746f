//! Resolution providers and the machinery they share

pub mod client;
pub mod cobalt;
pub mod decoder;
pub mod snapsave;
pub mod table;

pub use client::*;
pub use cobalt::*;
pub use snapsave::*;

use crate::core::ResolvedMedia;
use crate::error::IgdlError;
use async_trait::async_trait;

/// A strategy that attempts to resolve a post URL into media variants
/// via one specific external service.
///
/// Implementations convert every internal failure into an `IgdlError`
/// at this boundary; raw transport errors never propagate past it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable name used in logs and failure records
    fn name(&self) -> &'static str;

    /// Attempt to resolve the URL. A success carries at least one
    /// variant; an empty result is a contract violation the
    /// orchestrator treats as a failure.
    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, IgdlError>;
}
