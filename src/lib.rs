//! # igdl - Instagram media link resolver
//!
//! Turns an Instagram post URL into one or more directly downloadable
//! media URLs without going through the native app.
//!
//! ## Features
//!
//! - Multi-provider fallback chain (structured API first, scrape second)
//! - Deobfuscation of the scrape provider's packed download page
//! - Quality-ranked variant lists (1080p surfaced first when present)
//! - Per-request deadline with prompt cancellation of in-flight requests
//!
//! ## Example
//!
//! ```rust,no_run
//! use igdl::Resolver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = Resolver::new()?;
//!
//!     let media = resolver.resolve("https://www.instagram.com/reel/DS8xsilk4sz/").await?;
//!     if let Some(best) = media.best() {
//!         println!("Best variant: {}", best.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod provider;
pub mod utils;

// Re-export main types
pub use crate::core::{MediaVariant, ResolvedMedia, Resolver};
pub use error::{IgdlError, ProviderFailure};

/// Result type alias for igdl operations
pub type Result<T> = std::result::Result<T, IgdlError>;
