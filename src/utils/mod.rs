//! Utility functions for igdl

pub mod url;

pub use url::*;
