//! Core functionality for igdl

pub mod media;
pub mod resolver;

pub use media::*;
pub use resolver::*;
