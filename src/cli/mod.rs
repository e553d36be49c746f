//! Command line interface for igdl

pub mod args;
pub mod output;

pub use args::Args;
pub use output::OutputFormatter;
