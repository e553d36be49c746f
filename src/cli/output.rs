//! Output formatting for resolved media

use crate::cli::args::VerbosityLevel;
use crate::core::ResolvedMedia;
use crate::error::IgdlError;
use colored::Colorize;

/// Output formatter for igdl
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Print the ranked variant list as text
    pub fn print_media(&self, media: &ResolvedMedia) {
        if self.verbosity == VerbosityLevel::Quiet {
            // Quiet mode prints only the default variant's URL
            if let Some(best) = media.best() {
                println!("{}", best.url);
            }
            return;
        }

        println!("{} {} variant(s) found", "✅".green(), media.variants.len());
        for (i, variant) in media.variants.iter().enumerate() {
            if i == 0 {
                println!("  [{}] {}", "best".green().bold(), variant.label.as_str().cyan());
            } else {
                println!("  [#{}] {}", i + 1, variant.label.as_str().cyan());
            }
            println!("      {}", variant.url);
            if self.verbosity == VerbosityLevel::Verbose {
                if let Some(thumb) = &variant.thumbnail_url {
                    println!("      thumbnail: {}", thumb.as_str().dimmed());
                }
            }
        }
    }

    /// Print the variant list as JSON (the front-door response shape)
    pub fn print_media_json(&self, media: &ResolvedMedia) -> Result<(), IgdlError> {
        println!("{}", serde_json::to_string_pretty(media)?);
        Ok(())
    }

    /// Print an error message
    pub fn print_error(&self, error: &IgdlError) {
        eprintln!("{} {}", "❌".red(), error);
        if self.verbosity == VerbosityLevel::Verbose {
            if let IgdlError::ExhaustedProviders(failures) = error {
                for failure in failures {
                    eprintln!("   {} {}", "↳".dimmed(), failure);
                }
            }
        }
    }
}
