//! Command line argument parsing

use clap::Parser;
use std::time::Duration;

/// IGDL - Instagram media link resolver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Instagram post, reel, story or share URL
    pub url: String,

    /// Print the full variant list as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Overall resolution deadline (e.g. 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get resolution deadline as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Effective verbosity level (quiet wins over verbose)
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["igdl", "https://www.instagram.com/reel/ABC/"]);
        assert!(!args.json);
        assert_eq!(args.timeout_duration(), Duration::from_secs(30));
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let args = Args::parse_from(["igdl", "-q", "-v", "https://www.instagram.com/reel/ABC/"]);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);
    }
}
