//! Main entry point for igdl CLI

use clap::Parser;
use igdl::cli::{Args, OutputFormatter};
use igdl::Resolver;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!(url = %args.url, "starting resolution");
    let formatter = OutputFormatter::new(args.verbosity_level());

    let resolver = Resolver::new()?.with_timeout(args.timeout_duration());

    match resolver.resolve(&args.url).await {
        Ok(media) => {
            if args.json {
                formatter.print_media_json(&media)?;
            } else {
                formatter.print_media(&media);
            }
            Ok(())
        }
        Err(error) => {
            formatter.print_error(&error);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing with an env-filter; `-v` bumps the crate to debug
fn init_logging(args: &Args) {
    let default_directive = if args.verbose { "igdl=debug" } else { "igdl=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
