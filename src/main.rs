mod cli;
mod error;
mod format;
mod listing;
mod menu;
mod model;
mod normalize;
mod pipeline;
mod storage;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so the menu on stdout stays readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("job-manager v{}", env!("CARGO_PKG_VERSION"));
    cli::run(args)
}
