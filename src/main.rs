mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Reports and JSON go to stdout; keep logs on stderr so they can be piped separately.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("salon_valuation=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli).await
}
