use anyhow::Result;
use clap::Parser;

use wrapline_cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("parsed arguments: {:?}", cli);

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(cli.execute())
}
