//! Taskbrain CLI entry point.

use clap::Parser;

use taskbrain::cli::{self, Cli};
use taskbrain::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        cli::handle_error(&err, json);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let service = cli::open_scheduler(&config).await?;
    cli::dispatch(&service, cli.command, cli.json).await
}
