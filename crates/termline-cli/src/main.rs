//! termline - Status output from the shell

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use termline::{Console, TokioScheduler};
use termline_cli::cmd;
use termline_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so they never mix with redrawn lines.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut console = Console::stdio(Arc::new(TokioScheduler::new()));

    match run(cli, &mut console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            console.stop();
            console.err_logger.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, console: &mut Console) -> Result<()> {
    let settings = cli.output.resolve().await?;
    console.apply(settings);

    match cli.command {
        Commands::Log { level, message } => {
            cmd::log::log(console, level, &message);
            Ok(())
        }
        Commands::Spin(args) => cmd::spin::spin(console, &args).await,
        Commands::Progress(args) => cmd::progress::progress(console, &args).await,
        Commands::Table { file, columns } => {
            cmd::table::table(console, &file, columns.as_deref()).await
        }
    }
}
