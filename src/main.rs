use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lsr::ListOptions;
use lsr::cli::Cli;
use lsr::fs::RealFileSystem;

const LOG_ENV: &str = "LSR_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = ListOptions::from(cli);
    let mut stdout = std::io::stdout().lock();
    match lsr::run(&RealFileSystem, &options, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lsr: {err:#}");
            ExitCode::from(1)
        }
    }
}
