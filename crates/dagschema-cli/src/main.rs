//! Dagschema CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use dagschema_cli::cli::Cli;
use dagschema_cli::{commands, config};

#[tokio::main]
async fn main() {
    config::load_env();

    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match commands::execute(&cli).await {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
