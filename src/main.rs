use std::process::ExitCode;

use clap::Parser;
use futctl::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,futctl=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging();

    match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}
