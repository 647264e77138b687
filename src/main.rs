//! spark-typewriter CLI - Typewriter playback in the terminal.

use std::process::ExitCode;

use spark_typewriter::cli::{print_help, run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with playback on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match Args::parse() {
        Ok(args) => run_cli(args),
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!();
            print_help();
            ExitCode::FAILURE
        }
    }
}
