//! CLI module for spark-typewriter.
//!
//! All CLI logic lives here so it can be tested; `main.rs` only sets up
//! logging and calls `run_cli`.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, TimingOverrides};
pub use commands::run_cli;
pub use output::{print_help, print_version, write_frames, write_summary};
