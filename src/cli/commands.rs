//! Command execution for the CLI.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use super::args::{Args, Command, TimingOverrides};
use super::output::{print_help, print_version, write_frames, write_summary};
use crate::config::{Script, TypingConfig};
use crate::error::TypewriterResult;
use crate::pipeline::{self, timeline, MountOptions};

/// Run the CLI with parsed arguments.
pub fn run_cli(args: Args) -> ExitCode {
    match execute(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> TypewriterResult<()> {
    match command {
        Command::Play {
            script,
            timing,
            blink_fps,
            linger_ms,
        } => {
            let script = load_script(script.as_deref())?;
            let config = resolve_config(&script, timing);
            let mut options = MountOptions {
                linger_ms,
                ..MountOptions::default()
            };
            if let Some(fps) = blink_fps {
                options.blink_fps = fps;
            }
            pipeline::play(script.sequence(), config, options)
        }
        Command::Check { script } => {
            let script = Script::load(&script)?;
            let config = resolve_config(&script, TimingOverrides::default());
            write_summary(&mut io::stdout().lock(), &script, config)?;
            Ok(())
        }
        Command::Dump { script, timing } => {
            let script = load_script(script.as_deref())?;
            let config = resolve_config(&script, timing);
            let frames = timeline::record(script.sequence(), config);
            write_frames(&mut io::stdout().lock(), &frames)?;
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Load a script file, or the built-in demo when no path is given.
fn load_script(path: Option<&Path>) -> TypewriterResult<Script> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading script");
            Script::load(path)
        }
        None => Ok(Script::demo()),
    }
}

/// Script defaults, then environment, then command-line flags.
fn resolve_config(script: &Script, timing: TimingOverrides) -> TypingConfig {
    timing.apply(script.config().with_env_overrides())
}
