//! CLI argument parsing.
//!
//! Hand-rolled so it can be driven from any iterator of strings in tests.

use std::path::PathBuf;

use crate::config::TypingConfig;
use crate::error::{TypewriterError, TypewriterResult};

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Timing flags layered over the script's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingOverrides {
    /// `--char-delay MS`
    pub char_delay_ms: Option<i64>,
    /// `--pause MS`
    pub pause_after_ms: Option<i64>,
}

impl TimingOverrides {
    /// Apply the flags on top of `config`.
    pub fn apply(self, mut config: TypingConfig) -> TypingConfig {
        if let Some(ms) = self.char_delay_ms {
            config.char_delay_ms = ms;
        }
        if let Some(ms) = self.pause_after_ms {
            config.pause_after_ms = ms;
        }
        config
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a script on the terminal (built-in demo when no path is given).
    Play {
        script: Option<PathBuf>,
        timing: TimingOverrides,
        /// `--blink FPS`
        blink_fps: Option<u8>,
        /// `--linger MS`
        linger_ms: u64,
    },
    /// Validate a script and print a summary.
    Check { script: PathBuf },
    /// Play headless and print every frame with its timestamp.
    Dump {
        script: Option<PathBuf>,
        timing: TimingOverrides,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name, as with `std::env::args()`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown commands or flags, and for
    /// flag values that aren't numbers.
    pub fn parse_from<I, S>(args: I) -> TypewriterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    pub fn parse() -> TypewriterResult<Self> {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> TypewriterResult<Self> {
        let Some(name) = args.get(1) else {
            return Ok(Self {
                command: Command::Help,
            });
        };
        let rest = &args[2..];

        let command = match name.as_str() {
            "play" => Self::parse_play(rest)?,
            "check" => Self::parse_check(rest)?,
            "dump" => Self::parse_dump(rest)?,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                return Err(TypewriterError::config(format!("unknown command '{unknown}'")));
            }
        };

        Ok(Self { command })
    }

    fn parse_play(rest: &[String]) -> TypewriterResult<Command> {
        let mut script = None;
        let mut timing = TimingOverrides::default();
        let mut blink_fps = None;
        let mut linger_ms = 0;

        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--char-delay" => timing.char_delay_ms = Some(flag_value(rest, i)?),
                "--pause" => timing.pause_after_ms = Some(flag_value(rest, i)?),
                "--blink" => blink_fps = Some(flag_value(rest, i)?),
                "--linger" => linger_ms = flag_value(rest, i)?,
                other => {
                    script = Some(positional(other, script.is_some())?);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        Ok(Command::Play {
            script,
            timing,
            blink_fps,
            linger_ms,
        })
    }

    fn parse_check(rest: &[String]) -> TypewriterResult<Command> {
        match rest {
            [path] => Ok(Command::Check {
                script: positional(path, false)?,
            }),
            [] => Err(TypewriterError::config("'check' requires a script path")),
            _ => Err(TypewriterError::config("'check' takes exactly one script path")),
        }
    }

    fn parse_dump(rest: &[String]) -> TypewriterResult<Command> {
        let mut script = None;
        let mut timing = TimingOverrides::default();

        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--char-delay" => timing.char_delay_ms = Some(flag_value(rest, i)?),
                "--pause" => timing.pause_after_ms = Some(flag_value(rest, i)?),
                other => {
                    script = Some(positional(other, script.is_some())?);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        Ok(Command::Dump { script, timing })
    }
}

/// Parse the value following the flag at `i`.
fn flag_value<T: std::str::FromStr>(rest: &[String], i: usize) -> TypewriterResult<T> {
    let flag = &rest[i];
    let raw = rest
        .get(i + 1)
        .ok_or_else(|| TypewriterError::config(format!("{flag} expects a value")))?;
    raw.parse()
        .map_err(|_| TypewriterError::config(format!("{flag} expects a number, got '{raw}'")))
}

fn positional(arg: &str, already_have: bool) -> TypewriterResult<PathBuf> {
    if arg.starts_with("--") {
        return Err(TypewriterError::config(format!("unknown flag '{arg}'")));
    }
    if already_have {
        return Err(TypewriterError::config(format!("unexpected argument '{arg}'")));
    }
    Ok(PathBuf::from(arg))
}

// =============================================================================
// Tests
// =============================================================================
