//! Configuration - Engine timing defaults and YAML scripts.
//!
//! A script is a YAML document with optional top-level timing defaults and a
//! list of fragments:
//!
//! ```yaml
//! char_delay_ms: 75
//! pause_after_ms: 500
//! fragments:
//!   - text: "$ ./portfolio"
//!     hint: code
//!     pause_after_ms: 1500
//!   - text: "Constant Tinkerer."
//!     persist: true
//!     char_delay_ms: 25
//!     class_name: text-center
//! ```
//!
//! Timing defaults can also be overridden from the environment with
//! `SPARK_TYPEWRITER_CHAR_DELAY_MS` and `SPARK_TYPEWRITER_PAUSE_AFTER_MS`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TypewriterResult;
use crate::sequence::Sequence;
use crate::types::{DEFAULT_CHAR_DELAY_MS, DEFAULT_PAUSE_AFTER_MS, Fragment};

/// Environment variable overriding the default character delay.
pub const ENV_CHAR_DELAY: &str = "SPARK_TYPEWRITER_CHAR_DELAY_MS";
/// Environment variable overriding the default inter-fragment pause.
pub const ENV_PAUSE_AFTER: &str = "SPARK_TYPEWRITER_PAUSE_AFTER_MS";

// =============================================================================
// TypingConfig
// =============================================================================

/// Engine-wide timing defaults, used when a fragment has no override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Milliseconds between revealed characters (default: 75).
    pub char_delay_ms: i64,
    /// Milliseconds between fragments (default: 500).
    pub pause_after_ms: i64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: DEFAULT_CHAR_DELAY_MS,
            pause_after_ms: DEFAULT_PAUSE_AFTER_MS,
        }
    }
}

impl TypingConfig {
    /// Create a config with explicit defaults.
    pub fn new(char_delay_ms: i64, pause_after_ms: i64) -> Self {
        Self {
            char_delay_ms,
            pause_after_ms,
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that don't parse as integers are logged and ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ms) = parse_override(ENV_CHAR_DELAY, lookup(ENV_CHAR_DELAY)) {
            self.char_delay_ms = ms;
        }
        if let Some(ms) = parse_override(ENV_PAUSE_AFTER, lookup(ENV_PAUSE_AFTER)) {
            self.pause_after_ms = ms;
        }
        self
    }
}

fn parse_override(key: &str, raw: Option<String>) -> Option<i64> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(ms) => {
            tracing::debug!(key, ms, "timing override from environment");
            Some(ms)
        }
        Err(err) => {
            tracing::warn!(key, value = %raw, %err, "ignoring invalid timing override");
            None
        }
    }
}

// =============================================================================
// Script
// =============================================================================

fn default_char_delay() -> i64 {
    DEFAULT_CHAR_DELAY_MS
}

fn default_pause_after() -> i64 {
    DEFAULT_PAUSE_AFTER_MS
}

/// A playable script: timing defaults plus the fragment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Default character delay for fragments without an override.
    #[serde(default = "default_char_delay")]
    pub char_delay_ms: i64,
    /// Default pause for fragments without an override.
    #[serde(default = "default_pause_after")]
    pub pause_after_ms: i64,
    /// Fragments, in playback order.
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Script {
    /// Load a script from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or doesn't parse.
    pub fn load<P: AsRef<Path>>(path: P) -> TypewriterResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a script from a YAML string.
    ///
    /// An empty document is an empty script.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML or unknown fields.
    pub fn from_yaml(yaml: &str) -> TypewriterResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::from_fragments(Vec::new()));
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Wrap fragments with the engine's default timing.
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        let defaults = TypingConfig::default();
        Self {
            char_delay_ms: defaults.char_delay_ms,
            pause_after_ms: defaults.pause_after_ms,
            fragments,
        }
    }

    /// The intro shown when no script is given: a shell prompt that types
    /// and disappears, then a tagline that stays.
    pub fn demo() -> Self {
        Self::from_fragments(vec![
            Fragment::new("$ cd ~/spark-typewriter && ./intro\n\n> ready")
                .code()
                .char_delay(75)
                .pause_after(1500),
            Fragment::new("Software Engineer. Occasional Explorer. Constant Tinkerer.")
                .persist()
                .char_delay(25)
                .class_name("text-center"),
        ])
    }

    /// Timing defaults declared by this script.
    pub fn config(&self) -> TypingConfig {
        TypingConfig::new(self.char_delay_ms, self.pause_after_ms)
    }

    /// Build the immutable playback sequence.
    pub fn sequence(&self) -> Sequence {
        Sequence::new(self.fragments.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
