//! # spark-typewriter
//!
//! Typewriter-style sequential text reveal for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A `Sequence` of fragments is played by a `TypingScheduler`, a small
//! state machine with exactly one pending timer. Each timer firing reveals
//! one character or advances to the next fragment, then republishes a
//! `Projection`: the persisted fragments, the fragment being typed, and
//! whether playback is done.
//!
//! ```text
//! Sequence → TypingScheduler → Signal<Projection> → render effect → terminal
//! ```
//!
//! The scheduler never paints anything itself. The bundled terminal
//! renderer is one collaborator; any UI can bind to the projection signal.
//!
//! ## Modules
//!
//! - [`types`] - Fragments, presentation hints, timing defaults
//! - [`sequence`] - The immutable fragment list
//! - [`engine`] - Scheduler, timer slot, projection
//! - [`config`] - Timing config and YAML scripts
//! - [`renderer`] - Append-mode terminal renderer
//! - [`pipeline`] - Terminal mount/event loop and headless timeline
//! - [`state`] - Caret blink clock
//! - [`cli`] - Argument parsing for the `spark-typewriter` binary

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod sequence;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{Script, TypingConfig};
pub use engine::{CurrentFragment, PersistedFragment, Projection, TypingScheduler};
pub use error::{TypewriterError, TypewriterResult};
pub use sequence::Sequence;

pub use pipeline::{mount, play, record, run, tick, Frame, MountHandle, MountOptions};
pub use renderer::AppendRenderer;
pub use state::{CaretBlink, CARET_GLYPH};
