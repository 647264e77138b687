//! Playback Pipeline
//!
//! Connects the typing engine to its hosts.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Sequence → TypingScheduler → Signal<Projection> → render effect → terminal
//! ```
//!
//! ## Hosts
//!
//! 1. **mount** - real-time terminal playback driven by an event loop
//! 2. **timeline** - headless playback in simulated time, one frame per transition
//!
//! ## Key Design Principles
//!
//! - **Pure projection**: the projection is recomputed once per transition
//! - **Side effects in effect**: only the render effect touches the terminal
//! - **One timer**: the loop sleeps until the scheduler's single deadline

pub mod mount;
pub mod timeline;

pub use mount::{mount, play, run, tick, MountHandle, MountOptions};
pub use timeline::{record, Frame};
