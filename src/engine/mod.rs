//! Typing Engine - Scheduler, timer slot and projection.
//!
//! The engine is the only stateful part of the crate:
//! - Timer: the single pending timer, as a deadline on the host timeline
//! - Scheduler: the typewriter state machine driven by that timer
//! - Projection: the pure snapshot handed to the rendering collaborator
//!
//! # Architecture
//!
//! ```text
//! Sequence ──▶ TypingScheduler ──(one TimerSlot)──▶ transitions
//!                     │
//!                     └──▶ Signal<Projection> ──▶ render effect
//! ```

mod projection;
mod scheduler;
pub mod timer;

pub use projection::*;
pub use scheduler::*;
pub use timer::{PendingTimer, TimerId, TimerKind, TimerSlot};
