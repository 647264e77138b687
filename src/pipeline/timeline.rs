//! Timeline - Headless playback in simulated time.
//!
//! Runs a sequence to completion without a terminal, recording one frame per
//! transition. Each timer fires exactly at its deadline, so the recorded
//! timestamps are what a perfectly punctual host would observe.
//!
//! # Example
//!
//! ```
//! use spark_typewriter::{Fragment, Sequence, TypingConfig};
//! use spark_typewriter::pipeline::timeline::record;
//!
//! let frames = record(Sequence::new(vec![Fragment::new("hi")]), TypingConfig::new(10, 0));
//!
//! let times: Vec<u64> = frames.iter().map(|f| f.at).collect();
//! assert_eq!(times, [0, 10, 20]);
//! assert!(frames.last().unwrap().projection.is_done);
//! ```

use crate::config::TypingConfig;
use crate::engine::{Projection, TypingScheduler};
use crate::sequence::Sequence;

/// One recorded projection and when it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Simulated time in milliseconds since playback started.
    pub at: u64,
    pub projection: Projection,
}

/// Play `sequence` to completion, returning the initial frame plus one
/// frame per transition.
pub fn record(sequence: Sequence, config: TypingConfig) -> Vec<Frame> {
    let mut scheduler = TypingScheduler::with_sequence(sequence, config, 0);
    let mut frames = vec![Frame {
        at: 0,
        projection: scheduler.project_state(),
    }];

    while let Some(due) = scheduler.next_deadline() {
        if !scheduler.fire_next(due) {
            break;
        }
        frames.push(Frame {
            at: due,
            projection: scheduler.project_state(),
        });
    }

    tracing::debug!(frames = frames.len(), "timeline recorded");
    frames
}

/// Total playback duration in milliseconds.
pub fn duration(sequence: Sequence, config: TypingConfig) -> u64 {
    TypingScheduler::with_sequence(sequence, config, 0).finish(0)
}

// =============================================================================
// Tests
// =============================================================================
