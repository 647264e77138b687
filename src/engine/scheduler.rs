//! Typing Scheduler - The typewriter state machine.
//!
//! Owns the playback position and the one pending timer. Every timer firing
//! performs exactly one transition:
//!
//! ```text
//! Typing(i, c)   c < len(i)              --char delay-->  Typing(i, c + 1)
//! Typing(i, len) i < N - 1  = Pausing(i) --pause------->  Typing(i + 1, 0)
//! Typing(N-1, len)                        (no timer)       Done
//! ```
//!
//! The scheduler is clock-agnostic. Every entry point takes `now`, a
//! millisecond timestamp on whatever monotonic timeline the host uses. A
//! real-time host calls `fire_next` once per event-loop turn; tests and
//! headless hosts call `advance` to run simulated time forward.
//!
//! Each transition republishes the projection into a `Signal`, so a render
//! effect bound to `projection()` repaints exactly when something changed.
//!
//! # Example
//!
//! ```
//! use spark_typewriter::{Fragment, Sequence, TypingConfig, TypingScheduler};
//!
//! let mut scheduler = TypingScheduler::new();
//! let seq = Sequence::new(vec![Fragment::new("ab").char_delay(10)]);
//! scheduler.start(seq, TypingConfig::default(), true, 0);
//!
//! scheduler.advance(10);
//! assert_eq!(scheduler.project_state().visible_text(), "a");
//!
//! scheduler.advance(20);
//! let p = scheduler.project_state();
//! assert_eq!(p.visible_text(), "ab");
//! assert!(p.is_done);
//! ```

use std::fmt;

use spark_signals::{signal, Signal};

use crate::config::TypingConfig;
use crate::sequence::Sequence;
use crate::types::{resolve_delay, Phase};
use super::projection::Projection;
use super::timer::{PendingTimer, TimerKind, TimerSlot};

/// The typewriter playback engine.
pub struct TypingScheduler {
    sequence: Sequence,
    config: TypingConfig,
    fragment_index: usize,
    revealed_count: usize,
    phase: Phase,
    timer: TimerSlot,
    started: bool,
    disposed: bool,
    projection: Signal<Projection>,
}

impl TypingScheduler {
    /// Create an idle scheduler. Nothing plays until `start`.
    pub fn new() -> Self {
        Self {
            sequence: Sequence::empty(),
            config: TypingConfig::default(),
            fragment_index: 0,
            revealed_count: 0,
            phase: Phase::Done,
            timer: TimerSlot::new(),
            started: false,
            disposed: false,
            projection: signal(Projection::default()),
        }
    }

    /// Create a scheduler and start playing `sequence` at `now`.
    pub fn with_sequence(sequence: Sequence, config: TypingConfig, now: u64) -> Self {
        let mut scheduler = Self::new();
        scheduler.start(sequence, config, true, now);
        scheduler
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// (Re)initialize playback.
    ///
    /// With `restart = true` any pending timer is cancelled and playback
    /// begins again from the first fragment of `sequence`. With
    /// `restart = false` the call only takes effect if nothing is playing
    /// (never started, or disposed); otherwise the current playback and its
    /// sequence are kept untouched.
    ///
    /// Returns true if playback was (re)initialized.
    pub fn start(&mut self, sequence: Sequence, config: TypingConfig, restart: bool, now: u64) -> bool {
        if !restart && self.started && !self.disposed {
            tracing::debug!(
                same_list = self.sequence.ptr_eq(&sequence),
                "start without restart, keeping current playback"
            );
            return false;
        }

        if let Some(stale) = self.timer.cancel() {
            tracing::debug!(kind = ?stale.kind, due = stale.due, "reconfigured, cancelled pending timer");
        }

        self.sequence = sequence;
        self.config = config;
        self.fragment_index = 0;
        self.revealed_count = 0;
        self.phase = if self.sequence.is_empty() { Phase::Done } else { Phase::Typing };
        self.started = true;
        self.disposed = false;

        tracing::debug!(
            fragments = self.sequence.len(),
            char_delay_ms = config.char_delay_ms,
            pause_after_ms = config.pause_after_ms,
            "playback started"
        );

        self.schedule_step(now);
        self.publish();
        true
    }

    /// Cancel the pending timer and freeze playback.
    ///
    /// The last projection stays readable. Repeat calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timer.cancel();
        self.disposed = true;
        tracing::debug!(
            fragment = self.fragment_index,
            revealed = self.revealed_count,
            "playback disposed"
        );
    }

    // =========================================================================
    // Driving Time
    // =========================================================================

    /// Fire the pending timer if it is due at `now`.
    ///
    /// Performs at most one transition. The next timer is scheduled
    /// relative to `now`, the moment the callback actually ran.
    pub fn fire_next(&mut self, now: u64) -> bool {
        if self.disposed {
            return false;
        }
        match self.timer.take_due(now) {
            Some(timer) => {
                self.fire(timer, now);
                true
            }
            None => false,
        }
    }

    /// Fire every timer due up to and including `now`.
    ///
    /// Each timer fires at its own deadline, so running simulated time
    /// forward in one call gives the same result as firing each timer on
    /// time. Returns the number of transitions performed.
    pub fn advance(&mut self, now: u64) -> usize {
        let mut fired = 0;
        while !self.disposed {
            let Some(timer) = self.timer.take_due(now) else {
                break;
            };
            self.fire(timer, timer.due);
            fired += 1;
        }
        fired
    }

    /// Run to completion, returning the time at which playback finished.
    pub fn finish(&mut self, now: u64) -> u64 {
        let mut last = now;
        while let Some(due) = self.next_deadline() {
            last = last.max(due);
            self.advance(due);
        }
        last
    }

    /// Deadline of the pending timer, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        if self.disposed {
            return None;
        }
        self.timer.deadline()
    }

    fn fire(&mut self, timer: PendingTimer, at: u64) {
        match timer.kind {
            TimerKind::Reveal => {
                let count = self.sequence.char_count(self.fragment_index).unwrap_or(0);
                if self.revealed_count < count {
                    self.revealed_count += 1;
                }
                tracing::trace!(
                    fragment = self.fragment_index,
                    revealed = self.revealed_count,
                    at,
                    "revealed character"
                );
            }
            TimerKind::Advance => {
                if self.fragment_index + 1 < self.sequence.len() {
                    self.fragment_index += 1;
                    self.revealed_count = 0;
                }
                tracing::debug!(fragment = self.fragment_index, at, "advanced to fragment");
            }
        }

        self.schedule_step(at);
        self.publish();
    }

    /// Decide the next step from the current position: schedule a reveal,
    /// schedule the pause, or finish.
    fn schedule_step(&mut self, now: u64) {
        let index = self.fragment_index;
        let (Some(fragment), Some(count)) = (self.sequence.get(index), self.sequence.char_count(index)) else {
            self.phase = Phase::Done;
            return;
        };

        if self.revealed_count < count {
            self.phase = Phase::Typing;
            let delay = resolve_delay(fragment.char_delay_ms, self.config.char_delay_ms);
            self.timer.schedule(now, delay, TimerKind::Reveal);
        } else if index + 1 < self.sequence.len() {
            self.phase = Phase::Pausing;
            let delay = resolve_delay(fragment.pause_after_ms, self.config.pause_after_ms);
            self.timer.schedule(now, delay, TimerKind::Advance);
        } else {
            self.phase = Phase::Done;
            tracing::debug!(fragments = self.sequence.len(), "playback done");
        }
    }

    fn publish(&self) {
        self.projection.set(self.project_state());
    }

    // =========================================================================
    // Reading State
    // =========================================================================

    /// Snapshot of what should be rendered now. Side-effect free.
    pub fn project_state(&self) -> Projection {
        if !self.started {
            return Projection::default();
        }
        Projection::compute(&self.sequence, self.fragment_index, self.revealed_count, self.phase)
    }

    /// Reactive handle to the latest projection.
    pub fn projection(&self) -> Signal<Projection> {
        self.projection.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fragment_index(&self) -> usize {
        self.fragment_index
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// First `revealed_count` characters of the current fragment.
    pub fn visible_text(&self) -> &str {
        self.sequence
            .prefix(self.fragment_index, self.revealed_count)
            .unwrap_or("")
    }

    pub fn is_done(&self) -> bool {
        self.started && self.phase == Phase::Done
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn config(&self) -> TypingConfig {
        self.config
    }
}

impl Default for TypingScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TypingScheduler {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

impl fmt::Debug for TypingScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingScheduler")
            .field("fragments", &self.sequence.len())
            .field("fragment_index", &self.fragment_index)
            .field("revealed_count", &self.revealed_count)
            .field("phase", &self.phase)
            .field("pending", &self.timer.pending())
            .field("started", &self.started)
            .field("disposed", &self.disposed)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
