//! Caret Blink - Half-period toggle clock for the typing caret.
//!
//! The caret is drawn by the renderer after the visible text. While the
//! scheduler says the caret is visible, this clock decides whether the glyph
//! is currently "on" or "off".
//!
//! # Pattern
//!
//! - 2 FPS = toggle every 250ms (500ms full on/off cycle)
//! - `reset` shows the caret solid again, used after each revealed character
//!   so the caret doesn't flicker off mid-word
//! - `next_deadline` lets the event loop sleep until the next toggle
//! - FPS 0 disables blinking (caret always on)
//!
//! Time is passed in as host milliseconds so the clock is deterministic.

/// Caret glyph drawn after the visible text.
pub const CARET_GLYPH: char = '▋';

/// Standard caret blink rate.
pub const DEFAULT_BLINK_FPS: u8 = 2;

/// Blink clock for one caret.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    /// Toggle interval in ms, `None` when blinking is disabled.
    interval: Option<u64>,
    last_toggle: u64,
    phase: bool,
}

impl CaretBlink {
    /// Create a blink clock starting "on" at `now`.
    pub fn new(fps: u8, now: u64) -> Self {
        // Guard against fps 0 (would be an infinite interval)
        let interval = (fps > 0).then(|| 1000 / (fps as u64 * 2));
        Self {
            interval,
            last_toggle: now,
            phase: true,
        }
    }

    /// Advance the clock. Returns true if the phase changed.
    pub fn tick(&mut self, now: u64) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        if now.saturating_sub(self.last_toggle) < interval {
            return false;
        }
        self.phase = !self.phase;
        self.last_toggle = now;
        true
    }

    /// Show the caret solid and restart the cycle at `now`.
    pub fn reset(&mut self, now: u64) {
        self.phase = true;
        self.last_toggle = now;
    }

    /// True when the glyph should be drawn.
    pub fn phase(&self) -> bool {
        self.phase
    }

    /// Time of the next toggle.
    pub fn next_deadline(&self) -> Option<u64> {
        self.interval.map(|i| self.last_toggle.saturating_add(i))
    }
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_FPS, 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
