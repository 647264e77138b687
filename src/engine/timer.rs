//! Timer Slot - The scheduler's single pending timer.
//!
//! The engine never owns more than one scheduled callback. A `TimerSlot`
//! makes that structural: it holds at most one `PendingTimer`, scheduling
//! replaces (cancels) whatever was there, and firing moves the timer out.
//!
//! Timers are deadlines on the host's millisecond timeline. The slot does not
//! sleep or spawn anything; the host polls `deadline()` and calls
//! `take_due(now)` from its event loop.

/// Identifies one scheduled timer. Never reused within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What the scheduler does when the timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Reveal the next character of the current fragment.
    Reveal,
    /// Move on to the next fragment.
    Advance,
}

/// A scheduled, not yet fired, timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    /// Absolute deadline in host milliseconds.
    pub due: u64,
    pub kind: TimerKind,
}

/// Holds at most one pending timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<PendingTimer>,
    next_id: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer `delay` ms after `now`.
    ///
    /// A timer still pending in the slot is cancelled first.
    pub fn schedule(&mut self, now: u64, delay: u64, kind: TimerKind) -> TimerId {
        if let Some(stale) = self.cancel() {
            tracing::trace!(id = stale.id.0, "replacing pending timer");
        }

        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = now.saturating_add(delay);
        self.pending = Some(PendingTimer { id, due, kind });
        tracing::trace!(id = id.0, due, ?kind, "timer scheduled");
        id
    }

    /// Cancel the pending timer, returning it if there was one.
    pub fn cancel(&mut self) -> Option<PendingTimer> {
        self.pending.take()
    }

    /// Remove and return the pending timer if its deadline has passed.
    pub fn take_due(&mut self, now: u64) -> Option<PendingTimer> {
        match self.pending {
            Some(timer) if timer.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Deadline of the pending timer.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|t| t.due)
    }

    pub fn pending(&self) -> Option<&PendingTimer> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_fire() {
        let mut slot = TimerSlot::new();
        slot.schedule(100, 75, TimerKind::Reveal);

        assert_eq!(slot.deadline(), Some(175));
        assert!(slot.take_due(174).is_none());
        assert!(slot.is_pending());

        let fired = slot.take_due(175).unwrap();
        assert_eq!(fired.kind, TimerKind::Reveal);
        assert!(!slot.is_pending());
        assert!(slot.take_due(1000).is_none());
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut slot = TimerSlot::new();
        let first = slot.schedule(0, 10, TimerKind::Reveal);
        let second = slot.schedule(0, 500, TimerKind::Advance);

        assert_ne!(first, second);
        let pending = slot.pending().unwrap();
        assert_eq!(pending.id, second);
        assert_eq!(pending.due, 500);

        // The replaced timer never fires
        assert!(slot.take_due(10).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut slot = TimerSlot::new();
        slot.schedule(0, 0, TimerKind::Advance);

        assert!(slot.cancel().is_some());
        assert!(slot.cancel().is_none());
        assert!(slot.take_due(u64::MAX).is_none());
        assert_eq!(slot.deadline(), None);
    }

    #[test]
    fn test_zero_delay_is_due_now() {
        let mut slot = TimerSlot::new();
        slot.schedule(42, 0, TimerKind::Reveal);
        assert!(slot.take_due(42).is_some());
    }

    #[test]
    fn test_deadline_saturates() {
        let mut slot = TimerSlot::new();
        slot.schedule(u64::MAX - 1, 10, TimerKind::Reveal);
        assert_eq!(slot.deadline(), Some(u64::MAX));
    }
}
