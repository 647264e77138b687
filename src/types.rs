//! Core types for spark-typewriter.
//!
//! These types define what a caller hands to the engine (fragments) and the
//! phases the engine moves through. Everything here is plain data.

use serde::{Deserialize, Serialize};

// =============================================================================
// Timing Defaults
// =============================================================================

/// Default delay between two revealed characters, in milliseconds.
pub const DEFAULT_CHAR_DELAY_MS: i64 = 75;

/// Default pause between a completed fragment and the next one, in milliseconds.
pub const DEFAULT_PAUSE_AFTER_MS: i64 = 500;

/// Resolve a per-fragment timing override against the engine default.
///
/// Non-positive values clamp to zero: the step still happens on its own
/// timer, just as soon as the host gets to it.
pub fn resolve_delay(override_ms: Option<i64>, default_ms: i64) -> u64 {
    let ms = match override_ms {
        Some(ms) => ms,
        None => default_ms,
    };
    ms.max(0) as u64
}

// =============================================================================
// Presentation Hint
// =============================================================================

/// How the rendering collaborator should present a fragment.
///
/// The engine never looks at this value, it only carries it through to the
/// projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationHint {
    /// Emphasized paragraph.
    #[default]
    Prose,
    /// Monospace block (terminal transcript, code listing).
    Code,
}

// =============================================================================
// Fragment
// =============================================================================

/// One unit of text with its own timing, persistence and presentation.
///
/// # Example
///
/// ```
/// use spark_typewriter::Fragment;
///
/// let prompt = Fragment::new("$ ./portfolio").code().pause_after(1500);
/// let tagline = Fragment::new("Constant Tinkerer.").persist().char_delay(25);
///
/// assert!(tagline.persist);
/// assert_eq!(prompt.pause_after_ms, Some(1500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fragment {
    /// Text to reveal. May be empty.
    pub text: String,
    /// Delay between characters, overriding the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_delay_ms: Option<i64>,
    /// Pause after this fragment completes, overriding the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_after_ms: Option<i64>,
    /// Keep the full text rendered once playback has moved past it.
    #[serde(default)]
    pub persist: bool,
    /// Presentation tag for the collaborator.
    #[serde(default)]
    pub hint: PresentationHint,
    /// Style class for the collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Fragment {
    /// Create a prose fragment with engine-default timing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Present as a code block.
    pub fn code(mut self) -> Self {
        self.hint = PresentationHint::Code;
        self
    }

    /// Keep rendered after playback moves on.
    pub fn persist(mut self) -> Self {
        self.persist = true;
        self
    }

    /// Override the per-character delay.
    pub fn char_delay(mut self, ms: i64) -> Self {
        self.char_delay_ms = Some(ms);
        self
    }

    /// Override the pause after completion.
    pub fn pause_after(mut self, ms: i64) -> Self {
        self.pause_after_ms = Some(ms);
        self
    }

    /// Attach a style class.
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Revealing characters of the current fragment.
    Typing,
    /// Current fragment complete, waiting to advance.
    Pausing,
    /// Last fragment complete (or the sequence is empty).
    Done,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_delay_prefers_override() {
        assert_eq!(resolve_delay(Some(10), 75), 10);
        assert_eq!(resolve_delay(None, 75), 75);
    }

    #[test]
    fn test_resolve_delay_clamps_negative() {
        assert_eq!(resolve_delay(Some(-5), 75), 0);
        assert_eq!(resolve_delay(None, -1), 0);
        assert_eq!(resolve_delay(Some(0), 75), 0);
    }

    #[test]
    fn test_fragment_builder() {
        let f = Fragment::new("ls -la")
            .code()
            .persist()
            .char_delay(10)
            .pause_after(0)
            .class_name("text-center");

        assert_eq!(f.text, "ls -la");
        assert_eq!(f.hint, PresentationHint::Code);
        assert!(f.persist);
        assert_eq!(f.char_delay_ms, Some(10));
        assert_eq!(f.pause_after_ms, Some(0));
        assert_eq!(f.class_name.as_deref(), Some("text-center"));
    }

    #[test]
    fn test_fragment_defaults() {
        let f = Fragment::new("hello");
        assert_eq!(f.hint, PresentationHint::Prose);
        assert!(!f.persist);
        assert!(f.char_delay_ms.is_none());
        assert!(f.pause_after_ms.is_none());
    }
}
