//! Projection - What the rendering collaborator should paint right now.
//!
//! A projection partitions the sequence into three groups:
//!
//! - **completed_persisted** - earlier fragments flagged `persist`, full text
//! - **current** - the fragment being typed (or just finished), partial text
//! - everything else - omitted, the collaborator renders nothing for it
//!
//! It is a pure function of the scheduler's playback state.

use crate::sequence::Sequence;
use crate::types::{Phase, PresentationHint};

/// A completed fragment that stays on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFragment {
    /// Position in the sequence.
    pub index: usize,
    /// Full, untruncated text.
    pub text: String,
    pub hint: PresentationHint,
    pub class_name: Option<String>,
}

/// The fragment currently being revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentFragment {
    /// Position in the sequence.
    pub index: usize,
    /// Characters revealed so far.
    pub visible_text: String,
    pub hint: PresentationHint,
    pub class_name: Option<String>,
    /// False only once the whole sequence is done.
    pub caret_visible: bool,
}

/// Read-only snapshot of playback for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    pub completed_persisted: Vec<PersistedFragment>,
    pub current: Option<CurrentFragment>,
    pub is_done: bool,
}

impl Projection {
    /// Compute the projection for a playback position.
    ///
    /// `index` and `revealed` are bounds-checked against the sequence; an
    /// out-of-range index yields no current fragment rather than a panic.
    pub fn compute(sequence: &Sequence, index: usize, revealed: usize, phase: Phase) -> Self {
        let is_done = phase == Phase::Done;

        let completed_persisted = sequence
            .iter()
            .enumerate()
            .take(index)
            .filter(|(_, f)| f.persist)
            .map(|(i, f)| PersistedFragment {
                index: i,
                text: f.text.clone(),
                hint: f.hint,
                class_name: f.class_name.clone(),
            })
            .collect();

        let current = sequence.get(index).and_then(|f| {
            let visible = sequence.prefix(index, revealed)?;
            Some(CurrentFragment {
                index,
                visible_text: visible.to_string(),
                hint: f.hint,
                class_name: f.class_name.clone(),
                caret_visible: !is_done,
            })
        });

        Self {
            completed_persisted,
            current,
            is_done,
        }
    }

    /// Visible text of the current fragment ("" when there is none).
    pub fn visible_text(&self) -> &str {
        self.current
            .as_ref()
            .map(|c| c.visible_text.as_str())
            .unwrap_or("")
    }

    /// True when there is nothing to render at all.
    pub fn is_blank(&self) -> bool {
        self.completed_persisted.is_empty() && self.current.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
