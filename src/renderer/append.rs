//! Append-mode renderer for typewriter playback.
//!
//! Uses the two-region model:
//!
//! 1. **History** - persisted fragments, written once, scroll into scrollback
//! 2. **Active** - the fragment being typed, erased and redrawn in place
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │  Software Engineer. Explorer.    │  ← History (persisted, frozen)
//! ├──────────────────────────────────┤
//! │ │ $ cargo run --release▋         │  ← Active (redrawn every frame)
//! └──────────────────────────────────┘
//! ```
//!
//! Completed fragments that are not persisted simply stop being drawn: the
//! active region is erased and the next fragment takes its place.

use std::io::{self, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::{Print, ResetColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};

use super::markup::{render_block, StyledLine};
use crate::engine::Projection;

/// Append-mode renderer writing to any `Write` sink.
pub struct AppendRenderer<W: Write> {
    out: W,
    columns: u16,
    line_ending: &'static str,
    /// Persisted fragments already written to history.
    history_len: usize,
    previous_active_height: u16,
}

impl<W: Write> AppendRenderer<W> {
    /// Create a renderer for a terminal `columns` wide.
    ///
    /// Lines end in `\r\n` so output is correct in raw mode too.
    pub fn new(out: W, columns: u16) -> Self {
        Self {
            out,
            columns: columns.max(1),
            line_ending: "\r\n",
            history_len: 0,
            previous_active_height: 0,
        }
    }

    /// Update the terminal width used for wrapping and alignment.
    pub fn set_columns(&mut self, columns: u16) {
        self.columns = columns.max(1);
    }

    /// Render a projection.
    ///
    /// `caret_on` is the blink phase; the caret is drawn only when the
    /// projection also says it's visible.
    pub fn render(&mut self, projection: &Projection, caret_on: bool) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        self.erase_active_internal()?;

        // A shorter persisted list means playback restarted
        if projection.completed_persisted.len() < self.history_len {
            self.history_len = 0;
        }

        for persisted in &projection.completed_persisted[self.history_len..] {
            let lines = render_block(
                &persisted.text,
                persisted.hint,
                persisted.class_name.as_deref(),
                false,
                self.columns,
            );
            self.write_lines(&lines)?;
        }
        self.history_len = projection.completed_persisted.len();

        let mut active_height = 0;
        if let Some(current) = &projection.current {
            let lines = render_block(
                &current.visible_text,
                current.hint,
                current.class_name.as_deref(),
                current.caret_visible && caret_on,
                self.columns,
            );
            active_height = lines.iter().map(|l| l.rows(self.columns)).sum();
            self.write_lines(&lines)?;
        }
        self.previous_active_height = active_height;

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    /// Erase the active region without rendering new content.
    pub fn erase_active(&mut self) -> io::Result<()> {
        if self.previous_active_height > 0 {
            self.erase_active_internal()?;
            self.previous_active_height = 0;
            self.out.flush()?;
        }
        Ok(())
    }

    fn erase_active_internal(&mut self) -> io::Result<()> {
        if self.previous_active_height > 0 {
            queue!(
                self.out,
                MoveUp(self.previous_active_height),
                MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        Ok(())
    }

    fn write_lines(&mut self, lines: &[StyledLine]) -> io::Result<()> {
        for line in lines {
            queue!(self.out, Print(&line.rendered), ResetColor, Print(self.line_ending))?;
        }
        Ok(())
    }

    /// Height of the active region in rows.
    pub fn active_height(&self) -> u16 {
        self.previous_active_height
    }

    /// Number of persisted fragments written to history.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CurrentFragment, PersistedFragment};
    use crate::types::PresentationHint;

    fn output(renderer: &AppendRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(renderer.writer()).into_owned()
    }

    fn typing(index: usize, text: &str, caret: bool) -> CurrentFragment {
        CurrentFragment {
            index,
            visible_text: text.to_string(),
            hint: PresentationHint::Code,
            class_name: None,
            caret_visible: caret,
        }
    }

    fn persisted(index: usize, text: &str) -> PersistedFragment {
        PersistedFragment {
            index,
            text: text.to_string(),
            hint: PresentationHint::Prose,
            class_name: Some("text-left".to_string()),
        }
    }

    #[test]
    fn test_active_region_height() {
        let mut renderer = AppendRenderer::new(Vec::new(), 80);
        let projection = Projection {
            completed_persisted: vec![],
            current: Some(typing(0, "$ ls\n> ok", true)),
            is_done: false,
        };

        renderer.render(&projection, true).unwrap();
        assert_eq!(renderer.active_height(), 2);
        assert!(output(&renderer).contains("$ ls"));
    }

    #[test]
    fn test_history_written_once() {
        let mut renderer = AppendRenderer::new(Vec::new(), 80);
        let projection = Projection {
            completed_persisted: vec![persisted(0, "tagline")],
            current: Some(typing(1, "", true)),
            is_done: false,
        };

        renderer.render(&projection, true).unwrap();
        renderer.render(&projection, false).unwrap();
        renderer.render(&projection, true).unwrap();

        assert_eq!(renderer.history_len(), 1);
        assert_eq!(output(&renderer).matches("tagline").count(), 1);
    }

    #[test]
    fn test_restart_rewrites_history() {
        let mut renderer = AppendRenderer::new(Vec::new(), 80);
        let with_history = Projection {
            completed_persisted: vec![persisted(0, "kept")],
            current: None,
            is_done: true,
        };

        renderer.render(&with_history, true).unwrap();
        renderer.render(&Projection::default(), true).unwrap();
        assert_eq!(renderer.history_len(), 0);

        renderer.render(&with_history, true).unwrap();
        assert_eq!(output(&renderer).matches("kept").count(), 2);
    }

    #[test]
    fn test_caret_follows_projection_and_phase() {
        let mut renderer = AppendRenderer::new(Vec::new(), 80);
        let done = Projection {
            completed_persisted: vec![],
            current: Some(typing(0, "fin", false)),
            is_done: true,
        };
        renderer.render(&done, true).unwrap();
        assert!(!output(&renderer).contains(crate::state::CARET_GLYPH));

        let mut renderer = AppendRenderer::new(Vec::new(), 80);
        let live = Projection {
            current: Some(typing(0, "fi", true)),
            ..done.clone()
        };
        renderer.render(&live, false).unwrap();
        assert!(!output(&renderer).contains(crate::state::CARET_GLYPH));
        renderer.render(&live, true).unwrap();
        assert!(output(&renderer).contains(crate::state::CARET_GLYPH));
    }

    #[test]
    fn test_erase_active() {
        let mut renderer = AppendRenderer::new(Vec::new(), 80);
        let projection = Projection {
            completed_persisted: vec![],
            current: Some(typing(0, "abc", true)),
            is_done: false,
        };
        renderer.render(&projection, true).unwrap();
        assert_eq!(renderer.active_height(), 1);

        renderer.erase_active().unwrap();
        assert_eq!(renderer.active_height(), 0);
    }
}
