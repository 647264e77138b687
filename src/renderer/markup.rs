//! Markup - Map a presentation hint and style class to terminal lines.
//!
//! - `code` - monospace block with a `│ ` gutter, green text, left aligned
//! - `prose` - italic paragraph, centered unless the class says otherwise
//!
//! Style classes are whitespace-separated tokens:
//! `text-left`, `text-center`, `text-right` pick alignment and
//! `text-<color>` (any crossterm color name, e.g. `text-dark_cyan`) picks
//! the foreground color. Unknown tokens are ignored.

use crossterm::style::{style, Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::state::CARET_GLYPH;
use crate::types::PresentationHint;

const CODE_GUTTER: &str = "│ ";

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Resolved style for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub align: Align,
    pub color: Option<Color>,
}

impl BlockStyle {
    /// Resolve hint defaults, then apply class tokens on top.
    pub fn resolve(hint: PresentationHint, class_name: Option<&str>) -> Self {
        let mut resolved = match hint {
            PresentationHint::Code => Self {
                align: Align::Left,
                color: Some(Color::Green),
            },
            PresentationHint::Prose => Self {
                align: Align::Center,
                color: None,
            },
        };

        for token in class_name.unwrap_or("").split_whitespace() {
            let Some(value) = token.strip_prefix("text-") else {
                continue;
            };
            match value {
                "left" => resolved.align = Align::Left,
                "center" => resolved.align = Align::Center,
                "right" => resolved.align = Align::Right,
                other => {
                    if let Ok(color) = Color::try_from(other) {
                        resolved.color = Some(color);
                    }
                }
            }
        }
        resolved
    }
}

/// One rendered terminal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    /// Display width without escape sequences.
    pub width: usize,
    /// Text with ANSI styling applied.
    pub rendered: String,
}

impl StyledLine {
    /// Terminal rows this line occupies at `columns` wide.
    pub fn rows(&self, columns: u16) -> u16 {
        let columns = columns.max(1) as usize;
        self.width.div_ceil(columns).max(1) as u16
    }
}

/// Lay out a block of text for a terminal `columns` wide.
///
/// `caret` appends the caret glyph to the last line.
pub fn render_block(
    text: &str,
    hint: PresentationHint,
    class_name: Option<&str>,
    caret: bool,
    columns: u16,
) -> Vec<StyledLine> {
    let block_style = BlockStyle::resolve(hint, class_name);
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let mut content = line.to_string();
            if caret && i == last {
                content.push(CARET_GLYPH);
            }
            style_line(&content, hint, block_style, columns)
        })
        .collect()
}

fn style_line(content: &str, hint: PresentationHint, block_style: BlockStyle, columns: u16) -> StyledLine {
    let gutter = match hint {
        PresentationHint::Code => CODE_GUTTER,
        PresentationHint::Prose => "",
    };
    let body_width = gutter.width() + content.width();
    let pad = match block_style.align {
        Align::Left => 0,
        Align::Center => (columns as usize).saturating_sub(body_width) / 2,
        Align::Right => (columns as usize).saturating_sub(body_width),
    };

    let mut body = style(content);
    if let Some(color) = block_style.color {
        body = body.with(color);
    }
    if hint == PresentationHint::Prose {
        body = body.italic();
    }

    let mut rendered = " ".repeat(pad);
    if !gutter.is_empty() {
        rendered.push_str(&gutter.dark_grey().to_string());
    }
    rendered.push_str(&body.to_string());

    StyledLine {
        width: pad + body_width,
        rendered,
    }
}

// =============================================================================
// Tests
// =============================================================================
