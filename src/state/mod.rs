//! State Module - Runtime state outside the typing engine.
//!
//! - **Caret** - Blink clock for the typing caret

pub mod caret;

pub use caret::{CaretBlink, CARET_GLYPH, DEFAULT_BLINK_FPS};
