//! Terminal renderer - the reference rendering collaborator.
//!
//! Paints a `Projection` to a terminal:
//!
//! - [`markup`] - hint and style class to styled lines
//! - [`append`] - history/active two-region renderer

pub mod append;
pub mod markup;

pub use append::AppendRenderer;
pub use markup::{render_block, Align, BlockStyle, StyledLine};
