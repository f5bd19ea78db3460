//! Report rendering.
//!
//! All renderers are pure functions of the [`ReviewReport`]: rendering
//! the same report twice yields byte-identical output.

mod annotations;
mod markdown;

pub use annotations::render_annotations;
pub use markdown::{parse_inline_comments, render_markdown, InlineComment};
