//! Markdown document parsing and rendering.
//!
//! This module handles:
//! - Parsing markdown with comrak
//! - Rendering to styled lines for display

mod parser;
mod types;

pub use parser::{parse, parse_with_layout};
pub use types::{Document, InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine};
