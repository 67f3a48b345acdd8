//! The editable markdown source.
//!
//! Provides a rope-backed text buffer with cursor management, designed for
//! integration into the TEA architecture as the single source of truth for
//! the document text.

mod buffer;

pub use buffer::{Cursor, Direction, SourceBuffer};
