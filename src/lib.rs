// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. document::Document)
    clippy::module_name_repetitions
)]

//! # Markpane
//!
//! A split-pane terminal markdown previewer with live editing.
//!
//! The left pane is a plain-text editor over the markdown source; the right
//! pane shows the rendered preview, reparsed after every keystroke. A theme
//! toggle flips both panes between a dark and a light palette.
//!
//! Markpane renders markdown with:
//! - Syntax-highlighted code blocks
//! - GFM tables, task lists, strikethrough and autolinks
//! - Every source newline rendered as a hard line break
//!
//! ## Architecture
//!
//! Markpane uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Markdown parsing and preview rendering
//! - [`editor`]: The rope-backed source buffer and cursor
//! - [`highlight`]: Syntax highlighting
//! - [`ui`]: Terminal UI components
//! - [`config`]: Persisted startup flags

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod highlight;
pub mod sample;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::editor::SourceBuffer;
    pub use crate::ui::viewport::Viewport;
}
