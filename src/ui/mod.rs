//! Terminal UI rendering.
//!
//! The screen is split into an editor pane on the left and a preview pane
//! on the right, with a one-line status bar at the bottom.

pub mod theme;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{line_number_width, preview_content_width, render, split_main_columns};

/// Left padding inside the preview pane.
pub const PREVIEW_LEFT_PADDING: u16 = 1;

const EDITOR_WIDTH_PERCENT: u16 = 50;
const PREVIEW_WIDTH_PERCENT: u16 = 50;

#[cfg(test)]
mod tests;
