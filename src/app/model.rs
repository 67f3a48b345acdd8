use std::path::PathBuf;

use tracing::warn;

use crate::document::{self, Document};
use crate::editor::SourceBuffer;
use crate::highlight::Palette;
use crate::ui::theme::Theme;
use crate::ui::viewport::Viewport;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Preview,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The source buffer
/// is the single authority on the text; the preview is recomputed from it
/// after every edit.
#[derive(Debug)]
pub struct Model {
    /// The editable markdown source
    pub buffer: SourceBuffer,
    /// Rendered preview of the current source
    pub preview: Document,
    /// Whether the dark palette is active
    pub dark_mode: bool,
    /// Which pane has keyboard focus
    pub focus: Focus,
    /// Viewport over the editor pane
    pub editor_view: Viewport,
    /// Viewport over the preview pane
    pub preview_view: Viewport,
    /// Optional maximum preview wrap width in columns
    pub wrap_width: Option<u16>,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Scroll offset inside the help overlay
    pub help_scroll: usize,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Full terminal dimensions (columns, rows)
    pub terminal_size: (u16, u16),
}

impl Model {
    /// Create a new model from initial source text.
    pub fn new(source: &str, terminal_size: (u16, u16)) -> Self {
        let buffer = SourceBuffer::from_text(source);
        let mut model = Self {
            buffer,
            preview: Document::empty(),
            dark_mode: false,
            focus: Focus::Editor,
            editor_view: Viewport::new(0, 0, 0),
            preview_view: Viewport::new(0, 0, 0),
            wrap_width: None,
            help_visible: false,
            help_scroll: 0,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            terminal_size,
        };
        model.apply_terminal_size(terminal_size);
        model.refresh_preview();
        model
    }

    /// The theme for the current dark-mode flag.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.dark_mode)
    }

    /// The syntax-highlighting palette for the current dark-mode flag.
    pub const fn palette(&self) -> Palette {
        if self.dark_mode {
            Palette::Dark
        } else {
            Palette::Light
        }
    }

    /// Width to wrap preview text at, honoring the configured cap.
    pub(super) fn layout_width(&self) -> u16 {
        let pane_width = crate::ui::preview_content_width(self.terminal_size.0);
        match self.wrap_width {
            Some(w) if w > 0 => pane_width.min(w),
            _ => pane_width,
        }
    }

    /// Reparse the source into a fresh preview.
    ///
    /// On a parse failure the previous preview is kept so the user never
    /// loses the rendered view mid-edit.
    pub(super) fn refresh_preview(&mut self) {
        let source = self.buffer.text();
        match document::parse_with_layout(&source, self.layout_width(), self.palette()) {
            Ok(preview) => {
                self.preview = preview;
                self.preview_view.set_total_lines(self.preview.line_count());
            }
            Err(err) => warn!(error = %err, "preview parse failed, keeping previous render"),
        }
        self.editor_view.set_total_lines(self.buffer.line_count());
    }

    /// Keep the cursor on screen and the preview roughly aligned with it.
    pub(super) fn follow_cursor(&mut self) {
        let cursor_line = self.buffer.cursor().line;
        self.editor_view.ensure_visible(cursor_line);

        let last_line = self.buffer.line_count().saturating_sub(1);
        if last_line > 0 {
            // Numerator and denominator are small line counts
            #[allow(clippy::cast_precision_loss)]
            self.preview_view
                .follow_fraction(cursor_line as f64 / last_line as f64);
        } else {
            self.preview_view.go_to_top();
        }
    }

    /// Recompute pane viewports for a terminal size.
    pub(super) fn apply_terminal_size(&mut self, size: (u16, u16)) {
        self.terminal_size = size;

        // One row for the status bar, then a bordered pane on each side.
        let main = ratatui::layout::Rect::new(0, 0, size.0, size.1.saturating_sub(1));
        let chunks = crate::ui::split_main_columns(main);
        let pane_height = main.height.saturating_sub(2);

        self.editor_view
            .resize(chunks[0].width.saturating_sub(2), pane_height);
        self.preview_view
            .resize(chunks[1].width.saturating_sub(2), pane_height);
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            buffer: SourceBuffer::empty(),
            preview: Document::empty(),
            dark_mode: false,
            focus: Focus::Editor,
            editor_view: Viewport::new(80, 24, 0),
            preview_view: Viewport::new(80, 24, 0),
            wrap_width: None,
            help_visible: false,
            help_scroll: 0,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            terminal_size: (80, 24),
        }
    }
}
