use crate::app::model::Focus;
use crate::app::Model;
use crate::editor::Direction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Preview navigation
    /// Scroll preview up by n lines
    ScrollUp(usize),
    /// Scroll preview down by n lines
    ScrollDown(usize),
    /// Scroll preview up one page
    PageUp,
    /// Scroll preview down one page
    PageDown,
    /// Scroll preview up half a page
    HalfPageUp,
    /// Scroll preview down half a page
    HalfPageDown,
    /// Go to beginning of preview
    GoToTop,
    /// Go to end of preview
    GoToBottom,

    // Panes and appearance
    /// Switch focus between editor and preview
    SwitchFocus,
    /// Flip between the dark and light palettes
    ToggleTheme,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Scroll help overlay up
    HelpScrollUp,
    /// Scroll help overlay down
    HelpScrollDown,

    // Editing
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert a text block at the cursor (paste)
    EditorInsertText(String),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Replace the entire source with new text
    ReplaceSource(String),

    // Cursor movement
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    EditorMoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    EditorMoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Move cursor to absolute position (line, col), e.g. from a mouse click
    EditorMoveTo(usize, usize),
    /// Scroll editor viewport up by n lines
    EditorScrollUp(usize),
    /// Scroll editor viewport down by n lines
    EditorScrollDown(usize),

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function. Every edit reparses
/// the preview so it always reflects the current source.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Preview navigation
        Message::ScrollUp(n) => model.preview_view.scroll_up(n),
        Message::ScrollDown(n) => model.preview_view.scroll_down(n),
        Message::PageUp => model.preview_view.page_up(),
        Message::PageDown => model.preview_view.page_down(),
        Message::HalfPageUp => model.preview_view.half_page_up(),
        Message::HalfPageDown => model.preview_view.half_page_down(),
        Message::GoToTop => model.preview_view.go_to_top(),
        Message::GoToBottom => model.preview_view.go_to_bottom(),

        // Panes and appearance
        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Editor => Focus::Preview,
                Focus::Preview => Focus::Editor,
            };
        }
        Message::ToggleTheme => {
            model.dark_mode = !model.dark_mode;
            // Code block colors depend on the palette.
            model.refresh_preview();
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll = 0;
        }
        Message::HideHelp => model.help_visible = false,
        Message::HelpScrollUp => model.help_scroll = model.help_scroll.saturating_sub(1),
        Message::HelpScrollDown => model.help_scroll = model.help_scroll.saturating_add(1),

        // Editing
        Message::EditorInsertChar(c) => {
            model.buffer.insert_char(c);
            model.refresh_preview();
            model.follow_cursor();
        }
        Message::EditorInsertText(text) => {
            model.buffer.insert_str(&text);
            model.refresh_preview();
            model.follow_cursor();
        }
        Message::EditorDeleteBack => {
            model.buffer.delete_back();
            model.refresh_preview();
            model.follow_cursor();
        }
        Message::EditorDeleteForward => {
            model.buffer.delete_forward();
            model.refresh_preview();
            model.follow_cursor();
        }
        Message::EditorSplitLine => {
            model.buffer.split_line();
            model.refresh_preview();
            model.follow_cursor();
        }
        Message::ReplaceSource(text) => {
            model.buffer.replace_text(&text);
            model.refresh_preview();
            model.follow_cursor();
        }

        // Cursor movement
        Message::EditorMoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            model.follow_cursor();
        }
        Message::EditorMoveHome => {
            model.buffer.move_home();
            model.follow_cursor();
        }
        Message::EditorMoveEnd => {
            model.buffer.move_end();
            model.follow_cursor();
        }
        Message::EditorMoveWordLeft => {
            model.buffer.move_word_left();
            model.follow_cursor();
        }
        Message::EditorMoveWordRight => {
            model.buffer.move_word_right();
            model.follow_cursor();
        }
        Message::EditorMoveToStart => {
            model.buffer.move_to_start();
            model.follow_cursor();
        }
        Message::EditorMoveToEnd => {
            model.buffer.move_to_end();
            model.follow_cursor();
        }
        Message::EditorMoveTo(line, col) => {
            // Mouse clicks target the editor, so they claim focus too.
            model.focus = Focus::Editor;
            model.buffer.move_to(line, col);
            model.follow_cursor();
        }
        Message::EditorScrollUp(n) => model.editor_view.scroll_up(n),
        Message::EditorScrollDown(n) => model.editor_view.scroll_down(n),

        // Window
        Message::Resize(width, height) => {
            model.apply_terminal_size((width, height));
            model.refresh_preview();
            model.follow_cursor();
        }
        Message::Redraw => {}

        // Application
        Message::Quit => model.should_quit = true,
    }

    model
}
