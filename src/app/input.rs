use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::app::model::Focus;
use crate::app::{App, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Paste(text) if model.focus == Focus::Editor => {
                Some(Message::EditorInsertText(normalize_paste(&text)))
            }
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => Some(Message::HideHelp),
            };
        }

        // Global bindings win over pane-local ones.
        match key.code {
            KeyCode::Tab => return Some(Message::SwitchFocus),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::ToggleTheme);
            }
            KeyCode::Char('q' | 'c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::Quit);
            }
            _ => {}
        }

        match model.focus {
            Focus::Editor => Self::handle_editor_key(key, model),
            Focus::Preview => Self::handle_preview_key(key),
        }
    }

    fn handle_editor_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveWordLeft)
            }
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveWordRight)
            }
            KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveToStart)
            }
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorMoveToEnd)
            }
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorScrollUp(
                model.editor_view.height() as usize,
            )),
            KeyCode::PageDown => Some(Message::EditorScrollDown(
                model.editor_view.height() as usize,
            )),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Esc => Some(Message::SwitchFocus),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::EditorInsertChar(c))
            }
            _ => None,
        }
    }

    fn handle_preview_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('t') => Some(Message::ToggleTheme),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }

        let (editor_area, preview_area) = pane_areas(model);
        let in_editor = point_in_rect(mouse.column, mouse.row, editor_area);
        let in_preview = point_in_rect(mouse.column, mouse.row, preview_area);

        match mouse.kind {
            MouseEventKind::ScrollDown if in_editor => Some(Message::EditorScrollDown(3)),
            MouseEventKind::ScrollUp if in_editor => Some(Message::EditorScrollUp(3)),
            MouseEventKind::ScrollDown if in_preview => Some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp if in_preview => Some(Message::ScrollUp(3)),
            MouseEventKind::Down(MouseButton::Left) if in_editor => {
                // Also focuses the editor; see the EditorMoveTo transition.
                editor_click_target(model, editor_area, mouse.column, mouse.row)
                    .map(|(line, col)| Message::EditorMoveTo(line, col))
            }
            MouseEventKind::Down(MouseButton::Left)
                if in_preview && model.focus == Focus::Editor =>
            {
                Some(Message::SwitchFocus)
            }
            _ => None,
        }
    }
}

/// Inner (borderless) areas of the editor and preview panes.
fn pane_areas(model: &Model) -> (Rect, Rect) {
    let main = Rect::new(
        0,
        0,
        model.terminal_size.0,
        model.terminal_size.1.saturating_sub(1),
    );
    let chunks = crate::ui::split_main_columns(main);
    (inner_rect(chunks[0]), inner_rect(chunks[1]))
}

fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Map a click in the editor pane to a (line, byte column) cursor target.
fn editor_click_target(model: &Model, area: Rect, col: u16, row: u16) -> Option<(usize, usize)> {
    let rel_row = row.checked_sub(area.y)? as usize;
    let line = model.editor_view.offset() + rel_row;
    if line >= model.buffer.line_count() {
        return None;
    }

    let gutter = crate::ui::line_number_width(model.buffer.line_count()) + 1;
    let display_col = col.saturating_sub(area.x).saturating_sub(gutter) as usize;

    let line_text = model.buffer.line_at(line)?;
    Some((line, byte_col_for_display_col(&line_text, display_col)))
}

/// Walk a line's characters to convert a display column into a byte offset.
fn byte_col_for_display_col(line: &str, display_col: usize) -> usize {
    let mut width = 0usize;
    for (byte_idx, ch) in line.char_indices() {
        if width >= display_col {
            return byte_idx;
        }
        width += ch.width().unwrap_or(0);
    }
    line.len()
}

/// Pasted text arrives with platform line endings; the buffer stores `\n`.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_col_for_ascii() {
        assert_eq!(byte_col_for_display_col("hello", 3), 3);
        assert_eq!(byte_col_for_display_col("hello", 99), 5);
    }

    #[test]
    fn test_byte_col_for_multibyte() {
        // 'é' is 2 bytes but 1 column wide
        assert_eq!(byte_col_for_display_col("héllo", 2), 3);
    }

    #[test]
    fn test_byte_col_for_wide_chars() {
        // CJK chars are 3 bytes and 2 columns wide
        assert_eq!(byte_col_for_display_col("日本", 2), 3);
        assert_eq!(byte_col_for_display_col("日本", 4), 6);
    }

    #[test]
    fn test_normalize_paste_line_endings() {
        assert_eq!(normalize_paste("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
