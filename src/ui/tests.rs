use super::*;
use crate::app::{Focus, Message, Model, update};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_render_shows_both_pane_titles() {
    let mut model = Model::new("# Hello", (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("Source"));
    assert!(content.contains("Preview"));
}

#[test]
fn test_source_text_appears_in_editor_pane() {
    let mut model = Model::new("plain source text", (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    // The source is wider than half the terminal, so look for the prefix.
    let content = buffer_content(&terminal);
    assert!(content.contains("plain source"));
}

#[test]
fn test_editor_pane_shows_line_numbers() {
    let mut model = Model::new("one\ntwo\nthree", (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("1 one"));
    assert!(content.contains("2 two"));
    assert!(content.contains("3 three"));
}

#[test]
fn test_heading_renders_bold_in_preview() {
    let mut model = Model::new("# Title", (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let bold_title_cell = buffer
        .content()
        .iter()
        .any(|c| c.symbol() == "T" && c.modifier.contains(Modifier::BOLD));
    assert!(bold_title_cell, "heading text should render bold");
}

#[test]
fn test_edit_appears_in_preview_after_update() {
    let model = Model::new("", (80, 24));
    let mut model = "hello".chars().fold(model, |m, c| {
        update(m, Message::EditorInsertChar(c))
    });

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_content(&terminal);
    let occurrences = content.matches("hello").count();
    assert!(occurrences >= 2, "typed text should show in both panes");
}

#[test]
fn test_status_bar_reports_theme_and_cursor() {
    let mut model = Model::new("abc", (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("[light]"));
    assert!(content.contains("Ln 1, Col 1"));

    let mut model = update(model, Message::ToggleTheme);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(buffer_content(&terminal).contains("[dark]"));
}

#[test]
fn test_status_bar_counts_columns_in_chars() {
    use crate::editor::Direction;

    let model = Model::new("日本語", (80, 24));
    // One right-arrow puts the cursor at byte 3, character 2.
    let mut model = update(model, Message::EditorMoveCursor(Direction::Right));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_content(&terminal).contains("Ln 1, Col 2"));
}

#[test]
fn test_status_bar_marks_edited_buffer() {
    let model = Model::new("abc", (80, 24));
    let mut model = update(model, Message::EditorInsertChar('!'));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_content(&terminal).contains("[edited]"));
}

#[test]
fn test_help_overlay_renders_on_top() {
    let model = Model::new("# Test", (80, 24));
    let mut model = update(model, Message::ToggleHelp);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("Help"));
    assert!(content.contains("Switch pane focus"));
}

#[test]
fn test_render_empty_source_does_not_panic() {
    let mut model = Model::new("", (80, 24));
    let mut terminal = create_test_terminal();
    let result = terminal.draw(|frame| render(&mut model, frame));
    assert!(result.is_ok());
}

#[test]
fn test_render_cursor_on_multibyte_line() {
    use crate::editor::Direction;

    let model = Model::new("hello\n日本語", (80, 24));
    let model = update(model, Message::EditorMoveTo(0, 4));
    let mut model = update(model, Message::EditorMoveCursor(Direction::Down));

    let mut terminal = create_test_terminal();
    let result = terminal.draw(|frame| render(&mut model, frame));
    assert!(result.is_ok());
    assert!(buffer_content(&terminal).contains("日"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let mut model = Model::new("# Test\n\nbody", (80, 24));
    model.focus = Focus::Preview;
    let backend = TestBackend::new(4, 2);
    let mut terminal = Terminal::new(backend).unwrap();
    let result = terminal.draw(|frame| render(&mut model, frame));
    assert!(result.is_ok());
}

#[test]
fn test_preview_content_width_accounts_for_borders() {
    let width = preview_content_width(80);
    // Half of 80 minus border cells and padding.
    assert_eq!(width, 37);
}

#[test]
fn test_line_number_width_grows_with_line_count() {
    assert_eq!(line_number_width(5), 1);
    assert_eq!(line_number_width(42), 2);
    assert_eq!(line_number_width(999), 3);
    assert_eq!(line_number_width(1_000), 4);
}
