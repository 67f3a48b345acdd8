use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Focus, Model};

use super::{EDITOR_WIDTH_PERCENT, PREVIEW_LEFT_PADDING, PREVIEW_WIDTH_PERCENT, overlays, status};

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Width available for wrapped preview text at a given terminal width.
///
/// Accounts for the pane split, the pane border, and the left padding.
pub fn preview_content_width(total_width: u16) -> u16 {
    let area = Rect::new(0, 0, total_width, 1);
    let pane_width = split_main_columns(area)[1].width;
    pane_width
        .saturating_sub(2 + PREVIEW_LEFT_PADDING)
        .max(1)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    // Reserve the last line for the status bar.
    let main_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let chunks = split_main_columns(main_area);
    render_editor(model, frame, chunks[0]);
    render_preview(model, frame, chunks[1]);

    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.theme();
    let focused = model.focus == Focus::Editor;

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused
        } else {
            theme.border_unfocused
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);

    let start = model.editor_view.offset();
    let end = (start + inner.height as usize).min(total_lines);
    let cursor = buf.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, theme.gutter)];

        if focused && line_idx == cursor.line {
            // Split the line at the cursor so the cell under it renders inverted.
            let col = cursor.col.min(line_text.len());
            let before = &line_text[..col];
            let (cursor_char, after_start) = match line_text[col..].chars().next() {
                Some(c) => (c.to_string(), col + c.len_utf8()),
                None => (" ".to_string(), col),
            };
            let after = &line_text[after_start..];

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(cursor_char, theme.cursor));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, inner);
    frame.render_widget(Paragraph::new(content), inner);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.theme();
    let focused = model.focus == Focus::Preview;

    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused
        } else {
            theme.border_unfocused
        })
        .padding(Padding::left(PREVIEW_LEFT_PADDING));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_lines = model
        .preview
        .visible_lines(model.preview_view.offset(), inner.height as usize);

    let mut content: Vec<Line> = Vec::new();
    for line in visible_lines {
        let line_style = theme.style_for_line_type(line.line_type());
        if let Some(spans) = line.spans() {
            let styled_spans = spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        theme.style_for_inline(line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>();
            content.push(Line::from(styled_spans));
        } else {
            content.push(Line::styled(line.content().to_string(), line_style));
        }
    }

    // Clear first so styles from previous frames do not leak.
    frame.render_widget(Clear, inner);
    frame.render_widget(Paragraph::new(content), inner);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
