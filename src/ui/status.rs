use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.theme();

    let pane = match model.focus {
        Focus::Editor => "EDIT",
        Focus::Preview => "VIEW",
    };

    let cursor = model.buffer.cursor();
    // The cursor column is a byte offset; report characters to the user.
    let col_chars = model.buffer.line_at(cursor.line).map_or(cursor.col, |line| {
        line[..cursor.col.min(line.len())].chars().count()
    });
    let cursor_info = format!("Ln {}, Col {}", cursor.line + 1, col_chars + 1);

    let edited_indicator = if model.buffer.is_edited() {
        " [edited]"
    } else {
        ""
    };

    let theme_name = if model.dark_mode { "dark" } else { "light" };
    let percent = model.preview_view.scroll_percent();

    let status = format!(
        " {pane}  {cursor_info}{edited_indicator}  [{theme_name}]  [{percent}%]  \
         Tab:focus  Ctrl+T:theme  ?:help  Ctrl+Q:quit"
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(theme.status_bg).fg(theme.status_fg));

    frame.render_widget(status_bar, area);
}
