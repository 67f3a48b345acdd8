//! Theming and color definitions.
//!
//! Two built-in palettes, dark and light, selected by the theme toggle.
//! Colors fall back to the xterm-256 cube when the terminal does not
//! advertise truecolor support.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineColor, InlineStyle, LineType};

/// Visual styling for every rendered element, resolved for one palette.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Heading level 1 style
    pub h1: Style,
    /// Heading level 2 style
    pub h2: Style,
    /// Heading level 3 style
    pub h3: Style,
    /// Heading level 4+ style
    pub h4: Style,
    /// Code block style
    pub code: Style,
    /// Inline code style
    pub inline_code: Style,
    /// Block quote style
    pub quote: Style,
    /// Link style
    pub link: Style,
    /// Image placeholder style
    pub image: Style,
    /// Horizontal rule style
    pub hr: Style,
    /// Line number gutter style
    pub gutter: Style,
    /// Cursor cell style in the editor pane
    pub cursor: Style,
    /// Border of the focused pane
    pub border_focused: Style,
    /// Border of the unfocused pane
    pub border_unfocused: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Theme {
    /// Palette for dark terminals.
    pub fn dark() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            h4: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            image: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            hr: Style::default()
                .fg(Color::Indexed(240))
                .add_modifier(Modifier::DIM),
            gutter: Style::default().fg(Color::DarkGray),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
            border_focused: Style::default().fg(Color::Yellow),
            border_unfocused: Style::default().fg(Color::Indexed(240)),
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(252),
        }
    }

    /// Palette for light terminals. Uses darker indexed colors that stay
    /// readable on a bright background.
    pub fn light() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(28))
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(136))
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(240)),
            inline_code: Style::default()
                .fg(Color::Indexed(124))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::UNDERLINED),
            image: Style::default()
                .fg(Color::Indexed(133))
                .add_modifier(Modifier::ITALIC),
            hr: Style::default()
                .fg(Color::Indexed(245))
                .add_modifier(Modifier::DIM),
            gutter: Style::default().fg(Color::Indexed(247)),
            cursor: Style::default().bg(Color::Indexed(235)).fg(Color::Indexed(255)),
            border_focused: Style::default().fg(Color::Indexed(130)),
            border_unfocused: Style::default().fg(Color::Indexed(250)),
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
        }
    }

    /// Select a palette by the dark-mode flag.
    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Base style for a rendered preview line.
    pub fn style_for_line_type(&self, line_type: &LineType) -> Style {
        match line_type {
            LineType::Heading(1) => self.h1,
            LineType::Heading(2) => self.h2,
            LineType::Heading(3) => self.h3,
            LineType::Heading(_) => self.h4,
            LineType::CodeBlock => self.code,
            LineType::BlockQuote => self.quote,
            LineType::HorizontalRule => self.hr,
            LineType::Image => self.image,
            LineType::ListItem(_) | LineType::Table | LineType::Paragraph | LineType::Empty => {
                Style::default()
            }
        }
    }

    /// Style for an inline span, merged with the base line style.
    pub fn style_for_inline(&self, base: Style, inline: InlineStyle) -> Style {
        let mut style = base;

        if let Some(fg) = inline.fg {
            style = style
                .fg(fg_color_for_terminal(fg))
                .remove_modifier(Modifier::DIM);
        }

        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if inline.link {
            style = style.patch(self.link);
        }
        if inline.code && inline.fg.is_none() {
            style = style.patch(self.inline_code);
        }

        style
    }
}

fn fg_color_for_terminal(fg: InlineColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("MARKPANE_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    let ri = to_cube(r);
    let gi = to_cube(g);
    let bi = to_cube(b);
    16 + (36 * ri) + (6 * gi) + bi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InlineColor;

    #[test]
    fn test_heading_styles_are_bold() {
        let theme = Theme::dark();
        for level in 1..=6 {
            let style = theme.style_for_line_type(&LineType::Heading(level));
            assert!(style.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_h1_is_underlined() {
        let style = Theme::dark().style_for_line_type(&LineType::Heading(1));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_light_and_dark_h1_differ() {
        assert_ne!(Theme::dark().h1.fg, Theme::light().h1.fg);
    }

    #[test]
    fn test_for_mode_selects_palette() {
        assert_eq!(Theme::for_mode(true).status_bg, Theme::dark().status_bg);
        assert_eq!(Theme::for_mode(false).status_bg, Theme::light().status_bg);
    }

    #[test]
    fn test_inline_color_removes_dim_modifier() {
        let theme = Theme::dark();
        let base = Style::default().add_modifier(Modifier::DIM);
        let inline = InlineStyle {
            fg: Some(InlineColor { r: 255, g: 0, b: 0 }),
            ..InlineStyle::default()
        };

        let styled = theme.style_for_inline(base, inline);
        assert!(!styled.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_strong_span_is_bold() {
        let theme = Theme::dark();
        let inline = InlineStyle {
            strong: true,
            ..InlineStyle::default()
        };
        let styled = theme.style_for_inline(Style::default(), inline);
        assert!(styled.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_truecolor_detection_without_colorterm() {
        assert!(!supports_truecolor_from_env(None, Some("xterm-256color")));
    }

    #[test]
    fn test_truecolor_detection_with_colorterm() {
        assert!(supports_truecolor_from_env(
            Some("truecolor"),
            Some("xterm-256color")
        ));
    }

    #[test]
    fn test_fallback_indexed_color_when_not_truecolor() {
        let idx = rgb_to_xterm_256(255, 0, 0);
        assert_eq!(idx, 196);
    }
}
