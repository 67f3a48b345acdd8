//! Syntax highlighting for code blocks.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions. The
//! palette follows the application theme: code colors are picked from a dark
//! or light syntect theme and kept readable against that background.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::document::{InlineColor, InlineSpan, InlineStyle};

/// Which background the highlighted code will be drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Light,
    Dark,
}

/// Highlight a fenced code block into styled spans, one `Vec` per source line.
///
/// Unknown or missing languages fall back to plain code-styled spans with no
/// colors. The text content of the spans is always the code itself.
pub fn highlight_code(language: Option<&str>, code: &str, palette: Palette) -> Vec<Vec<InlineSpan>> {
    let mut lines = Vec::new();
    let syntax_set = syntax_set();
    let syntax = language
        .and_then(|lang| syntax_set.find_syntax_by_token(lang))
        .or_else(|| language.and_then(|lang| syntax_set.find_syntax_by_name(lang)));

    let Some(syntax) = syntax else {
        for line in code.lines() {
            let style = InlineStyle {
                code: true,
                ..InlineStyle::default()
            };
            lines.push(vec![InlineSpan::new(line.to_string(), style)]);
        }
        return lines;
    };

    let mut highlighter = HighlightLines::new(syntax, theme(palette));
    for line in code.lines() {
        let ranges = highlighter
            .highlight_line(line, syntax_set)
            .unwrap_or_default();
        let mut spans = Vec::new();
        for (style, text) in ranges {
            let fg = InlineColor {
                r: style.foreground.r,
                g: style.foreground.g,
                b: style.foreground.b,
            };
            let inline_style = InlineStyle {
                code: true,
                fg: Some(adjust_fg_for_palette(fg, palette)),
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(text.to_string(), inline_style));
        }
        lines.push(spans);
    }

    lines
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme(palette: Palette) -> &'static Theme {
    static DARK_THEME: OnceLock<Theme> = OnceLock::new();
    static LIGHT_THEME: OnceLock<Theme> = OnceLock::new();
    let (cache, preferred): (&OnceLock<Theme>, &[&str]) = match palette {
        Palette::Dark => (
            &DARK_THEME,
            &[
                "Monokai Extended",
                "Monokai Extended Bright",
                "Dracula",
                "Solarized (dark)",
                "base16-ocean.dark",
            ],
        ),
        Palette::Light => (
            &LIGHT_THEME,
            &["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
        ),
    };

    cache.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

/// Darken colors that would be unreadable on a light background.
fn adjust_fg_for_palette(color: InlineColor, palette: Palette) -> InlineColor {
    match palette {
        Palette::Dark => color,
        Palette::Light => {
            let luma = (0.2126 * f32::from(color.r))
                + (0.7152 * f32::from(color.g))
                + (0.0722 * f32::from(color.b));
            if luma < 155.0 {
                return color;
            }

            InlineColor {
                r: (f32::from(color.r) * 0.42).round() as u8,
                g: (f32::from(color.g) * 0.42).round() as u8,
                b: (f32::from(color.b) * 0.42).round() as u8,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let code = "fn main() {\n    let x = 1;\n}\n";
        let lines = highlight_code(Some("rust"), code, Palette::Dark);

        assert_eq!(lines.len(), 3);
        let has_color = lines
            .iter()
            .flatten()
            .any(|span| span.style().fg.is_some());
        assert!(has_color, "Expected at least one colored span for Rust");
    }

    #[test]
    fn test_highlight_unknown_language_falls_back_to_plain() {
        let code = "just text";
        let lines = highlight_code(Some("nope"), code, Palette::Dark);

        assert_eq!(lines.len(), 1);
        let has_color = lines
            .iter()
            .flatten()
            .any(|span| span.style().fg.is_some());
        assert!(!has_color, "Unknown language should not colorize");
    }

    #[test]
    fn test_highlight_plain_code_sets_code_style() {
        let code = "plain";
        let lines = highlight_code(None, code, Palette::Dark);
        let spans = &lines[0];
        assert!(spans.iter().all(|span| span.style().code));
    }

    #[test]
    fn test_highlight_same_text_for_both_palettes() {
        let code = "fn main() {}";
        let dark: String = highlight_code(Some("rust"), code, Palette::Dark)
            .iter()
            .flatten()
            .map(InlineSpan::text)
            .collect();
        let light: String = highlight_code(Some("rust"), code, Palette::Light)
            .iter()
            .flatten()
            .map(InlineSpan::text)
            .collect();
        assert_eq!(dark, light);
    }

    #[test]
    fn test_light_palette_darkens_bright_fg() {
        let bright = InlineColor {
            r: 250,
            g: 250,
            b: 250,
        };
        let adjusted = adjust_fg_for_palette(bright, Palette::Light);
        let luma = (0.2126 * f32::from(adjusted.r))
            + (0.7152 * f32::from(adjusted.g))
            + (0.0722 * f32::from(adjusted.b));
        assert!(luma < 120.0, "Adjusted color still too bright: {luma}");
    }

    #[test]
    fn test_dark_palette_keeps_colors() {
        let bright = InlineColor {
            r: 250,
            g: 250,
            b: 250,
        };
        assert_eq!(adjust_fg_for_palette(bright, Palette::Dark), bright);
    }
}
