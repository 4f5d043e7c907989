//! Syntax highlighting for the form preview, using syntect with a built-in
//! base16-style slate theme.

use std::str::FromStr;
use std::sync::LazyLock;

use ratatui::style::{Color as TuiColor, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSettings,
};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use syntect_tui::into_span;

use crate::color::Hsba;

/// Cached syntax set - expensive to load, so we cache it globally.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Slots `base00`..`base0F`, darkest first.
const SLATE: [&str; 16] = [
    "#0f172a", "#1e293b", "#334155", "#64748b", "#94a3b8", "#cbd5e1", "#e2e8f0", "#f8fafc",
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#06b6d4", "#3b82f6", "#a855f7", "#ec4899",
];

fn slot(index: usize) -> Color {
    let rgb = SLATE
        .get(index)
        .and_then(|hex| Hsba::parse(hex))
        .map(Hsba::into_srgb);
    match rgb {
        Some(rgb) => Color {
            r: rgb.red,
            g: rgb.green,
            b: rgb.blue,
            a: 255,
        },
        None => Color::BLACK,
    }
}

/// Syntax highlighter for JSON, YAML and CSS output.
pub struct Highlighter {
    theme: Theme,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            theme: build_theme(),
        }
    }

    /// Get the background color as ratatui Color.
    pub fn background_color(&self) -> TuiColor {
        self.theme
            .settings
            .background
            .map(|c| TuiColor::Rgb(c.r, c.g, c.b))
            .unwrap_or(TuiColor::Reset)
    }

    /// Gutter (line number) color.
    pub fn gutter_color(&self) -> TuiColor {
        self.theme
            .settings
            .gutter_foreground
            .map(|c| TuiColor::Rgb(c.r, c.g, c.b))
            .unwrap_or(TuiColor::DarkGray)
    }

    /// Highlight code and return ratatui Lines.
    pub fn highlight(&self, code: &str, extension: &str) -> Vec<Line<'static>> {
        let syntax = SYNTAX_SET
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        // LinesWithEndings keeps the newline so scopes that end at EOL close properly.
        LinesWithEndings::from(code)
            .map(|line| {
                let ranges = highlighter
                    .highlight_line(line, &SYNTAX_SET)
                    .unwrap_or_default();
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|seg| {
                        into_span(seg).ok().map(|span| {
                            let content = span.content.trim_end_matches('\n').to_string();
                            Span::styled(content, without_background(span.style))
                        })
                    })
                    .filter(|span| !span.content.is_empty())
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// into_span sets an explicit background, which paints whitespace as blocks.
/// Keep the foreground and font modifiers so spans inherit the widget's.
fn without_background(style: Style) -> Style {
    let mut patched = Style::new();
    if let Some(fg) = style.fg {
        patched = patched.fg(fg);
    }
    patched.add_modifier(
        style.add_modifier & (Modifier::BOLD | Modifier::ITALIC | Modifier::UNDERLINED),
    )
}

fn build_theme() -> Theme {
    // Theme settings (editor chrome)
    let settings = ThemeSettings {
        foreground: Some(slot(0x05)),
        background: Some(slot(0x00)),
        caret: Some(slot(0x05)),
        selection: Some(slot(0x02)),
        line_highlight: Some(slot(0x01)),
        gutter: Some(slot(0x01)),
        gutter_foreground: Some(slot(0x04)),
        ..Default::default()
    };

    Theme {
        name: Some("Slate".to_string()),
        author: None,
        settings,
        scopes: build_scope_rules(),
    }
}

/// Scope rules after the base16-textmate template, trimmed to what JSON,
/// YAML and CSS produce.
fn build_scope_rules() -> Vec<ThemeItem> {
    let rule = |scope: &str, color: Color, font_style: Option<FontStyle>| -> ThemeItem {
        ThemeItem {
            scope: ScopeSelectors::from_str(scope).unwrap_or_default(),
            style: StyleModifier {
                foreground: Some(color),
                background: None,
                font_style,
            },
        }
    };

    vec![
        rule(
            "comment, punctuation.definition.comment",
            slot(0x03),
            Some(FontStyle::ITALIC),
        ),
        rule(
            "punctuation, meta.brace, keyword.operator",
            slot(0x05),
            None,
        ),
        // JSON keys, YAML keys, CSS properties
        rule(
            "support.type.property-name, entity.name.tag, meta.property-name",
            slot(0x0D),
            None,
        ),
        rule(
            "constant, constant.numeric, constant.language, keyword.other.unit",
            slot(0x09),
            None,
        ),
        rule("string", slot(0x0B), None),
        rule(
            "support.constant.property-value, constant.other.color",
            slot(0x0C),
            None,
        ),
        rule(
            "entity.other.attribute-name, entity.name.tag.css, meta.selector",
            slot(0x0A),
            None,
        ),
        rule(
            "keyword, keyword.control.at-rule, storage",
            slot(0x0E),
            Some(FontStyle::BOLD),
        ),
        rule("invalid", slot(0x08), None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lines_are_preserved() {
        let lines = Highlighter::new().highlight("{\n  \"a\": 1\n}\n", "json");
        assert_eq!(lines.len(), 3);
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  \"a\": 1");
    }

    #[test]
    fn spans_inherit_the_widget_background() {
        let lines = Highlighter::new().highlight("a {\n  color: red;\n}\n", "css");
        let spans: Vec<_> = lines.iter().flat_map(|line| line.spans.iter()).collect();
        assert!(!spans.is_empty());
        assert!(spans.iter().all(|span| span.style.bg.is_none()));
        assert!(spans.iter().all(|span| span.style.fg.is_some()));
    }

    #[test]
    fn font_modifiers_survive_the_patch() {
        let style = Style::new()
            .fg(TuiColor::Red)
            .bg(TuiColor::Blue)
            .add_modifier(Modifier::BOLD | Modifier::DIM);
        let patched = without_background(style);
        assert_eq!(patched.fg, Some(TuiColor::Red));
        assert_eq!(patched.bg, None);
        assert_eq!(patched.add_modifier, Modifier::BOLD);
    }

    #[test]
    fn slate_background_is_darkest_slot() {
        assert_eq!(
            Highlighter::new().background_color(),
            TuiColor::Rgb(0x0f, 0x17, 0x2a)
        );
    }
}
