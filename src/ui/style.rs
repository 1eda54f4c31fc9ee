//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineStyle, LineType};

/// Bars: menu bar, toolbar, and status bar.
pub const BAR: Style = Style::new().bg(Color::DarkGray).fg(Color::White);
/// Highlighted entry on a bar or in a list.
pub const SELECTED: Style = Style::new().bg(Color::Cyan).fg(Color::Black);
/// Block cursor in the raw editor and in input fields.
pub const CURSOR: Style = Style::new().bg(Color::White).fg(Color::Black);
/// Toolbar and dialog buttons.
pub const BUTTON: Style = Style::new().bg(Color::Indexed(238)).fg(Color::White);
/// Dialog section headings.
pub const SECTION: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
/// Line number gutter.
pub const GUTTER: Style = Style::new().fg(Color::DarkGray);
/// Border of the widget holding keyboard focus.
pub const FOCUSED_BORDER: Style = Style::new().fg(Color::Yellow);
/// Dialog body.
pub const DIALOG: Style = Style::new().bg(Color::Black).fg(Color::White);
/// Dimmed helper text.
pub const HINT: Style = Style::new().fg(Color::Indexed(245));

/// Get the style for a rendered markdown line.
pub fn style_for_line_type(line_type: &LineType) -> Style {
    match line_type {
        LineType::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(4) => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(5) => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),

        LineType::CodeBlock => Style::default().fg(Color::Indexed(245)),

        LineType::BlockQuote => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC),

        LineType::HorizontalRule => Style::default()
            .fg(Color::Indexed(240))
            .add_modifier(Modifier::DIM),

        // Placeholder text stands out from prose
        LineType::Image => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::ITALIC),

        LineType::Table => Style::default().fg(Color::Indexed(250)),

        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

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
        style = style
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED);
    }
    if inline.code {
        style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
    }

    style
}
