use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{Focus, Model};
use crate::commands::{MENUS, TOOLBAR};
use crate::editor::DisplayMode;

use super::{
    byte_at_column, display_column, horizontal_offset, overlays, panel_layout, status, style,
    surface_inner, window_layout,
};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = window_layout(area);

    render_menu_bar(model, frame, layout.menu_bar);
    render_toolbar(frame, layout.toolbar);
    render_panel(model, frame, layout.panel);
    render_surface(model, frame, layout.surface);
    status::render_status_bar(model, frame, layout.status);

    if let Some(state) = model.menu {
        overlays::render_menu_dropdown(state, frame, area);
    }
    if let Some(dialog) = model.dialog() {
        overlays::render_dialog(dialog, frame, area);
    }
}

/// Spans for a row of labels laid out like [`crate::commands::menu_slots`].
fn bar_spans<'a>(
    labels: impl Iterator<Item = &'a str>,
    label_style: impl Fn(usize) -> Style,
) -> Vec<Span<'a>> {
    let mut spans = vec![Span::raw(" ")];
    for (idx, label) in labels.enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {label} "), label_style(idx)));
    }
    spans
}

fn render_menu_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let open = model.menu.map(|state| state.menu);
    let spans = bar_spans(MENUS.iter().map(|menu| menu.title), |idx| {
        if open == Some(idx) {
            style::SELECTED
        } else {
            style::BAR
        }
    });
    frame.render_widget(Paragraph::new(Line::from(spans)).style(style::BAR), area);
}

fn render_toolbar(frame: &mut Frame, area: Rect) {
    let spans = bar_spans(TOOLBAR.iter().map(|(label, _)| *label), |_| style::BUTTON);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_panel(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let border = if model.focus.in_panel() {
        style::FOCUSED_BORDER
    } else {
        Style::default()
    };
    let block = Block::default()
        .title("Replace")
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let controls = panel_layout(area);
    render_field(
        frame,
        controls.search,
        &model.search_input,
        "search",
        model.focus == Focus::SearchField,
    );
    render_field(
        frame,
        controls.replace,
        &model.replace_input,
        "replace",
        model.focus == Focus::ReplaceField,
    );

    let button_style = if model.focus == Focus::ReplaceButton {
        style::SELECTED
    } else {
        style::BUTTON
    };
    let button = Paragraph::new(Line::styled("[ Search and Replace ]", button_style))
        .alignment(Alignment::Center);
    frame.render_widget(button, controls.button);
}

fn render_field(frame: &mut Frame, area: Rect, value: &str, placeholder: &str, focused: bool) {
    let border = if focused {
        style::FOCUSED_BORDER
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);

    let line = if value.is_empty() && !focused {
        Line::styled(placeholder.to_string(), style::HINT)
    } else {
        // Keep the end of the text (and the cursor) in view.
        let room = usize::from(inner.width.saturating_sub(1));
        let width = display_column(value, value.len());
        let start = byte_at_column(value, width.saturating_sub(room));
        let mut spans = vec![Span::raw(value[start..].to_string())];
        if focused {
            spans.push(Span::styled(" ", style::CURSOR));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn surface_title(model: &Model) -> String {
    let name = model
        .file_path
        .as_ref()
        .and_then(|path| path.file_name())
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let dirty = if model.surface.buffer().is_dirty() {
        "*"
    } else {
        ""
    };
    let read_only = if model.surface.is_read_only() {
        " [read-only]"
    } else {
        ""
    };
    format!(" {name}{dirty} - {}{read_only} ", model.surface.mode().label())
}

fn render_surface(model: &Model, frame: &mut Frame, area: Rect) {
    let border = if model.focus == Focus::Editor {
        style::FOCUSED_BORDER
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(surface_title(model))
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let inner = surface_inner(area);
    match model.surface.mode() {
        DisplayMode::Raw => render_raw(model, frame, inner),
        DisplayMode::Markdown => render_markdown(model, frame, inner),
    }
}

/// Columns from the left edge of the surface to the first text column.
pub(crate) fn gutter_columns(total_lines: usize) -> u16 {
    line_number_width(total_lines) + 1
}

/// Display-column scroll that keeps the cursor of the raw editor visible.
pub(crate) fn raw_horizontal_offset(model: &Model, text_width: u16) -> usize {
    let buffer = model.surface.buffer();
    let cursor = buffer.cursor();
    let line = buffer.line_at(cursor.line).unwrap_or_default();
    horizontal_offset(display_column(&line, cursor.col), text_width)
}

fn render_raw(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.surface.buffer();
    let total_lines = buffer.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = area.width.saturating_sub(gutter_columns(total_lines));
    let h_offset = raw_horizontal_offset(model, text_width);
    let cursor = buffer.cursor();
    let show_cursor =
        model.focus == Focus::Editor && model.menu.is_none() && model.dialog().is_none();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in model.editor_viewport.visible_range() {
        let line_text = buffer.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, style::GUTTER)];

        let start = byte_at_column(&line_text, h_offset);
        let visible = &line_text[start..];

        if show_cursor && line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let col = cursor.col.clamp(start, line_text.len()) - start;
            let (before, rest) = visible.split_at(col);
            let mut chars = rest.chars();
            let cursor_char = chars.next().map_or_else(|| " ".to_string(), String::from);
            let after = chars.as_str();

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(cursor_char, style::CURSOR));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(visible.to_string()));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), area);
}

fn render_markdown(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(document) = model.surface.rendered() else {
        return;
    };
    let viewport = &model.preview_viewport;
    let visible_lines = document.visible_lines(viewport.offset(), viewport.height() as usize);

    let mut content: Vec<Line> = Vec::new();
    for line in visible_lines {
        let line_style = style::style_for_line_type(line.line_type());
        if let Some(spans) = line.spans() {
            let styled_spans = spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style::style_for_inline(line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>();
            content.push(Line::from(styled_spans));
        } else {
            content.push(Line::styled(line.content().to_string(), line_style));
        }
    }

    frame.render_widget(Paragraph::new(content), area);
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
