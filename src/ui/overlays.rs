use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use super::{menu_dropdown_rect, style};
use crate::app::MenuState;
use crate::app::dialogs::{
    Dialog, FilePicker, MessageDialog, SettingsDialog, SettingsFocus, StartupWarning,
    WARNING_DETAILS, WARNING_HEADLINE, WARNING_INFORMATIVE, WARNING_QUESTION, WARNING_TITLE,
    WarningStage,
};
use crate::commands::{MENUS, MenuItem};

pub fn render_menu_dropdown(state: MenuState, frame: &mut Frame, area: Rect) {
    let (Some(menu), Some(popup)) = (MENUS.get(state.menu), menu_dropdown_rect(state.menu, area))
    else {
        return;
    };
    let inner_width = usize::from(popup.width.saturating_sub(2));

    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            MenuItem::Action(label, id) => {
                let shortcut = id.shortcut().unwrap_or_default();
                let gap = inner_width
                    .saturating_sub(label.chars().count() + shortcut.len() + 2)
                    .max(1);
                let text = format!(" {label}{}{shortcut} ", " ".repeat(gap));
                if idx == state.item {
                    Line::styled(text, style::SELECTED)
                } else {
                    Line::raw(text)
                }
            }
            MenuItem::Separator => Line::styled("─".repeat(inner_width), style::HINT),
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).style(style::DIALOG);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_dialog(dialog: &Dialog, frame: &mut Frame, area: Rect) {
    match dialog {
        Dialog::Message(message) => render_message(message, frame, area),
        Dialog::Settings(settings) => render_settings(settings, frame, area),
        Dialog::FilePicker(picker) => render_file_picker(picker, frame, area),
        Dialog::Warning(warning) => render_warning(warning, frame, area),
    }
}

/// A centered row of `[ label ]` buttons.
fn button_row(labels: &[&str], selected: Option<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, label) in labels.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if selected == Some(idx) {
            style::SELECTED
        } else {
            style::BUTTON
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
    }
    Line::from(spans).alignment(Alignment::Center)
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style::DIALOG)
}

/// Width of the widest line, plus room for borders and padding.
fn fit_width(lines: &[&str], area: Rect) -> u16 {
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    u16::try_from(widest + 6)
        .unwrap_or(u16::MAX)
        .clamp(30, area.width.max(30))
}

/// Rows a bordered, padded dialog `width` wide needs for `lines`.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(4).max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(inner).max(1))
        .sum();
    // Word wrapping can need a row more than the character count suggests.
    u16::try_from(rows + 5).unwrap_or(u16::MAX)
}

fn render_message(message: &MessageDialog, frame: &mut Frame, area: Rect) {
    let text_lines: Vec<&str> = message.text.lines().collect();
    let width = fit_width(&text_lines, area);
    let mut lines: Vec<Line> = text_lines.iter().map(|l| Line::raw(*l)).collect();
    lines.push(Line::raw(""));
    lines.push(button_row(&["Ok"], Some(0)));
    let popup = centered_popup_rect(width, wrapped_height(&lines, width), area);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(dialog_block(&message.title)),
        popup,
    );
}

fn render_settings(settings: &SettingsDialog, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(40, 9, area);
    let mark = if settings.show_warnings { "x" } else { " " };
    let checkbox_style = if settings.focus == SettingsFocus::Checkbox {
        style::SELECTED
    } else {
        Style::default()
    };
    let selected = match settings.focus {
        SettingsFocus::Checkbox => None,
        SettingsFocus::Ok => Some(0),
        SettingsFocus::Cancel => Some(1),
    };

    let lines = vec![
        Line::styled("Application Settings", style::SECTION),
        Line::raw(""),
        Line::styled(format!("[{mark}] Show Warnings"), checkbox_style),
        Line::raw(""),
        button_row(&["Ok", "Cancel"], selected),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(dialog_block("Settings")), popup);
}

fn render_file_picker(picker: &FilePicker, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(
        area.width.saturating_sub(8).max(40),
        area.height.saturating_sub(4).max(12),
        area,
    );
    let block = dialog_block(picker.mode.title());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let [dir_area, list_area, input_area, filter_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Look in: ", style::SECTION),
            Span::raw(picker.dir.display().to_string()),
        ])),
        dir_area,
    );

    let list: Vec<Line> = if let Some(error) = &picker.error {
        vec![Line::styled(error.clone(), Style::default().fg(Color::Red))]
    } else {
        let rows = usize::from(list_area.height.max(1));
        let start = picker.selected.saturating_sub(rows - 1);
        picker
            .entries
            .iter()
            .enumerate()
            .skip(start)
            .take(rows)
            .map(|(idx, entry)| {
                let text = format!(" {}", entry.display_name());
                if idx == picker.selected {
                    Line::styled(text, style::SELECTED)
                } else {
                    Line::raw(text)
                }
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(list), list_area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("File name: ", style::SECTION),
            Span::raw(picker.input.clone()),
            Span::styled(" ", style::CURSOR),
        ])),
        input_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Files of type: ", style::SECTION),
            Span::raw(picker.filter.label()),
        ])),
        filter_area,
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            "Enter accept · Tab filter · Esc cancel",
            style::HINT,
        )),
        hint_area,
    );
}

fn render_warning(warning: &StartupWarning, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = match warning.stage {
        WarningStage::Confirm => vec![Line::raw(WARNING_QUESTION)],
        WarningStage::Beta => {
            let mut lines = vec![
                Line::styled(WARNING_HEADLINE, style::SECTION),
                Line::raw(""),
                Line::raw(WARNING_INFORMATIVE),
            ];
            if warning.details_visible {
                lines.push(Line::raw(""));
                lines.push(Line::styled(WARNING_DETAILS, style::HINT));
            }
            lines
        }
    };
    lines.push(Line::raw(""));
    lines.push(button_row(warning.buttons(), Some(warning.selected)));

    let width = area.width.saturating_sub(8).clamp(30, 76);
    let popup = centered_popup_rect(width, wrapped_height(&lines, width), area);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(dialog_block(WARNING_TITLE)),
        popup,
    );
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
