use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::style;
use crate::app::Model;

/// Permanent right-hand status text.
pub fn char_count_label(model: &Model) -> String {
    format!("chars: {}", model.surface.char_count())
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let counter = format!("{} ", char_count_label(model));
    #[allow(clippy::cast_possible_truncation)]
    let counter_width = (counter.chars().count() as u16).min(area.width);
    let [message_area, counter_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(counter_width)]).areas(area);

    let message = Paragraph::new(format!(" {}", model.status_message)).style(style::BAR);
    frame.render_widget(message, message_area);

    let counter = Paragraph::new(counter)
        .alignment(Alignment::Right)
        .style(style::BAR);
    frame.render_widget(counter, counter_area);
}
