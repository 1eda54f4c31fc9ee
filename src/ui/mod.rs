//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//!
//! Geometry helpers live here so input routing and rendering agree on where
//! every widget is.

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::UnicodeWidthChar;

use crate::commands::{MENUS, menu_slots};

pub use overlays::centered_popup_rect;
pub use render::{line_number_width, render};
pub(crate) use render::{gutter_columns, raw_horizontal_offset};

/// Width of the replace panel docked on the left.
pub const PANEL_WIDTH: u16 = 28;
/// Menu bar, toolbar, and status bar.
pub const BAR_ROWS: u16 = 3;

/// Screen regions of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub menu_bar: Rect,
    pub toolbar: Rect,
    pub panel: Rect,
    pub surface: Rect,
    pub status: Rect,
}

/// Controls inside the replace panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub search: Rect,
    pub replace: Rect,
    pub button: Rect,
}

const fn panel_width(total_width: u16) -> u16 {
    let half = total_width / 2;
    if PANEL_WIDTH < half { PANEL_WIDTH } else { half }
}

/// Split the terminal into bars, panel, and text surface.
pub fn window_layout(area: Rect) -> WindowLayout {
    let [menu_bar, toolbar, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    let [panel, surface] = Layout::horizontal([
        Constraint::Length(panel_width(body.width)),
        Constraint::Min(0),
    ])
    .areas(body);
    WindowLayout {
        menu_bar,
        toolbar,
        panel,
        surface,
        status,
    }
}

/// Split the bordered replace panel into its two fields and the button.
pub fn panel_layout(panel: Rect) -> PanelLayout {
    let inner = Rect {
        x: panel.x.saturating_add(1),
        y: panel.y.saturating_add(1),
        width: panel.width.saturating_sub(2),
        height: panel.height.saturating_sub(2),
    };
    let [search, replace, button, _] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);
    PanelLayout {
        search,
        replace,
        button,
    }
}

/// Inner area of the bordered text surface.
pub const fn surface_inner(surface: Rect) -> Rect {
    Rect {
        x: surface.x.saturating_add(1),
        y: surface.y.saturating_add(1),
        width: surface.width.saturating_sub(2),
        height: surface.height.saturating_sub(2),
    }
}

/// Width available to rendered markdown for a terminal `total_width` wide.
pub const fn surface_content_width(total_width: u16) -> u16 {
    let width = total_width
        .saturating_sub(panel_width(total_width))
        .saturating_sub(2);
    if width == 0 { 1 } else { width }
}

/// Rows of text visible in the surface for a terminal `height` rows tall.
pub const fn surface_content_height(height: u16) -> u16 {
    height.saturating_sub(BAR_ROWS).saturating_sub(2)
}

/// Where the drop-down of menu `index` is drawn.
pub fn menu_dropdown_rect(index: usize, area: Rect) -> Option<Rect> {
    let menu = MENUS.get(index)?;
    let slot = *menu_slots().get(index)?;
    let inner = menu
        .items
        .iter()
        .map(|item| match item {
            crate::commands::MenuItem::Action(label, id) => {
                label.chars().count() + id.shortcut().map_or(0, |s| s.len() + 3)
            }
            crate::commands::MenuItem::Separator => 0,
        })
        .max()
        .unwrap_or(0);
    let width = u16::try_from(inner + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(menu.items.len() + 2).unwrap_or(u16::MAX);
    let x = area.x + slot.x;
    let y = area.y + 1;
    Some(Rect {
        x,
        y,
        width: width.min(area.right().saturating_sub(x)),
        height: height.min(area.bottom().saturating_sub(y)),
    })
}

/// Display column of byte offset `byte` in `line`.
pub fn display_column(line: &str, byte: usize) -> usize {
    line.char_indices()
        .take_while(|(idx, _)| *idx < byte)
        .map(|(_, ch)| ch.width().unwrap_or(0))
        .sum()
}

/// Byte offset of the character drawn at display `column` of `line`.
///
/// Columns past the end of the line map to the end of the line.
pub fn byte_at_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.char_indices() {
        let next = width + ch.width().unwrap_or(0);
        if next > column {
            return idx;
        }
        width = next;
    }
    line.len()
}

/// Columns scrolled off the left edge so that `cursor_column` stays inside
/// a text area `text_width` wide.
pub fn horizontal_offset(cursor_column: usize, text_width: u16) -> usize {
    let width = usize::from(text_width.max(1));
    cursor_column.saturating_sub(width - 1)
}

#[cfg(test)]
mod tests;
