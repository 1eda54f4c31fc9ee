use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::app::dialogs::{Dialog, SettingsFocus};
use crate::app::{App, Focus, Message, Model};
use crate::commands::{MENUS, TOOLBAR, command_for_key, menu_slots, toolbar_slots};
use crate::editor::{Direction, DisplayMode};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Dialogs are modal.
        if let Some(dialog) = model.dialog() {
            return dialog_key(dialog, key);
        }

        if model.menu.is_some() {
            return match key.code {
                KeyCode::Left => Some(Message::MenuLeft),
                KeyCode::Right => Some(Message::MenuRight),
                KeyCode::Up => Some(Message::MenuUp),
                KeyCode::Down => Some(Message::MenuDown),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Message::MenuActivate),
                KeyCode::Esc | KeyCode::F(10) => Some(Message::CloseMenu),
                _ => command_for_key(key).map(Message::Command),
            };
        }

        if key.code == KeyCode::F(10) {
            return Some(Message::OpenMenuBar);
        }
        if let Some(id) = command_for_key(key) {
            return Some(Message::Command(id));
        }

        if model.focus.in_panel() {
            panel_key(model.focus, key)
        } else {
            editor_key(model, key)
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.dialog().is_some() {
            return None;
        }

        let (width, height) = model.terminal_size;
        let area = Rect::new(0, 0, width, height);
        let layout = crate::ui::window_layout(area);
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::ScrollDown => return Some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::ScrollUp => return Some(Message::ScrollUp(WHEEL_LINES)),
            MouseEventKind::Down(MouseButton::Left) => {}
            _ => return None,
        }

        if let Some(state) = model.menu {
            if let Some(popup) = crate::ui::menu_dropdown_rect(state.menu, area)
                && popup.contains(position)
            {
                let row = usize::from(mouse.row.saturating_sub(popup.y));
                let item = row.checked_sub(1)?;
                let selectable = MENUS[state.menu]
                    .items
                    .get(item)
                    .is_some_and(|entry| entry.command().is_some());
                return selectable.then_some(Message::MenuPick(state.menu, item));
            }
            if layout.menu_bar.contains(position)
                && let Some(index) = slot_at(&menu_slots(), mouse.column)
                && index != state.menu
            {
                return Some(Message::OpenMenu(index));
            }
            return Some(Message::CloseMenu);
        }

        if layout.menu_bar.contains(position) {
            return slot_at(&menu_slots(), mouse.column).map(Message::OpenMenu);
        }
        if layout.toolbar.contains(position) {
            return slot_at(&toolbar_slots(), mouse.column)
                .map(|index| Message::Command(TOOLBAR[index].1));
        }
        if layout.panel.contains(position) {
            let controls = crate::ui::panel_layout(layout.panel);
            if controls.search.contains(position) {
                return Some(Message::SetFocus(Focus::SearchField));
            }
            if controls.replace.contains(position) {
                return Some(Message::SetFocus(Focus::ReplaceField));
            }
            if controls.button.contains(position) {
                return Some(Message::RunReplace);
            }
            return None;
        }
        if layout.surface.contains(position) {
            return Some(surface_click(model, layout.surface, position));
        }
        None
    }
}

fn slot_at(slots: &[crate::commands::BarSlot], column: u16) -> Option<usize> {
    slots.iter().position(|slot| slot.contains(column))
}

/// Turn a click on the text surface into a cursor move.
fn surface_click(model: &Model, surface: Rect, position: Position) -> Message {
    if model.surface.mode() == DisplayMode::Markdown {
        return Message::SetFocus(Focus::Editor);
    }
    let inner = crate::ui::surface_inner(surface);
    if !inner.contains(position) {
        return Message::SetFocus(Focus::Editor);
    }

    let buffer = model.surface.buffer();
    let total_lines = buffer.line_count();
    let rel_row = usize::from(position.y - inner.y);
    let line = (model.editor_viewport.offset() + rel_row).min(total_lines.saturating_sub(1));

    let gutter = crate::ui::gutter_columns(total_lines);
    let text_width = inner.width.saturating_sub(gutter);
    let rel_col = usize::from(position.x.saturating_sub(inner.x + gutter));
    let column = rel_col + crate::ui::raw_horizontal_offset(model, text_width);
    let text = buffer.line_at(line).unwrap_or_default();
    Message::MoveTo(line, crate::ui::byte_at_column(&text, column))
}

const fn is_plain(key: KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

fn dialog_key(dialog: &Dialog, key: KeyEvent) -> Option<Message> {
    match dialog {
        Dialog::FilePicker(_) => match key.code {
            KeyCode::Esc => Some(Message::DialogCancel),
            KeyCode::Enter => Some(Message::DialogActivate),
            KeyCode::Up => Some(Message::PickerUp),
            KeyCode::Down => Some(Message::PickerDown),
            KeyCode::Tab => Some(Message::PickerCycleFilter),
            KeyCode::Backspace => Some(Message::PickerBackspace),
            KeyCode::Char(c) if is_plain(key) => Some(Message::PickerInput(c)),
            _ => None,
        },
        Dialog::Settings(settings) => match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => Some(Message::DialogNext),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => Some(Message::DialogPrev),
            KeyCode::Enter => Some(Message::DialogActivate),
            KeyCode::Char(' ') if settings.focus == SettingsFocus::Checkbox => {
                Some(Message::DialogToggle)
            }
            KeyCode::Char(' ') => Some(Message::DialogActivate),
            KeyCode::Esc => Some(Message::DialogCancel),
            _ => None,
        },
        Dialog::Warning(_) => match key.code {
            KeyCode::Tab | KeyCode::Right => Some(Message::DialogNext),
            KeyCode::BackTab | KeyCode::Left => Some(Message::DialogPrev),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::DialogActivate),
            KeyCode::Esc => Some(Message::DialogCancel),
            _ => None,
        },
        Dialog::Message(_) => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Message::DialogActivate),
            _ => None,
        },
    }
}

fn panel_key(focus: Focus, key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::FocusEditor),
        KeyCode::Tab | KeyCode::Down => Some(Message::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Message::FocusPrev),
        KeyCode::Enter => Some(Message::RunReplace),
        KeyCode::Char(' ') if focus == Focus::ReplaceButton => Some(Message::RunReplace),
        KeyCode::Backspace => Some(Message::FieldBackspace),
        KeyCode::Char(c) if is_plain(key) => Some(Message::FieldInput(c)),
        _ => None,
    }
}

fn editor_key(model: &Model, key: KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if model.surface.is_read_only() {
        return match key.code {
            KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PageDown),
            KeyCode::Tab => Some(Message::FocusNext),
            KeyCode::BackTab => Some(Message::FocusPrev),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) if is_plain(key) => Some(Message::InsertChar(c)),
        KeyCode::Enter => Some(Message::SplitLine),
        KeyCode::Backspace => Some(Message::DeleteBack),
        KeyCode::Delete => Some(Message::DeleteForward),
        KeyCode::Tab => Some(Message::InsertTab),
        KeyCode::BackTab => Some(Message::FocusPrev),

        KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
        KeyCode::Right if ctrl => Some(Message::MoveWordRight),
        KeyCode::Home if ctrl => Some(Message::MoveToStart),
        KeyCode::End if ctrl => Some(Message::MoveToEnd),
        KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
        KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Home => Some(Message::MoveHome),
        KeyCode::End => Some(Message::MoveEnd),
        KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::PageDown => Some(Message::PageDown),
        _ => None,
    }
}
