
use super::dialogs::{Dialog, PickerAction, PickerMode, SettingsOutcome, WarningOutcome};
use super::model::{Effect, Focus, MenuState, Model};
use crate::commands::{CommandId, CommandTable, MENUS, next_selectable};
use crate::editor::{Direction, DisplayMode, EditorBuffer};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert indentation at the cursor (Tab)
    InsertTab,
    /// Split line at cursor (Enter)
    SplitLine,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,
    /// Move cursor to absolute position (line, col), e.g. from a click
    MoveTo(usize, usize),

    // Scrolling
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,

    // Replace panel
    /// Move focus to the next widget
    FocusNext,
    /// Move focus to the previous widget
    FocusPrev,
    /// Return focus to the text surface
    FocusEditor,
    /// Focus a specific widget, e.g. from a click
    SetFocus(Focus),
    /// Type into the focused panel field
    FieldInput(char),
    /// Delete the last character of the focused panel field
    FieldBackspace,
    /// Press the "Search and Replace" button
    RunReplace,

    // Menus
    /// Activate the menu bar (F10)
    OpenMenuBar,
    /// Open a specific menu
    OpenMenu(usize),
    /// Previous menu title
    MenuLeft,
    /// Next menu title
    MenuRight,
    /// Previous item in the open menu
    MenuUp,
    /// Next item in the open menu
    MenuDown,
    /// Run the highlighted item
    MenuActivate,
    /// Run item `(menu, item)` directly
    MenuPick(usize, usize),
    /// Close the menu without running anything
    CloseMenu,

    // Dialogs
    /// Focus the next dialog control
    DialogNext,
    /// Focus the previous dialog control
    DialogPrev,
    /// Press the focused dialog control
    DialogActivate,
    /// Dismiss the dialog (Esc)
    DialogCancel,
    /// Toggle the settings checkbox
    DialogToggle,
    /// Move the file picker selection up
    PickerUp,
    /// Move the file picker selection down
    PickerDown,
    /// Type into the file picker path input
    PickerInput(char),
    /// Delete from the file picker path input
    PickerBackspace,
    /// Cycle the file picker filter
    PickerCycleFilter,

    /// Run a command
    Command(CommandId),
    /// Terminal resized
    Resize(u16, u16),
}

/// Spaces inserted for Tab.
const TAB_WIDTH: usize = 4;

/// Update the model based on a message.
///
/// I/O is never performed here: file and settings work is queued as
/// [`Effect`]s and run after the update.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::InsertChar(ch) => edit(&mut model, |b| b.insert_char(ch)),
        Message::InsertTab => edit(&mut model, |b| b.insert_str(&" ".repeat(TAB_WIDTH))),
        Message::SplitLine => edit(&mut model, EditorBuffer::split_line),
        Message::DeleteBack => edit(&mut model, |b| {
            b.delete_back();
        }),
        Message::DeleteForward => edit(&mut model, |b| {
            b.delete_forward();
        }),
        Message::MoveCursor(direction) => edit(&mut model, |b| b.move_cursor(direction)),
        Message::MoveHome => edit(&mut model, EditorBuffer::move_home),
        Message::MoveEnd => edit(&mut model, EditorBuffer::move_end),
        Message::MoveWordLeft => edit(&mut model, EditorBuffer::move_word_left),
        Message::MoveWordRight => edit(&mut model, EditorBuffer::move_word_right),
        Message::MoveToStart => edit(&mut model, EditorBuffer::move_to_start),
        Message::MoveToEnd => edit(&mut model, EditorBuffer::move_to_end),
        Message::MoveTo(line, col) => {
            model.focus = Focus::Editor;
            edit(&mut model, |b| b.move_to(line, col));
        }

        Message::ScrollUp(n) => match model.surface.mode() {
            DisplayMode::Raw => model.editor_viewport.scroll_up(n),
            DisplayMode::Markdown => model.preview_viewport.scroll_up(n),
        },
        Message::ScrollDown(n) => match model.surface.mode() {
            DisplayMode::Raw => model.editor_viewport.scroll_down(n),
            DisplayMode::Markdown => model.preview_viewport.scroll_down(n),
        },
        Message::PageUp => page(&mut model, -1),
        Message::PageDown => page(&mut model, 1),

        Message::FocusNext => model.focus = model.focus.next(),
        Message::FocusPrev => model.focus = model.focus.prev(),
        Message::FocusEditor => model.focus = Focus::Editor,
        Message::SetFocus(focus) => model.focus = focus,
        Message::FieldInput(ch) => {
            if let Some(field) = focused_field(&mut model) {
                field.push(ch);
            }
        }
        Message::FieldBackspace => {
            if let Some(field) = focused_field(&mut model) {
                field.pop();
            }
        }
        Message::RunReplace => model.run_replace(),

        Message::OpenMenuBar => open_menu(&mut model, 0),
        Message::OpenMenu(index) => open_menu(&mut model, index),
        Message::MenuLeft => {
            if let Some(state) = model.menu {
                open_menu(&mut model, (state.menu + MENUS.len() - 1) % MENUS.len());
            }
        }
        Message::MenuRight => {
            if let Some(state) = model.menu {
                open_menu(&mut model, (state.menu + 1) % MENUS.len());
            }
        }
        Message::MenuUp => move_menu_item(&mut model, -1),
        Message::MenuDown => move_menu_item(&mut model, 1),
        Message::MenuActivate => {
            if let Some(state) = model.menu {
                model = update(model, Message::MenuPick(state.menu, state.item));
            }
        }
        Message::MenuPick(menu, item) => {
            model.menu = None;
            let command = MENUS
                .get(menu)
                .and_then(|m| m.items.get(item))
                .and_then(|entry| entry.command());
            if let Some(id) = command {
                model = update(model, Message::Command(id));
            }
        }
        Message::CloseMenu => model.menu = None,

        Message::DialogNext => dialog_focus(&mut model, true),
        Message::DialogPrev => dialog_focus(&mut model, false),
        Message::DialogActivate => activate_dialog(&mut model),
        Message::DialogCancel => cancel_dialog(&mut model),
        Message::DialogToggle => {
            if let Some(Dialog::Settings(settings)) = model.dialog_mut() {
                settings.toggle();
            }
        }
        Message::PickerUp => {
            if let Some(Dialog::FilePicker(picker)) = model.dialog_mut() {
                picker.move_selection(-1);
            }
        }
        Message::PickerDown => {
            if let Some(Dialog::FilePicker(picker)) = model.dialog_mut() {
                picker.move_selection(1);
            }
        }
        Message::PickerInput(ch) => {
            if let Some(Dialog::FilePicker(picker)) = model.dialog_mut() {
                picker.push_char(ch);
            }
        }
        Message::PickerBackspace => {
            if let Some(Dialog::FilePicker(picker)) = model.dialog_mut() {
                picker.pop_char();
            }
        }
        Message::PickerCycleFilter => {
            if let Some(Dialog::FilePicker(picker)) = model.dialog_mut() {
                picker.cycle_filter();
                model.request_effect(Effect::ListDirectory);
            }
        }

        Message::Command(id) => {
            model.menu = None;
            CommandTable::global().dispatch(id, &mut model);
        }
        Message::Resize(width, height) => model.resize(width, height),
    }
    model
}

/// Apply a buffer operation unless the surface is read-only.
fn edit(model: &mut Model, op: impl FnOnce(&mut EditorBuffer)) {
    let Some(buffer) = model.surface.buffer_mut() else {
        return;
    };
    op(buffer);
    model.sync_viewports();
}

fn page(model: &mut Model, direction: isize) {
    match model.surface.mode() {
        DisplayMode::Raw => {
            let rows = model.editor_viewport.height().max(1) as usize;
            edit(model, |b| {
                let cursor = b.cursor();
                let line = if direction < 0 {
                    cursor.line.saturating_sub(rows)
                } else {
                    cursor.line + rows
                };
                b.move_to(line, cursor.col);
            });
        }
        DisplayMode::Markdown => {
            if direction < 0 {
                model.preview_viewport.page_up();
            } else {
                model.preview_viewport.page_down();
            }
        }
    }
}

fn focused_field(model: &mut Model) -> Option<&mut String> {
    match model.focus {
        Focus::SearchField => Some(&mut model.search_input),
        Focus::ReplaceField => Some(&mut model.replace_input),
        Focus::Editor | Focus::ReplaceButton => None,
    }
}

fn open_menu(model: &mut Model, index: usize) {
    let Some(menu) = MENUS.get(index) else {
        return;
    };
    model.menu = Some(MenuState {
        menu: index,
        item: next_selectable(menu, 0, 1),
    });
}

fn move_menu_item(model: &mut Model, step: isize) {
    let Some(state) = model.menu else {
        return;
    };
    let menu = &MENUS[state.menu];
    let len = menu.items.len();
    let start = state.item.checked_add_signed(step).map_or(len - 1, |i| i % len);
    model.menu = Some(MenuState {
        menu: state.menu,
        item: next_selectable(menu, start, step),
    });
}

fn dialog_focus(model: &mut Model, forward: bool) {
    match model.dialog_mut() {
        Some(Dialog::Settings(settings)) => {
            if forward {
                settings.focus_next();
            } else {
                settings.focus_prev();
            }
        }
        Some(Dialog::Warning(warning)) => {
            if forward {
                warning.select_next();
            } else {
                warning.select_prev();
            }
        }
        Some(Dialog::FilePicker(_) | Dialog::Message(_)) | None => {}
    }
}

fn activate_dialog(model: &mut Model) {
    let Some(dialog) = model.dialog_mut() else {
        return;
    };
    match dialog {
        Dialog::Message(_) => model.close_dialog(),
        Dialog::Settings(settings) => match settings.activate() {
            SettingsOutcome::Toggled => {}
            SettingsOutcome::Accept(show_warnings) => {
                model.close_dialog();
                model.request_effect(Effect::PersistShowWarnings(show_warnings));
            }
            SettingsOutcome::Cancel => model.close_dialog(),
        },
        Dialog::Warning(warning) => match warning.activate() {
            WarningOutcome::NextStage | WarningOutcome::ToggleDetails => {}
            WarningOutcome::Proceed => model.accept_startup(),
            WarningOutcome::Abort => model.abort_startup(),
        },
        Dialog::FilePicker(picker) => match picker.activate() {
            PickerAction::Descend(dir) => {
                picker.descend(dir);
                model.request_effect(Effect::ListDirectory);
            }
            PickerAction::Accept(path) => {
                let mode = picker.mode;
                model.close_dialog();
                let effect = match mode {
                    PickerMode::Open => Effect::LoadFile(path),
                    PickerMode::Save => Effect::SaveFile(path),
                };
                model.request_effect(effect);
            }
            PickerAction::Nothing => {}
        },
    }
}

fn cancel_dialog(model: &mut Model) {
    match model.dialog() {
        // Closing the warning box counts as Abort.
        Some(Dialog::Warning(_)) => model.abort_startup(),
        Some(_) => model.close_dialog(),
        None => {}
    }
}
