//! Command identifiers and the surfaces that trigger them.
//!
//! Menus, toolbar buttons, and key bindings all resolve to a [`CommandId`];
//! the [`CommandTable`] maps each id to the handler that mutates the model.

use std::collections::HashMap;
use std::sync::LazyLock;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::Model;

/// Every action reachable from a menu, the toolbar, or a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Open,
    Save,
    ToggleMarkdown,
    Quit,
    Undo,
    Redo,
    SearchReplace,
    Settings,
    About,
}

impl CommandId {
    pub const ALL: [Self; 9] = [
        Self::Open,
        Self::Save,
        Self::ToggleMarkdown,
        Self::Quit,
        Self::Undo,
        Self::Redo,
        Self::SearchReplace,
        Self::Settings,
        Self::About,
    ];

    /// Shortcut hint shown next to menu items.
    pub const fn shortcut(self) -> Option<&'static str> {
        match self {
            Self::Open => Some("Ctrl+O"),
            Self::Save => Some("Ctrl+S"),
            Self::ToggleMarkdown => Some("Ctrl+P"),
            Self::Quit => Some("Ctrl+Q"),
            Self::Undo => Some("Ctrl+Z"),
            Self::Redo => Some("Ctrl+Y"),
            Self::SearchReplace => Some("Ctrl+R"),
            Self::Settings => Some("F2"),
            Self::About => Some("F1"),
        }
    }
}

/// Resolve a global key binding.
pub fn command_for_key(key: KeyEvent) -> Option<CommandId> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('o') => Some(CommandId::Open),
            KeyCode::Char('s') => Some(CommandId::Save),
            KeyCode::Char('p') => Some(CommandId::ToggleMarkdown),
            KeyCode::Char('q') => Some(CommandId::Quit),
            KeyCode::Char('z') => Some(CommandId::Undo),
            KeyCode::Char('y') => Some(CommandId::Redo),
            KeyCode::Char('r') => Some(CommandId::SearchReplace),
            _ => None,
        };
    }
    match key.code {
        KeyCode::F(1) => Some(CommandId::About),
        KeyCode::F(2) => Some(CommandId::Settings),
        _ => None,
    }
}

/// An entry in a drop-down menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Action(&'static str, CommandId),
    Separator,
}

impl MenuItem {
    pub const fn command(self) -> Option<CommandId> {
        match self {
            Self::Action(_, id) => Some(id),
            Self::Separator => None,
        }
    }
}

/// A top-level menu.
#[derive(Debug, Clone, Copy)]
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

pub const MENUS: [Menu; 3] = [
    Menu {
        title: "File",
        items: &[
            MenuItem::Action("Open", CommandId::Open),
            MenuItem::Action("Save", CommandId::Save),
            MenuItem::Action("Markdown", CommandId::ToggleMarkdown),
            MenuItem::Separator,
            MenuItem::Action("Quit", CommandId::Quit),
        ],
    },
    Menu {
        title: "Edit",
        items: &[
            MenuItem::Action("Undo", CommandId::Undo),
            MenuItem::Action("Redo", CommandId::Redo),
            MenuItem::Action("Settings…", CommandId::Settings),
        ],
    },
    Menu {
        title: "Help",
        items: &[MenuItem::Action("About", CommandId::About)],
    },
];

pub const TOOLBAR: [(&str, CommandId); 3] = [
    ("Open", CommandId::Open),
    ("Save", CommandId::Save),
    ("Toggle Markdown", CommandId::ToggleMarkdown),
];

/// Horizontal span of a clickable label on a one-row bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSlot {
    pub x: u16,
    pub width: u16,
}

impl BarSlot {
    pub const fn contains(self, column: u16) -> bool {
        column >= self.x && column < self.x + self.width
    }
}

fn bar_slots<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<BarSlot> {
    let mut x = 1_u16;
    labels
        .map(|label| {
            #[allow(clippy::cast_possible_truncation)]
            let width = label.chars().count() as u16 + 2;
            let slot = BarSlot { x, width };
            x += width + 1;
            slot
        })
        .collect()
}

/// Positions of the menu titles on the menu bar, in [`MENUS`] order.
pub fn menu_slots() -> Vec<BarSlot> {
    bar_slots(MENUS.iter().map(|menu| menu.title))
}

/// Positions of the toolbar buttons, in [`TOOLBAR`] order.
pub fn toolbar_slots() -> Vec<BarSlot> {
    bar_slots(TOOLBAR.iter().map(|(label, _)| *label))
}

/// Index of the first selectable item at or after `from`, moving by `step`.
pub fn next_selectable(menu: &Menu, from: usize, step: isize) -> usize {
    let len = menu.items.len();
    if len == 0 {
        return 0;
    }
    let mut idx = from % len;
    for _ in 0..len {
        if menu.items[idx].command().is_some() {
            return idx;
        }
        idx = idx.checked_add_signed(step).map_or(len - 1, |i| i % len);
    }
    from % len
}

type Handler = fn(&mut Model);

/// Map from command id to handler, built once per process.
pub struct CommandTable {
    handlers: HashMap<CommandId, Handler>,
}

static TABLE: LazyLock<CommandTable> = LazyLock::new(CommandTable::new);

impl CommandTable {
    pub fn new() -> Self {
        let mut handlers: HashMap<CommandId, Handler> = HashMap::new();
        handlers.insert(CommandId::Open, Model::start_open);
        handlers.insert(CommandId::Save, Model::start_save);
        handlers.insert(CommandId::ToggleMarkdown, Model::toggle_markdown);
        handlers.insert(CommandId::Quit, Model::request_quit);
        handlers.insert(CommandId::Undo, Model::undo);
        handlers.insert(CommandId::Redo, Model::redo);
        handlers.insert(CommandId::SearchReplace, Model::focus_search);
        handlers.insert(CommandId::Settings, Model::open_settings);
        handlers.insert(CommandId::About, Model::open_about);
        Self { handlers }
    }

    /// The shared table.
    pub fn global() -> &'static Self {
        &TABLE
    }

    /// Run the handler for `id`. Returns `false` if none is registered.
    pub fn dispatch(&self, id: CommandId, model: &mut Model) -> bool {
        let Some(handler) = self.handlers.get(&id) else {
            return false;
        };
        debug!(command = ?id, "dispatching command");
        handler(model);
        true
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_every_command_has_a_handler() {
        let table = CommandTable::new();
        for id in CommandId::ALL {
            assert!(table.handlers.contains_key(&id), "missing handler for {id:?}");
        }
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(ctrl('o')), Some(CommandId::Open));
        assert_eq!(command_for_key(ctrl('s')), Some(CommandId::Save));
        assert_eq!(command_for_key(ctrl('p')), Some(CommandId::ToggleMarkdown));
        assert_eq!(command_for_key(ctrl('q')), Some(CommandId::Quit));
        assert_eq!(command_for_key(ctrl('z')), Some(CommandId::Undo));
        assert_eq!(command_for_key(ctrl('y')), Some(CommandId::Redo));
        assert_eq!(command_for_key(ctrl('r')), Some(CommandId::SearchReplace));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE)),
            Some(CommandId::Settings)
        );
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_menu_layout_matches_window() {
        let titles: Vec<&str> = MENUS.iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["File", "Edit", "Help"]);
        assert_eq!(MENUS[0].items[3], MenuItem::Separator);
        assert_eq!(MENUS[0].items[4].command(), Some(CommandId::Quit));
        assert_eq!(MENUS[1].items[2].command(), Some(CommandId::Settings));
    }

    #[test]
    fn test_toolbar_slots_do_not_overlap() {
        let slots = toolbar_slots();
        assert_eq!(slots.len(), TOOLBAR.len());
        for pair in slots.windows(2) {
            assert!(pair[0].x + pair[0].width < pair[1].x);
        }
        assert!(slots[0].contains(1));
        assert!(!slots[0].contains(0));
    }

    #[test]
    fn test_next_selectable_skips_separator() {
        let file = &MENUS[0];
        assert_eq!(next_selectable(file, 3, 1), 4);
        assert_eq!(next_selectable(file, 3, -1), 2);
    }
}
