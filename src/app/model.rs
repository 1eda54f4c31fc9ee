use std::collections::VecDeque;
use std::path::PathBuf;

use tracing::{debug, info};

use super::dialogs::{Dialog, FilePicker, MessageDialog, PickerMode, SettingsDialog, StartupWarning};
use crate::config::SettingsStore;
use crate::editor::{DisplayMode, TextSurface};
use crate::ui::viewport::Viewport;

/// Status message shown when the window opens.
pub const WELCOME_MESSAGE: &str = "Welcome to Markdown Editor";

/// Which widget receives typed keys when no dialog or menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    SearchField,
    ReplaceField,
    ReplaceButton,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Editor => Self::SearchField,
            Self::SearchField => Self::ReplaceField,
            Self::ReplaceField => Self::ReplaceButton,
            Self::ReplaceButton => Self::Editor,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Editor => Self::ReplaceButton,
            Self::SearchField => Self::Editor,
            Self::ReplaceField => Self::SearchField,
            Self::ReplaceButton => Self::ReplaceField,
        }
    }

    pub const fn in_panel(self) -> bool {
        !matches!(self, Self::Editor)
    }
}

/// Open menu: which title is active and which item is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub menu: usize,
    pub item: usize,
}

/// I/O requested by `update`, run by the effects pass afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-read the file picker's current directory.
    ListDirectory,
    LoadFile(PathBuf),
    SaveFile(PathBuf),
    PersistShowWarnings(bool),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document and its display mode
    pub surface: TextSurface,
    /// Settings service
    pub settings: SettingsStore,
    /// File the document was last opened from or saved to
    pub file_path: Option<PathBuf>,
    /// Transient message on the left of the status bar
    pub status_message: String,
    pub focus: Focus,
    /// Search field of the replace panel
    pub search_input: String,
    /// Replace field of the replace panel
    pub replace_input: String,
    /// Open drop-down menu, if any
    pub menu: Option<MenuState>,
    dialog: Option<Dialog>,
    queued_dialogs: VecDeque<Dialog>,
    /// Scroll state of the raw editor
    pub editor_viewport: Viewport,
    /// Scroll state of the markdown rendering
    pub preview_viewport: Viewport,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set when the startup warning was aborted
    pub aborted: bool,
    /// File named on the command line, held until the startup warning is accepted
    startup_file: Option<PathBuf>,
    pending_effects: Vec<Effect>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("mode", &self.surface.mode())
            .field("focus", &self.focus)
            .field("dialog", &self.dialog.is_some())
            .finish_non_exhaustive()
    }
}

// Placeholder for `std::mem::take` in the event loop: no settings lookup,
// no layout, no startup warning.
impl Default for Model {
    fn default() -> Self {
        Self::bare(
            TextSurface::default(),
            SettingsStore::with_defaults(PathBuf::new()),
            (0, 0),
        )
    }
}

impl Model {
    /// Build the window state.
    ///
    /// When the store asks for warnings, the startup warning is the first
    /// dialog shown.
    pub fn new(surface: TextSurface, settings: SettingsStore, terminal_size: (u16, u16)) -> Self {
        let show_warnings = settings.show_warnings();
        let mut model = Self::bare(surface, settings, terminal_size);
        model.resize(terminal_size.0, terminal_size.1);
        if show_warnings {
            debug!("startup warning enabled");
            model.show_dialog(Dialog::Warning(StartupWarning::new()));
        }
        model
    }

    fn bare(surface: TextSurface, settings: SettingsStore, terminal_size: (u16, u16)) -> Self {
        Self {
            surface,
            settings,
            file_path: None,
            status_message: WELCOME_MESSAGE.to_string(),
            focus: Focus::Editor,
            search_input: String::new(),
            replace_input: String::new(),
            menu: None,
            dialog: None,
            queued_dialogs: VecDeque::new(),
            editor_viewport: Viewport::default(),
            preview_viewport: Viewport::default(),
            terminal_size,
            should_quit: false,
            aborted: false,
            startup_file: None,
            pending_effects: Vec::new(),
        }
    }

    /// Load `path` now, or once the startup warning is accepted.
    pub fn open_at_startup(&mut self, path: PathBuf) {
        if matches!(self.dialog, Some(Dialog::Warning(_))) {
            debug!(path = %path.display(), "load deferred until warning accepted");
            self.startup_file = Some(path);
        } else {
            self.request_effect(Effect::LoadFile(path));
        }
    }

    /// The startup warning was accepted: close it and run any deferred load.
    pub fn accept_startup(&mut self) {
        debug!("startup warning accepted");
        self.close_dialog();
        if let Some(path) = self.startup_file.take() {
            self.request_effect(Effect::LoadFile(path));
        }
    }

    /// The startup warning was declined: nothing is loaded and the app quits.
    pub fn abort_startup(&mut self) {
        info!("startup warning aborted");
        self.close_dialog();
        self.startup_file = None;
        self.aborted = true;
        self.should_quit = true;
    }

    /// Width available to rendered markdown.
    pub fn content_width(&self) -> u16 {
        crate::ui::surface_content_width(self.terminal_size.0)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub const fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dialog.as_mut()
    }

    /// Show a dialog, or queue it behind the one already open.
    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.menu = None;
        if self.dialog.is_some() {
            self.queued_dialogs.push_back(dialog);
        } else {
            self.dialog = Some(dialog);
        }
    }

    /// Close the current dialog; the next queued one, if any, takes its place.
    pub fn close_dialog(&mut self) {
        self.dialog = self.queued_dialogs.pop_front();
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.show_dialog(Dialog::Message(MessageDialog::error(text)));
    }

    pub fn request_effect(&mut self, effect: Effect) {
        self.pending_effects.push(effect);
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending_effects)
    }

    /// Apply a terminal resize to every view.
    pub fn resize(&mut self, width: u16, height: u16) {
        let width_changed = width != self.terminal_size.0;
        self.terminal_size = (width, height);
        let rows = crate::ui::surface_content_height(height);
        self.editor_viewport.resize(rows);
        self.preview_viewport.resize(rows);
        if width_changed {
            self.surface.rerender(self.content_width());
        }
        self.sync_viewports();
    }

    /// Bring viewports in line with the content and keep the cursor visible.
    pub fn sync_viewports(&mut self) {
        let buffer = self.surface.buffer();
        self.editor_viewport.set_total_lines(buffer.line_count());
        let cursor_line = buffer.cursor().line;
        self.editor_viewport.reveal(cursor_line);
        let rendered = self.surface.rendered().map_or(0, crate::document::Document::line_count);
        self.preview_viewport.set_total_lines(rendered);
    }

    /// Replace the whole document text, keeping the current mode.
    pub fn replace_document(&mut self, text: &str) {
        let width = self.content_width();
        self.surface.replace_document(text, width);
        self.editor_viewport.go_to_top();
        self.preview_viewport.go_to_top();
        self.sync_viewports();
    }

    // --- Command handlers ---

    pub fn start_open(&mut self) {
        let picker = FilePicker::new(PickerMode::Open, crate::files::home_dir());
        self.show_dialog(Dialog::FilePicker(picker));
        self.request_effect(Effect::ListDirectory);
    }

    pub fn start_save(&mut self) {
        let (dir, name) = match &self.file_path {
            Some(path) => (
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map_or_else(crate::files::home_dir, std::path::Path::to_path_buf),
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            ),
            None => (crate::files::home_dir(), String::new()),
        };
        let picker = FilePicker::new(PickerMode::Save, dir).with_input(name);
        self.show_dialog(Dialog::FilePicker(picker));
        self.request_effect(Effect::ListDirectory);
    }

    pub fn toggle_markdown(&mut self) {
        let width = self.content_width();
        self.surface.toggle_markdown(width);
        self.preview_viewport.go_to_top();
        self.sync_viewports();
        let message = match self.surface.mode() {
            DisplayMode::Markdown => "Markdown On",
            DisplayMode::Raw => "Markdown Off",
        };
        self.set_status(message);
    }

    pub fn request_quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
    }

    pub fn undo(&mut self) {
        if self.surface.undo() {
            self.sync_viewports();
        }
    }

    pub fn redo(&mut self) {
        if self.surface.redo() {
            self.sync_viewports();
        }
    }

    pub fn focus_search(&mut self) {
        self.menu = None;
        self.focus = Focus::SearchField;
    }

    pub fn open_settings(&mut self) {
        let dialog = SettingsDialog::new(self.settings.show_warnings());
        self.show_dialog(Dialog::Settings(dialog));
    }

    pub fn open_about(&mut self) {
        self.show_dialog(Dialog::Message(MessageDialog::about()));
    }

    /// Run search and replace over the whole document with the panel fields.
    pub fn run_replace(&mut self) {
        use crate::search::{Replacement, replace_all};

        match replace_all(&self.surface.text(), &self.search_input, &self.replace_input) {
            Replacement::Unchanged => {
                self.set_status("Nothing to search for");
            }
            Replacement::Replaced { text, count } => {
                if count > 0 {
                    let cursor = self.surface.buffer().cursor();
                    let width = self.content_width();
                    self.surface.replace_document(&text, width);
                    if let Some(buffer) = self.surface.buffer_mut() {
                        buffer.move_to(cursor.line, cursor.col);
                    }
                    self.sync_viewports();
                }
                let noun = if count == 1 { "occurrence" } else { "occurrences" };
                info!(count, "search and replace");
                self.set_status(format!("Replaced {count} {noun}"));
            }
        }
    }
}
