//! Modal dialog state.
//!
//! Each dialog owns only its own input state; outcomes are returned to
//! `update`, which applies them to the model.

use std::path::{Path, PathBuf};

use crate::files::{DirEntry, FileFilter};

/// Title used by the startup warnings.
pub const WARNING_TITLE: &str = "My Text Editor";
pub const WARNING_QUESTION: &str = "This is beta software, do you want to continue?";
pub const WARNING_HEADLINE: &str = "BETA SOFTWARE WARNING!";
pub const WARNING_INFORMATIVE: &str =
    "This is very, very beta, are you really sure you want to use it?";
pub const WARNING_DETAILS: &str =
    "This editor was written for pedagogical purposes, and probably is not fit for real work.";

pub const ABOUT_TITLE: &str = "About mdpad";
pub const ABOUT_TEXT: &str = "This is a terminal text editor.\nUse to edit Markdown text files.";

/// The dialog currently holding input focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Message(MessageDialog),
    Settings(SettingsDialog),
    FilePicker(FilePicker),
    Warning(StartupWarning),
}

/// A title, some text, and a single `Ok` button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDialog {
    pub kind: MessageKind,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    About,
}

impl MessageDialog {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            title: "Error".to_string(),
            text: text.into(),
        }
    }

    pub fn about() -> Self {
        Self {
            kind: MessageKind::About,
            title: ABOUT_TITLE.to_string(),
            text: ABOUT_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFocus {
    Checkbox,
    Ok,
    Cancel,
}

/// Edit copy of the settings; nothing is stored until `Ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialog {
    pub show_warnings: bool,
    pub focus: SettingsFocus,
}

/// What activating the focused settings control means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
    Toggled,
    Accept(bool),
    Cancel,
}

impl SettingsDialog {
    pub const fn new(show_warnings: bool) -> Self {
        Self {
            show_warnings,
            focus: SettingsFocus::Checkbox,
        }
    }

    pub const fn focus_next(&mut self) {
        self.focus = match self.focus {
            SettingsFocus::Checkbox => SettingsFocus::Ok,
            SettingsFocus::Ok => SettingsFocus::Cancel,
            SettingsFocus::Cancel => SettingsFocus::Checkbox,
        };
    }

    pub const fn focus_prev(&mut self) {
        self.focus = match self.focus {
            SettingsFocus::Checkbox => SettingsFocus::Cancel,
            SettingsFocus::Ok => SettingsFocus::Checkbox,
            SettingsFocus::Cancel => SettingsFocus::Ok,
        };
    }

    pub const fn toggle(&mut self) {
        self.show_warnings = !self.show_warnings;
    }

    pub const fn activate(&mut self) -> SettingsOutcome {
        match self.focus {
            SettingsFocus::Checkbox => {
                self.toggle();
                SettingsOutcome::Toggled
            }
            SettingsFocus::Ok => SettingsOutcome::Accept(self.show_warnings),
            SettingsFocus::Cancel => SettingsOutcome::Cancel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

impl PickerMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Select a text file to open…",
            Self::Save => "Select the file to save to…",
        }
    }
}

/// What `Enter` in the file picker resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Descend(PathBuf),
    Accept(PathBuf),
    Nothing,
}

/// Directory browser with a path input and an extension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePicker {
    pub mode: PickerMode,
    pub dir: PathBuf,
    pub input: String,
    pub filter: FileFilter,
    pub entries: Vec<DirEntry>,
    pub selected: usize,
    pub error: Option<String>,
}

impl FilePicker {
    pub const fn new(mode: PickerMode, dir: PathBuf) -> Self {
        let filter = match mode {
            PickerMode::Open => FileFilter::Python,
            PickerMode::Save => FileFilter::Text,
        };
        Self {
            mode,
            dir,
            input: String::new(),
            filter,
            entries: Vec::new(),
            selected: 0,
            error: None,
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    /// Replace the listing after the directory was read.
    pub fn set_entries(&mut self, entries: Vec<DirEntry>) {
        self.entries = entries;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        self.error = None;
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        if let Some(DirEntry::File(path)) = self.entries.get(self.selected) {
            self.input = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
        } else if self.mode == PickerMode::Open {
            self.input.clear();
        }
    }

    pub const fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Resolve `Enter`: typed input wins over the highlighted entry.
    pub fn activate(&self) -> PickerAction {
        let typed = self.input.trim();
        if !typed.is_empty() {
            let path = resolve(&self.dir, typed);
            if typed.ends_with('/') || typed == ".." {
                return PickerAction::Descend(path);
            }
            return PickerAction::Accept(path);
        }
        match self.selected_entry() {
            Some(DirEntry::Parent(path) | DirEntry::Directory(path)) => {
                PickerAction::Descend(path.clone())
            }
            Some(DirEntry::File(path)) => PickerAction::Accept(path.clone()),
            None => PickerAction::Nothing,
        }
    }

    /// Switch to `dir`; the caller re-lists it.
    pub fn descend(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.entries.clear();
        self.selected = 0;
        if self.mode == PickerMode::Open {
            self.input.clear();
        }
    }
}

fn resolve(dir: &Path, typed: &str) -> PathBuf {
    if typed == ".." {
        return dir.parent().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
    }
    let path = Path::new(typed);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningStage {
    /// "Do you want to continue?" with Yes / Abort.
    Confirm,
    /// The detailed beta warning with Yes / Abort / Show Details.
    Beta,
}

/// What the chosen warning button means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningOutcome {
    NextStage,
    Proceed,
    Abort,
    ToggleDetails,
}

/// The two-stage startup warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupWarning {
    pub stage: WarningStage,
    pub selected: usize,
    pub details_visible: bool,
}

impl StartupWarning {
    pub const fn new() -> Self {
        Self {
            stage: WarningStage::Confirm,
            selected: 0,
            details_visible: false,
        }
    }

    pub const fn buttons(&self) -> &'static [&'static str] {
        match (self.stage, self.details_visible) {
            (WarningStage::Confirm, _) => &["Yes", "Abort"],
            (WarningStage::Beta, false) => &["Yes", "Abort", "Show Details"],
            (WarningStage::Beta, true) => &["Yes", "Abort", "Hide Details"],
        }
    }

    pub const fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.buttons().len();
    }

    pub const fn select_prev(&mut self) {
        let len = self.buttons().len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Press the selected button.
    pub const fn activate(&mut self) -> WarningOutcome {
        match (self.stage, self.selected) {
            (WarningStage::Confirm, 0) => {
                self.stage = WarningStage::Beta;
                self.selected = 0;
                WarningOutcome::NextStage
            }
            (WarningStage::Beta, 0) => WarningOutcome::Proceed,
            (WarningStage::Beta, 2) => {
                self.details_visible = !self.details_visible;
                WarningOutcome::ToggleDetails
            }
            _ => WarningOutcome::Abort,
        }
    }
}

impl Default for StartupWarning {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker_with_entries() -> FilePicker {
        let mut picker = FilePicker::new(PickerMode::Open, PathBuf::from("/home/u"));
        picker.set_entries(vec![
            DirEntry::Parent(PathBuf::from("/home")),
            DirEntry::Directory(PathBuf::from("/home/u/docs")),
            DirEntry::File(PathBuf::from("/home/u/a.py")),
        ]);
        picker
    }

    #[test]
    fn test_open_picker_defaults_to_python_filter() {
        let picker = FilePicker::new(PickerMode::Open, PathBuf::from("/"));
        assert_eq!(picker.filter, FileFilter::Python);
        let picker = FilePicker::new(PickerMode::Save, PathBuf::from("/"));
        assert_eq!(picker.filter, FileFilter::Text);
    }

    #[test]
    fn test_enter_on_parent_descends() {
        let picker = picker_with_entries();
        assert_eq!(
            picker.activate(),
            PickerAction::Descend(PathBuf::from("/home"))
        );
    }

    #[test]
    fn test_selecting_file_fills_input_and_accepts() {
        let mut picker = picker_with_entries();
        picker.move_selection(2);
        assert_eq!(picker.input, "a.py");
        assert_eq!(
            picker.activate(),
            PickerAction::Accept(PathBuf::from("/home/u/a.py"))
        );
    }

    #[test]
    fn test_selection_clamps() {
        let mut picker = picker_with_entries();
        picker.move_selection(10);
        assert_eq!(picker.selected, 2);
        picker.move_selection(-10);
        assert_eq!(picker.selected, 0);
    }

    #[test]
    fn test_typed_absolute_path_is_accepted() {
        let picker = picker_with_entries().with_input("/tmp/x.txt");
        assert_eq!(
            picker.activate(),
            PickerAction::Accept(PathBuf::from("/tmp/x.txt"))
        );
    }

    #[test]
    fn test_typed_directory_descends() {
        let picker = picker_with_entries().with_input("docs/");
        assert!(matches!(picker.activate(), PickerAction::Descend(_)));
    }

    #[test]
    fn test_empty_listing_does_nothing() {
        let picker = FilePicker::new(PickerMode::Open, PathBuf::from("/"));
        assert_eq!(picker.activate(), PickerAction::Nothing);
    }

    #[test]
    fn test_settings_dialog_flow() {
        let mut dialog = SettingsDialog::new(false);
        assert_eq!(dialog.activate(), SettingsOutcome::Toggled);
        assert!(dialog.show_warnings);
        dialog.focus_next();
        assert_eq!(dialog.activate(), SettingsOutcome::Accept(true));
        dialog.focus_next();
        assert_eq!(dialog.activate(), SettingsOutcome::Cancel);
    }

    #[test]
    fn test_warning_yes_advances_to_beta_stage() {
        let mut warning = StartupWarning::new();
        assert_eq!(warning.activate(), WarningOutcome::NextStage);
        assert_eq!(warning.stage, WarningStage::Beta);
        assert_eq!(warning.buttons().len(), 3);
        assert_eq!(warning.activate(), WarningOutcome::Proceed);
    }

    #[test]
    fn test_warning_abort_at_first_stage() {
        let mut warning = StartupWarning::new();
        warning.select_next();
        assert_eq!(warning.activate(), WarningOutcome::Abort);
    }

    #[test]
    fn test_warning_details_toggle() {
        let mut warning = StartupWarning {
            stage: WarningStage::Beta,
            selected: 0,
            details_visible: false,
        };
        warning.select_prev();
        assert_eq!(warning.selected, 2);
        assert_eq!(warning.activate(), WarningOutcome::ToggleDetails);
        assert!(warning.details_visible);
        assert_eq!(warning.buttons()[2], "Hide Details");
    }
}
