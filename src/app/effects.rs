use tracing::warn;

use super::dialogs::Dialog;
use super::model::{Effect, Model};
use crate::files::{list_directory, read_document, write_document};

/// Run every effect queued by `update`, including any queued while running.
pub fn run_pending(model: &mut Model) {
    loop {
        let effects = model.take_effects();
        if effects.is_empty() {
            break;
        }
        for effect in effects {
            run(model, effect);
        }
    }
}

fn run(model: &mut Model, effect: Effect) {
    match effect {
        Effect::ListDirectory => {
            let Some(Dialog::FilePicker(picker)) = model.dialog_mut() else {
                return;
            };
            match list_directory(&picker.dir, picker.filter) {
                Ok(entries) => picker.set_entries(entries),
                Err(err) => {
                    warn!("directory listing failed: {err}");
                    picker.entries.clear();
                    picker.error = Some(err.to_string());
                }
            }
        }
        Effect::LoadFile(path) => match read_document(&path) {
            Ok(text) => {
                model.replace_document(&text);
                model.surface.mark_clean();
                model.set_status(format!("Opened {}", path.display()));
                model.file_path = Some(path);
            }
            Err(err) => {
                warn!("open failed: {err}");
                model.show_error(format!("Could not load file: {err}"));
            }
        },
        Effect::SaveFile(path) => match write_document(&path, &model.surface.text()) {
            Ok(()) => {
                model.surface.mark_clean();
                model.set_status(format!("Saved {}", path.display()));
                model.file_path = Some(path);
            }
            Err(err) => {
                warn!("save failed: {err}");
                model.show_error(format!("Could not save file: {err}"));
            }
        },
        Effect::PersistShowWarnings(value) => match model.settings.set_show_warnings(value) {
            Ok(()) => model.set_status("Settings saved"),
            Err(err) => {
                warn!("settings not saved: {err:#}");
                model.set_status(format!("Could not save settings: {err:#}"));
            }
        },
    }
}
