//! End-to-end tests through the public API: settings persistence, file
//! I/O and the open/save flow driven by messages and effects.

use std::fs;
use std::path::PathBuf;

use mdpad::app::dialogs::Dialog;
use mdpad::app::{Effect, Message, Model, run_pending, update};
use mdpad::commands::CommandId;
use mdpad::config::{SettingsStore, clear_settings};
use mdpad::editor::{DisplayMode, TextSurface};
use mdpad::files::{DirEntry, FileError, FileFilter, list_directory, read_document, write_document};
use tempfile::tempdir;

fn model_with_store(store: SettingsStore) -> Model {
    Model::new(TextSurface::default(), store, (80, 24))
}

fn apply(model: Model, msg: Message) -> Model {
    let mut model = update(model, msg);
    run_pending(&mut model);
    model
}

#[test]
fn test_settings_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut store = SettingsStore::open(&path).unwrap();
    assert!(!store.show_warnings());
    store.set_show_warnings(true).unwrap();

    let reopened = SettingsStore::open(&path).unwrap();
    assert!(reopened.show_warnings());

    clear_settings(&path).unwrap();
    assert!(!path.exists());
    assert!(!SettingsStore::open(&path).unwrap().show_warnings());
}

#[test]
fn test_corrupt_settings_still_starts_window() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    let store = SettingsStore::open(&path).unwrap();
    assert!(!store.show_warnings());

    let model = model_with_store(store);
    assert!(model.dialog().is_none());
    assert_eq!(model.status_message, "Welcome to Markdown Editor");
}

#[test]
fn test_document_write_then_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    write_document(&path, "line one\nline two\n").unwrap();
    assert_eq!(read_document(&path).unwrap(), "line one\nline two\n");
}

#[test]
fn test_file_errors_name_the_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    match read_document(&missing) {
        Err(FileError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {other:?}"),
    }

    match write_document(dir.path(), "x") {
        Err(err @ FileError::IsDirectory(_)) => assert_eq!(err.path(), dir.path()),
        other => panic!("expected IsDirectory, got {other:?}"),
    }

    let binary = dir.path().join("blob.bin");
    fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
    assert!(matches!(
        read_document(&binary),
        Err(FileError::InvalidUtf8(_))
    ));
}

#[test]
fn test_directory_listing_filters_and_orders() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    fs::write(dir.path().join("A.txt"), "").unwrap();
    fs::write(dir.path().join("script.py"), "").unwrap();
    fs::write(dir.path().join(".hidden.txt"), "").unwrap();

    let entries = list_directory(dir.path(), FileFilter::Text).unwrap();
    let names: Vec<String> = entries.iter().map(DirEntry::display_name).collect();
    assert_eq!(names, ["..", "sub/", "A.txt", "b.txt"]);

    let all = list_directory(dir.path(), FileFilter::All).unwrap();
    assert_eq!(all.len(), 5);
}

#[test]
fn test_load_edit_save_flow() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "hello world").unwrap();

    let mut model = model_with_store(SettingsStore::with_defaults(dir.path().join("s.json")));
    model.request_effect(Effect::LoadFile(path.clone()));
    run_pending(&mut model);
    assert_eq!(model.surface.text(), "hello world");
    assert_eq!(model.file_path.as_deref(), Some(path.as_path()));

    model = apply(model, Message::MoveToEnd);
    model = apply(model, Message::InsertChar('!'));
    assert!(model.surface.buffer().is_dirty());

    model.request_effect(Effect::SaveFile(path.clone()));
    run_pending(&mut model);
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world!");
    assert!(!model.surface.buffer().is_dirty());
    assert!(model.status_message.starts_with("Saved"));
}

#[test]
fn test_open_picker_accepts_typed_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("picked.txt");
    fs::write(&path, "picked text").unwrap();

    let mut model = model_with_store(SettingsStore::with_defaults(dir.path().join("s.json")));
    model = apply(model, Message::Command(CommandId::Open));
    if let Some(Dialog::FilePicker(picker)) = model.dialog_mut() {
        picker.dir = dir.path().to_path_buf();
    }
    model.request_effect(Effect::ListDirectory);
    run_pending(&mut model);

    for ch in "picked.txt".chars() {
        model = apply(model, Message::PickerInput(ch));
    }
    model = apply(model, Message::DialogActivate);

    assert!(model.dialog().is_none());
    assert_eq!(model.surface.text(), "picked text");
    assert_eq!(model.file_path, Some(path));
}

#[test]
fn test_missing_file_shows_error_dialog() {
    let dir = tempdir().unwrap();
    let mut model = model_with_store(SettingsStore::with_defaults(dir.path().join("s.json")));
    model.request_effect(Effect::LoadFile(PathBuf::from("/definitely/not/here.txt")));
    run_pending(&mut model);
    assert!(matches!(model.dialog(), Some(Dialog::Message(_))));
    assert_eq!(model.surface.text(), "");
}

#[test]
fn test_replace_in_markdown_mode_updates_rendering() {
    let dir = tempdir().unwrap();
    let mut model = model_with_store(SettingsStore::with_defaults(dir.path().join("s.json")));
    model.replace_document("# Old title\n\nold body");
    model = apply(model, Message::Command(CommandId::ToggleMarkdown));
    assert_eq!(model.surface.mode(), DisplayMode::Markdown);

    model.search_input = "old".to_string();
    model.replace_input = "new".to_string();
    model = apply(model, Message::RunReplace);

    assert_eq!(model.surface.text(), "# Old title\n\nnew body");
    assert_eq!(model.status_message, "Replaced 1 occurrence");
    let rendered = model.surface.rendered().unwrap().rendered_text();
    assert!(rendered.contains("new body"));
}

#[test]
fn test_settings_dialog_persists_choice() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut model = model_with_store(SettingsStore::open(&path).unwrap());

    model = apply(model, Message::Command(CommandId::Settings));
    model = apply(model, Message::DialogToggle);
    model = apply(model, Message::DialogNext);
    model = apply(model, Message::DialogActivate);

    assert!(model.dialog().is_none());
    assert!(SettingsStore::open(&path).unwrap().show_warnings());
}
