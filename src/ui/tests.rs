use super::*;
use crate::app::{Focus, Message, Model, update};
use crate::commands::CommandId;
use crate::config::SettingsStore;
use crate::editor::TextSurface;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model(text: &str) -> Model {
    Model::new(
        TextSurface::from_text(text),
        SettingsStore::with_defaults(PathBuf::from("unused-settings.json")),
        (80, 24),
    )
}

fn row_text(buffer: &Buffer, row: u16) -> String {
    row_text_from(buffer, row, 0)
}

fn row_text_from(buffer: &Buffer, row: u16, start: u16) -> String {
    (start..buffer.area.width)
        .map(|x| buffer[(x, row)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(model: &Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

#[test]
fn test_layout_rows() {
    let layout = window_layout(Rect::new(0, 0, 80, 24));
    assert_eq!(layout.menu_bar, Rect::new(0, 0, 80, 1));
    assert_eq!(layout.toolbar, Rect::new(0, 1, 80, 1));
    assert_eq!(layout.panel, Rect::new(0, 2, PANEL_WIDTH, 21));
    assert_eq!(layout.surface, Rect::new(PANEL_WIDTH, 2, 80 - PANEL_WIDTH, 21));
    assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
}

#[test]
fn test_panel_shrinks_on_narrow_terminal() {
    let layout = window_layout(Rect::new(0, 0, 40, 10));
    assert_eq!(layout.panel.width, 20);
    assert_eq!(layout.surface.width, 20);
}

#[test]
fn test_content_size_matches_layout() {
    for width in [20_u16, 40, 80, 200] {
        let layout = window_layout(Rect::new(0, 0, width, 30));
        assert_eq!(
            surface_content_width(width),
            surface_inner(layout.surface).width.max(1)
        );
        assert_eq!(
            surface_content_height(30),
            surface_inner(layout.surface).height
        );
    }
}

#[test]
fn test_column_helpers_handle_wide_chars() {
    let line = "a日b";
    assert_eq!(display_column(line, 1), 1);
    assert_eq!(display_column(line, 4), 3);
    assert_eq!(byte_at_column(line, 1), 1);
    assert_eq!(byte_at_column(line, 2), 1);
    assert_eq!(byte_at_column(line, 3), 4);
    assert_eq!(byte_at_column(line, 99), line.len());
}

#[test]
fn test_horizontal_offset_keeps_cursor_visible() {
    assert_eq!(horizontal_offset(5, 10), 0);
    assert_eq!(horizontal_offset(9, 10), 0);
    assert_eq!(horizontal_offset(10, 10), 1);
    assert_eq!(horizontal_offset(30, 10), 21);
}

#[test]
fn test_line_number_width() {
    assert_eq!(line_number_width(9), 1);
    assert_eq!(line_number_width(10), 2);
    assert_eq!(line_number_width(12_345), 5);
}

#[test]
fn test_render_shows_bars_and_panel() {
    let buffer = draw(&create_test_model("hello"));
    assert!(row_text(&buffer, 0).contains("File"));
    assert!(row_text(&buffer, 0).contains("Help"));
    assert!(row_text(&buffer, 1).contains("Toggle Markdown"));
    let screen = screen_text(&buffer);
    assert!(screen.contains("Replace"));
    assert!(screen.contains("search"));
    assert!(screen.contains("Search and Replace"));
}

#[test]
fn test_status_bar_shows_message_and_char_count() {
    let buffer = draw(&create_test_model("hello"));
    let status = row_text(&buffer, 23);
    assert!(status.starts_with(" Welcome to Markdown Editor"));
    assert!(status.trim_end().ends_with("chars: 5"));
}

#[test]
fn test_raw_mode_draws_gutter_and_text() {
    let buffer = draw(&create_test_model("alpha\nbeta"));
    // Surface inner starts at (29, 3).
    assert!(row_text_from(&buffer, 3, 29).starts_with("1 alpha"));
    assert!(row_text_from(&buffer, 4, 29).starts_with("2 beta"));
    assert_eq!(buffer[(31, 3)].style().bg, Some(Color::White));
}

#[test]
fn test_surface_title_shows_name_and_mode() {
    let mut model = create_test_model("x");
    model.file_path = Some(PathBuf::from("/tmp/notes.md"));
    let title = row_text(&draw(&model), 2);
    assert!(title.contains("notes.md - Raw"));

    let model = update(model, Message::Command(CommandId::ToggleMarkdown));
    let title = row_text(&draw(&model), 2);
    assert!(title.contains("Markdown [read-only]"));
}

#[test]
fn test_markdown_mode_renders_heading_style() {
    let model = update(
        create_test_model("# Heading\n\nBody text"),
        Message::Command(CommandId::ToggleMarkdown),
    );
    let buffer = draw(&model);
    let first = row_text_from(&buffer, 3, 29);
    assert!(first.contains("Heading"));
    assert!(!first.starts_with("1 "));
    let offset = first.find('H').unwrap();
    #[allow(clippy::cast_possible_truncation)]
    let cell = &buffer[(29 + offset as u16, 3)];
    assert_eq!(cell.style().fg, Some(Color::Cyan));
}

#[test]
fn test_long_line_scrolls_to_cursor() {
    let long = "x".repeat(100) + "END";
    let model = update(create_test_model(&long), Message::MoveEnd);
    let row = row_text(&draw(&model), 3);
    assert!(row.contains("END"));
}

#[test]
fn test_focused_field_shows_typed_text() {
    let mut model = update(
        create_test_model(""),
        Message::Command(CommandId::SearchReplace),
    );
    model = update(model, Message::FieldInput('q'));
    assert_eq!(model.focus, Focus::SearchField);
    let buffer = draw(&model);
    // Search field inner row is 4, column 2.
    assert_eq!(buffer[(2, 4)].symbol(), "q");
}

#[test]
fn test_open_menu_draws_dropdown() {
    let model = update(create_test_model(""), Message::OpenMenu(0));
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Open"));
    assert!(screen.contains("Ctrl+O"));
    assert!(screen.contains("Quit"));
}

#[test]
fn test_about_dialog_is_drawn() {
    let model = update(create_test_model(""), Message::Command(CommandId::About));
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("About mdpad"));
    assert!(screen.contains("This is a terminal text editor."));
    assert!(screen.contains("[ Ok ]"));
}

#[test]
fn test_settings_dialog_is_drawn() {
    let model = update(create_test_model(""), Message::Command(CommandId::Settings));
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Application Settings"));
    assert!(screen.contains("[ ] Show Warnings"));
    assert!(screen.contains("[ Cancel ]"));
}

#[test]
fn test_warning_stages_are_drawn() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SettingsStore::with_defaults(dir.path().join("s.json"));
    store.set_show_warnings(true).unwrap();
    let model = Model::new(TextSurface::default(), store, (80, 24));
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("My Text Editor"));
    assert!(screen.contains("This is beta software, do you want to continue?"));
    assert!(screen.contains("[ Abort ]"));

    let model = update(model, Message::DialogActivate);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("My Text Editor"));
    assert!(screen.contains("BETA SOFTWARE WARNING!"));
    assert!(screen.contains("[ Show Details ]"));
}

#[test]
fn test_menu_dropdown_rect_fits_items() {
    let area = Rect::new(0, 0, 80, 24);
    let rect = menu_dropdown_rect(0, area).unwrap();
    assert_eq!(rect.y, 1);
    assert_eq!(rect.height, 7);
    assert!(menu_dropdown_rect(9, area).is_none());
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let model = create_test_model("some text");
    let mut terminal = Terminal::new(TestBackend::new(8, 4)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
