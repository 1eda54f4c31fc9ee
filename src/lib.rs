// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # mdpad
//!
//! A minimal terminal text editor with an optional markdown rendering.
//!
//! The window has a menu bar, a toolbar, a search-and-replace panel, a
//! text surface, and a status bar showing the character count. The text
//! surface toggles between raw editing and a read-only markdown rendering.
//!
//! ## Architecture
//!
//! mdpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions, queuing I/O as effects
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop, state, and dialogs
//! - [`commands`]: Command ids, menus, toolbar, and the command table
//! - [`config`]: Persisted settings
//! - [`document`]: Markdown parsing and rendering
//! - [`editor`]: Text buffer and the raw/markdown text surface
//! - [`files`]: Whole-file open/save and directory listing
//! - [`logging`]: File-only log setup
//! - [`search`]: Literal search and replace
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod commands;
pub mod config;
pub mod document;
pub mod editor;
pub mod files;
pub mod logging;
pub mod search;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::editor::{DisplayMode, TextSurface};
    pub use crate::ui::viewport::Viewport;
}
