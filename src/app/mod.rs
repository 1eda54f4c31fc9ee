//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`run_pending`]: Runs the I/O that `update` queued
//! - [`App::run`]: Main event loop with rendering

pub mod dialogs;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::run_pending;
pub use model::{Effect, Focus, MenuState, Model, WELCOME_MESSAGE};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::SettingsStore;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    settings: SettingsStore,
}

impl App {
    /// Create a new application backed by `settings`.
    pub const fn new(settings: SettingsStore) -> Self {
        Self {
            file_path: None,
            settings,
        }
    }

    /// Open `path` once the window is up.
    #[must_use]
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }
}
