//! mdpad - A terminal text editor with a markdown preview.
//!
//! # Usage
//!
//! ```bash
//! mdpad notes.md
//! mdpad --settings ./mdpad.json notes.md
//! mdpad --reset-settings
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mdpad::app::App;
use mdpad::config::{SettingsStore, clear_settings, default_settings_path};
use mdpad::logging;

/// A terminal text editor with a markdown preview
#[derive(Parser, Debug)]
#[command(name = "mdpad", version, about, long_about = None)]
struct Cli {
    /// Text file to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read and write settings at PATH instead of the platform location
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Delete stored settings before starting
    #[arg(long)]
    reset_settings: bool,

    /// Write log output to PATH instead of the default log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    if let Err(err) = logging::init(cli.log_file.as_deref(), &settings_path) {
        if cli.log_file.is_some() {
            return Err(err);
        }
        // Before the UI takes the terminal, so this does not corrupt the screen.
        eprintln!("mdpad: logging disabled: {err:#}");
    }

    if cli.reset_settings {
        clear_settings(&settings_path)?;
    }
    let settings = SettingsStore::open(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    let mut app = App::new(settings).with_file(cli.file);
    app.run().context("Application error")
}
