use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Organization half of the settings identifier pair.
pub const ORGANIZATION: &str = "mdpad";
/// Application half of the settings identifier pair.
pub const APPLICATION: &str = "markdown-editor";

/// Persisted application settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the two-stage beta warning at startup.
    pub show_warnings: bool,
}

/// Settings backed by a JSON file.
///
/// Created once at startup and handed to the model; every write goes
/// straight to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load the store at `path`.
    ///
    /// A missing or malformed file starts from defaults; the next write
    /// replaces a malformed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings {}", path.display()))?;
            serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), "settings unreadable, using defaults: {err}");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        };
        Ok(Self { path, settings })
    }

    /// A store that starts from defaults regardless of what is on disk.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn settings(&self) -> Settings {
        self.settings
    }

    pub const fn show_warnings(&self) -> bool {
        self.settings.show_warnings
    }

    /// Update `show_warnings` and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written. The
    /// in-memory value is updated either way.
    pub fn set_show_warnings(&mut self, value: bool) -> Result<()> {
        self.settings.show_warnings = value;
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings dir {}", parent.display()))?;
        }
        let json =
            serde_json::to_string_pretty(&self.settings).context("Failed to encode settings")?;
        fs::write(&self.path, format!("{json}\n"))
            .with_context(|| format!("Failed to write settings {}", self.path.display()))?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Platform preferences location for `<organization>/<application>.json`.
pub fn settings_path(organization: &str, application: &str) -> PathBuf {
    let file_name = format!("{application}.json");

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(organization).join(file_name);
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Preferences")
                .join(organization)
                .join(file_name);
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(organization).join(file_name);
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(organization)
                .join(file_name);
        }
    }

    PathBuf::from(file_name)
}

/// The default settings location for this application.
pub fn default_settings_path() -> PathBuf {
    settings_path(ORGANIZATION, APPLICATION)
}

/// Delete stored settings, if any.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_settings(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}
