//! Log setup.
//!
//! The terminal belongs to the UI while the editor runs, so logs only ever
//! go to a file: `--log-file PATH` when given, otherwise `mdpad.log` in a
//! `logs` directory next to the settings file.
//!
//! Filter with `RUST_LOG`, e.g. `RUST_LOG=mdpad=debug`. WARN and above are
//! always kept.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// File name used when no `--log-file` is given.
pub const LOG_FILE_NAME: &str = "mdpad.log";

/// Directory and file name logs are written to.
pub fn log_target(log_file: Option<&Path>, settings_path: &Path) -> (PathBuf, String) {
    if let Some(path) = log_file
        && let Some(name) = path.file_name()
    {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        return (dir, name.to_string_lossy().into_owned());
    }
    let dir = settings_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("logs"), |p| p.join("logs"));
    (dir, LOG_FILE_NAME.to_string())
}

/// A non-rotating appender for `dir/name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn file_appender(dir: &Path, name: &str) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", dir.join(name).display()))
}

/// Install the global subscriber writing to the log file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(log_file: Option<&Path>, settings_path: &Path) -> Result<()> {
    let (dir, name) = log_target(log_file, settings_path);
    let appender = file_appender(&dir, &name)?;
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(appender)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install logger: {err}"))
}
