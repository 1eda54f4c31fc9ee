//! Whole-file open and save, plus directory listings for the file picker.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Failure reading or writing a document.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied for {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{} is a directory", .0.display())]
    IsDirectory(PathBuf),

    #[error("{} is not valid UTF-8 text", .0.display())]
    InvalidUtf8(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::IsADirectory => Self::IsDirectory(path),
            io::ErrorKind::InvalidData => Self::InvalidUtf8(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// The path the operation was attempted on.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path)
            | Self::PermissionDenied(path)
            | Self::IsDirectory(path)
            | Self::InvalidUtf8(path)
            | Self::Io { path, .. } => path,
        }
    }
}

/// Read a whole file as UTF-8 text.
///
/// # Errors
///
/// Returns a [`FileError`] describing why the file could not be read.
/// Nothing is returned on partial reads.
pub fn read_document(path: &Path) -> Result<String, FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|err| FileError::from_io(path, err))?;
    info!(path = %path.display(), bytes = text.len(), "document loaded");
    Ok(text)
}

/// Write the whole document, truncating any existing file.
///
/// # Errors
///
/// Returns a [`FileError`] describing why the file could not be written.
pub fn write_document(path: &Path, text: &str) -> Result<(), FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    fs::write(path, text).map_err(|err| FileError::from_io(path, err))?;
    info!(path = %path.display(), bytes = text.len(), "document saved");
    Ok(())
}

/// File type filter offered by the file picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    Text,
    Python,
    All,
}

impl FileFilter {
    pub const ALL: [Self; 3] = [Self::Text, Self::Python, Self::All];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text Files (*.txt)",
            Self::Python => "Python Files (*.py)",
            Self::All => "All Files (*)",
        }
    }

    /// Whether a file name passes this filter. Only the extension is checked.
    pub fn matches(self, path: &Path) -> bool {
        let extension = path.extension().and_then(|ext| ext.to_str());
        match self {
            Self::Text => extension == Some("txt"),
            Self::Python => extension == Some("py"),
            Self::All => true,
        }
    }

    /// The next filter in the selector, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Text => Self::Python,
            Self::Python => Self::All,
            Self::All => Self::Text,
        }
    }
}

/// One row in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirEntry {
    Parent(PathBuf),
    Directory(PathBuf),
    File(PathBuf),
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::Parent(path) | Self::Directory(path) | Self::File(path) => path,
        }
    }

    /// Display name: `..` for the parent, `name/` for directories.
    pub fn display_name(&self) -> String {
        let name = || {
            self.path()
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        };
        match self {
            Self::Parent(_) => "..".to_string(),
            Self::Directory(_) => format!("{}/", name()),
            Self::File(_) => name(),
        }
    }
}

/// List `dir`: the parent entry, then directories, then files passing `filter`.
///
/// Hidden entries are skipped and names sort case-insensitively.
///
/// # Errors
///
/// Returns a [`FileError`] if the directory cannot be read.
pub fn list_directory(dir: &Path, filter: FileFilter) -> Result<Vec<DirEntry>, FileError> {
    let read = fs::read_dir(dir).map_err(|err| FileError::from_io(dir, err))?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in read.flatten() {
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden {
            continue;
        }
        if path.is_dir() {
            dirs.push(path);
        } else if filter.matches(&path) {
            files.push(path);
        }
    }

    let sort_key = |path: &PathBuf| {
        path.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    };
    dirs.sort_by_key(sort_key);
    files.sort_by_key(sort_key);

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(DirEntry::Parent(parent.to_path_buf()));
    }
    entries.extend(dirs.into_iter().map(DirEntry::Directory));
    entries.extend(files.into_iter().map(DirEntry::File));
    debug!(dir = %dir.display(), count = entries.len(), "directory listed");
    Ok(entries)
}

/// The user's home directory, falling back to the working directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}
