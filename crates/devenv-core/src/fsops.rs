use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("folder name cannot be empty")]
    EmptyName,
    #[error("folder name must stay inside the chosen directory: {0}")]
    InvalidName(String),
    #[error("failed to create folder {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Drops hidden entries, keeping everything else in its original order.
pub fn filter_hidden(entries: Vec<DirEntryInfo>) -> Vec<DirEntryInfo> {
    entries
        .into_iter()
        .filter(|entry| !is_hidden(&entry.name))
        .collect()
}

/// Lists the immediate subdirectories of `path`, sorted case-insensitively
/// by name. An unreadable directory yields an empty listing and unreadable
/// entries are skipped, so callers always get a usable (possibly partial)
/// view.
pub fn list_subdirectories(path: &Path) -> Vec<DirEntryInfo> {
    let Ok(read_dir) = fs::read_dir(path) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for entry in read_dir.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        entries.push(DirEntryInfo {
            path: entry.path(),
            name,
        });
    }

    entries.sort_by(|left, right| {
        left.name
            .to_lowercase()
            .cmp(&right.name.to_lowercase())
            .then_with(|| left.name.cmp(&right.name))
    });
    entries
}

/// Normalizes a user-entered folder name into a relative path. The name may
/// contain intermediate segments ("addons/custom") but must not be absolute
/// and must not escape the parent directory.
pub fn normalize_folder_name(name: &str) -> Result<PathBuf, FsError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FsError::EmptyName);
    }

    let raw = Path::new(trimmed);
    if raw.is_absolute() {
        return Err(FsError::InvalidName(trimmed.to_string()));
    }

    let mut clean = PathBuf::new();
    for component in raw.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(value) => clean.push(value),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FsError::InvalidName(trimmed.to_string()));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(FsError::EmptyName);
    }

    Ok(clean)
}

/// Creates `parent/<name>` including missing intermediate directories.
/// Creating a folder that already exists is not an error.
pub fn create_folder(parent: &Path, name: &str) -> Result<PathBuf, FsError> {
    let relative = normalize_folder_name(name)?;
    let target = parent.join(relative);

    fs::create_dir_all(&target).map_err(|source| FsError::Create {
        path: target.clone(),
        source,
    })?;

    Ok(target)
}
