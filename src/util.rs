// Filesystem helpers shared by the backup, sync and remote modules:
// directory enumeration, whole-tree copies and clearing a directory in place.

use crate::error::SyncError;

use std::fs;
use std::io;
use std::path::{Component, Path};

/// Timestamp shown to users and written to `sync_info.txt`.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp used in directory names (backups, fallback scratch dirs).
/// Lexically sortable, whole-second granularity.
pub const DIR_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// List the names of the immediate subdirectories of `path`.
///
/// Fails with [`SyncError::PathNotFound`] if `path` does not exist. Names are
/// returned sorted so repeated calls agree with each other.
pub fn list_subdirectories(path: &Path) -> Result<Vec<String>, SyncError> {
    if !path.exists() {
        return Err(SyncError::PathNotFound(path.to_path_buf()));
    }

    let entries = fs::read_dir(path).map_err(|e| SyncError::copy_io(path, path, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SyncError::copy_io(path, path, e))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();

    Ok(names)
}

/// Like [`list_subdirectories`], but a missing `path` yields an empty list.
pub fn list_subdirectories_if_exists(path: &Path) -> Result<Vec<String>, SyncError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    list_subdirectories(path)
}

/// True if `name` is usable as a single directory entry name
/// (no separators, not `.`/`..`, not empty).
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Copy the tree at `src` into `dest`, creating `dest` if needed.
/// Existing files at the destination are replaced.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), SyncError> {
    tracing::debug!(src = %src.display(), dest = %dest.display(), "copying tree");

    fs::create_dir_all(dest).map_err(|e| SyncError::copy_io(src, dest, e))?;

    let walk_path = walkdir::WalkDir::new(src).min_depth(1).follow_links(false);

    for entry in walk_path {
        let entry = entry.map_err(|e| SyncError::copy_io(src, dest, io::Error::from(e)))?;
        let rel_path = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SyncError::copy_io(entry.path(), dest, io::Error::other(e)))?;
        let new_path = dest.join(rel_path);

        copy_walk_entry(&entry, &new_path).map_err(|e| SyncError::copy_io(entry.path(), &new_path, e))?;
    }

    Ok(())
}

fn copy_walk_entry(entry: &walkdir::DirEntry, new_path: &Path) -> io::Result<()> {
    if entry.file_type().is_dir() {
        return fs::create_dir_all(new_path);
    }

    if let Some(parent) = new_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if new_path.exists() || new_path.is_symlink() {
        fs::remove_file(new_path)?;
    }

    #[cfg(unix)]
    if entry.file_type().is_symlink() {
        let symlink_src = fs::read_link(entry.path())?;
        return std::os::unix::fs::symlink(symlink_src, new_path);
    }

    fs::copy(entry.path(), new_path).map(|_| ())
}

/// Copy a single entry: directories as whole trees, files individually.
pub fn copy_entry(src: &Path, dest: &Path) -> Result<(), SyncError> {
    if src.is_dir() {
        copy_dir_recursive(src, dest)
    } else {
        fs::copy(src, dest)
            .map(|_| ())
            .map_err(|e| SyncError::copy_io(src, dest, e))
    }
}

/// Remove a file or a whole directory tree. Missing paths are fine.
pub fn remove_entry(path: &Path) -> io::Result<()> {
    if path.is_dir() && !path.is_symlink() {
        fs::remove_dir_all(path)
    } else if path.exists() || path.is_symlink() {
        fs::remove_file(path)
    } else {
        Ok(())
    }
}

/// Delete everything inside `dir`, keeping `dir` itself.
pub fn clear_dir_contents(dir: &Path) -> Result<(), SyncError> {
    let entries = fs::read_dir(dir).map_err(|e| SyncError::copy_io(dir, dir, e))?;
    for entry in entries {
        let p = entry.map_err(|e| SyncError::copy_io(dir, dir, e))?.path();
        remove_entry(&p).map_err(|e| SyncError::copy_io(&p, &p, e))?;
    }
    Ok(())
}
