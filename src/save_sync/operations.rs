// Atomic I/O operations for save synchronization
// Functions that interact with the filesystem

use crate::error::SyncError;
use crate::util::{
    clear_dir_contents, copy_dir_recursive, copy_entry, list_subdirectories_if_exists, remove_entry,
};

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

use super::pure::{SYNC_INFO_FILE, next_slot_name, sync_info_contents, visible_entries};
use super::types::DownloadMode;

/// Make `dest_dir` an exact copy of `src_dir`: everything in `dest_dir` is
/// deleted first, then every entry of `src_dir` is copied in.
///
/// Not atomic: a failure after the delete leaves `dest_dir` partly filled.
pub fn replace_dir_contents(src_dir: &Path, dest_dir: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(dest_dir).map_err(|e| SyncError::copy_io(src_dir, dest_dir, e))?;
    clear_dir_contents(dest_dir)?;

    let entries = fs::read_dir(src_dir).map_err(|e| SyncError::copy_io(src_dir, dest_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SyncError::copy_io(src_dir, dest_dir, e))?;
        let dest = dest_dir.join(entry.file_name());
        tracing::debug!(entry = %entry.path().display(), "copying");
        copy_entry(&entry.path(), &dest)?;
    }

    Ok(())
}

pub fn write_sync_info(dir: &Path, user_folder: &str, now: NaiveDateTime) -> Result<(), SyncError> {
    let path = dir.join(SYNC_INFO_FILE);
    fs::write(&path, sync_info_contents(user_folder, now))
        .map_err(|e| SyncError::copy_io(SYNC_INFO_FILE, &path, e))
}

/// Existing save slots of a local user folder.
pub fn existing_slots(local_user_dir: &Path) -> Result<Vec<String>, SyncError> {
    Ok(visible_entries(list_subdirectories_if_exists(local_user_dir)?))
}

/// Copy `source_slot` into `local_user_dir` according to `mode`.
/// Returns the name of the slot written.
///
/// A new slot is always a fresh directory; an existing one is never merged into.
pub fn install_slot(
    source_slot: &Path,
    local_user_dir: &Path,
    mode: &DownloadMode,
) -> Result<(String, PathBuf), SyncError> {
    fs::create_dir_all(local_user_dir)
        .map_err(|e| SyncError::copy_io(source_slot, local_user_dir, e))?;

    let slot_name = match mode {
        DownloadMode::Replace(target) => {
            let target_path = local_user_dir.join(target);
            tracing::info!(slot = %target_path.display(), "removing slot to replace");
            remove_entry(&target_path).map_err(|e| SyncError::copy_io(source_slot, &target_path, e))?;
            target.clone()
        }
        DownloadMode::NewSlot => {
            let existing = list_subdirectories_if_exists(local_user_dir)?;
            let name = next_slot_name(&existing)
                .ok_or_else(|| SyncError::NoFreeSlot(local_user_dir.to_path_buf()))?;
            let path = local_user_dir.join(&name);
            fs::create_dir(&path).map_err(|e| SyncError::copy_io(source_slot, &path, e))?;
            name
        }
    };

    let dest = local_user_dir.join(&slot_name);
    tracing::info!(src = %source_slot.display(), dest = %dest.display(), "installing save slot");
    copy_dir_recursive(source_slot, &dest)?;

    Ok((slot_name, dest))
}
