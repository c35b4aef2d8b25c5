// Orchestration pipelines for save synchronization
// Combines pure logic, operations and user selection into the sync/download flows

use crate::backup::create_backup;
use crate::error::SyncError;
use crate::prompt::{NoticeLevel, Prompter};
use crate::selection::{Choice, resolve, resolve_or};
use crate::util::{is_plain_name, list_subdirectories};

use chrono::NaiveDateTime;
use std::path::Path;

use super::operations::{existing_slots, install_slot, replace_dir_contents, write_sync_info};
use super::pure::{friend_candidates, shared_user_dir, visible_entries};
use super::types::{DownloadMode, DownloadReport, SyncReport};

fn require_save_root(save_root: &Path) -> Result<(), SyncError> {
    if !save_root.exists() {
        return Err(SyncError::SaveRootMissing(save_root.to_path_buf()));
    }
    Ok(())
}

fn require_plain(name: &str) -> Result<(), SyncError> {
    if !is_plain_name(name) {
        return Err(SyncError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Replace `<shared>/MySaves/<user_folder>` with the local user folder and
/// stamp it with `sync_info.txt`.
pub fn sync_user_folder(
    save_root: &Path,
    shared_root: &Path,
    user_folder: &str,
    now: NaiveDateTime,
) -> Result<SyncReport, SyncError> {
    require_save_root(save_root)?;
    require_plain(user_folder)?;

    let source = save_root.join(user_folder);
    if !source.is_dir() {
        return Err(SyncError::PathNotFound(source));
    }

    let target = shared_user_dir(shared_root, user_folder);
    tracing::info!(
        user_folder,
        src = %source.display(),
        dest = %target.display(),
        "syncing saves to shared folder"
    );

    replace_dir_contents(&source, &target)?;
    write_sync_info(&target, user_folder, now)?;

    Ok(SyncReport {
        user_folder: user_folder.to_string(),
        target,
        synced_at: now,
    })
}

/// Pick the local user folder (asking only if there are several) and sync it.
pub fn sync_to_shared(
    save_root: &Path,
    shared_root: &Path,
    prompter: &mut dyn Prompter,
    now: NaiveDateTime,
) -> Result<Choice<SyncReport>, SyncError> {
    require_save_root(save_root)?;

    let user_folders = visible_entries(list_subdirectories(save_root)?);
    let user_folder = match resolve_or("Select User Folder", &user_folders, prompter, || {
        SyncError::NoUserFolders
    })? {
        Choice::Selected(f) => f,
        Choice::Cancelled => return Ok(Choice::Cancelled),
    };

    sync_user_folder(save_root, shared_root, &user_folder, now).map(Choice::Selected)
}

/// Copy `<shared>/<friend>/<user_folder>/<save_slot>` into the local save root.
pub fn download_from_shared(
    save_root: &Path,
    shared_root: &Path,
    friend: &str,
    user_folder: &str,
    save_slot: &str,
    mode: &DownloadMode,
) -> Result<DownloadReport, SyncError> {
    require_save_root(save_root)?;
    require_plain(friend)?;
    install_into_save_root(save_root, &shared_root.join(friend), friend, user_folder, save_slot, mode)
}

fn install_into_save_root(
    save_root: &Path,
    friend_dir: &Path,
    friend: &str,
    user_folder: &str,
    save_slot: &str,
    mode: &DownloadMode,
) -> Result<DownloadReport, SyncError> {
    require_plain(user_folder)?;
    require_plain(save_slot)?;
    if let DownloadMode::Replace(target) = mode {
        require_plain(target)?;
    }

    let source = friend_dir.join(user_folder).join(save_slot);
    if !source.is_dir() {
        return Err(SyncError::PathNotFound(source));
    }

    let (slot_name, path) = install_slot(&source, &save_root.join(user_folder), mode)?;

    Ok(DownloadReport {
        friend: friend.to_string(),
        source_slot: save_slot.to_string(),
        slot_name,
        path,
        replaced: matches!(mode, DownloadMode::Replace(_)),
    })
}

/// Pick a friend in the shared folder, then continue as [`download_from_friend_dir`].
pub fn download_interactive(
    save_root: &Path,
    shared_root: &Path,
    backups_dir: &Path,
    prompter: &mut dyn Prompter,
    now: NaiveDateTime,
) -> Result<Choice<DownloadReport>, SyncError> {
    require_save_root(save_root)?;

    let friends = friend_candidates(list_subdirectories(shared_root)?);
    let friend = match resolve_or("Select Friend", &friends, prompter, || SyncError::FriendFolderEmpty)? {
        Choice::Selected(f) => f,
        Choice::Cancelled => return Ok(Choice::Cancelled),
    };

    download_from_friend_dir(
        save_root,
        &shared_root.join(&friend),
        &friend,
        backups_dir,
        prompter,
        now,
    )
}

/// Download flow for one friend's folder (`<user folder>/<save slot>` layout):
/// pick user folder and slot, offer a backup, then replace a local slot or
/// create a new one.
pub fn download_from_friend_dir(
    save_root: &Path,
    friend_dir: &Path,
    friend: &str,
    backups_dir: &Path,
    prompter: &mut dyn Prompter,
    now: NaiveDateTime,
) -> Result<Choice<DownloadReport>, SyncError> {
    require_save_root(save_root)?;

    let user_folders = visible_entries(list_subdirectories(friend_dir)?);
    let user_folder = match resolve_or("Select User Folder", &user_folders, prompter, || {
        SyncError::UserFolderEmpty(friend.to_string())
    })? {
        Choice::Selected(f) => f,
        Choice::Cancelled => return Ok(Choice::Cancelled),
    };

    let slots = visible_entries(list_subdirectories(&friend_dir.join(&user_folder))?);
    let title = format!("Select {}'s Save Game", friend);
    let save_slot = match resolve_or(&title, &slots, prompter, || {
        SyncError::SaveSlotEmpty(user_folder.clone())
    })? {
        Choice::Selected(s) => s,
        Choice::Cancelled => return Ok(Choice::Cancelled),
    };

    if prompter.confirm(
        "Backup",
        "Do you want to backup your current save before downloading?",
    ) {
        let backup_path = create_backup(save_root, backups_dir, now)?;
        prompter.notify(
            NoticeLevel::Info,
            "Backup",
            &format!("Backup created successfully at:\n{}", backup_path.display()),
        );
    }

    let mode = match choose_mode(save_root, &user_folder, friend, prompter)? {
        Choice::Selected(mode) => mode,
        Choice::Cancelled => return Ok(Choice::Cancelled),
    };

    install_into_save_root(save_root, friend_dir, friend, &user_folder, &save_slot, &mode)
        .map(Choice::Selected)
}

fn choose_mode(
    save_root: &Path,
    user_folder: &str,
    friend: &str,
    prompter: &mut dyn Prompter,
) -> Result<Choice<DownloadMode>, SyncError> {
    let question = format!(
        "Do you want to replace an existing save with {}'s save?\n\n\
         Yes: Replace existing save\n\
         No: Create a new save slot",
        friend
    );
    if !prompter.confirm("Save Location", &question) {
        return Ok(Choice::Selected(DownloadMode::NewSlot));
    }

    let existing = existing_slots(&save_root.join(user_folder))?;
    if existing.is_empty() {
        prompter.notify(
            NoticeLevel::Info,
            "Info",
            "No existing saves found. Creating a new save slot.",
        );
        return Ok(Choice::Selected(DownloadMode::NewSlot));
    }

    Ok(resolve("Select Save to Replace", &existing, prompter)?.map(DownloadMode::Replace))
}
