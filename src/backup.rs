// Local snapshots of the whole save root, taken before destructive changes
// or on request.

use crate::error::SyncError;
use crate::util::{DIR_TIME_FORMAT, copy_dir_recursive};

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "backup_";

pub fn backup_dir_name(now: NaiveDateTime) -> String {
    format!("{}{}", BACKUP_PREFIX, now.format(DIR_TIME_FORMAT))
}

/// Copy the save root into `<backups_dir>/backup_<YYYYMMDD_HHMMSS>`.
///
/// A second backup within the same second fails with `AlreadyExists` instead
/// of overwriting the first. A failed copy leaves the partial backup in place;
/// its path is carried in the error.
pub fn create_backup(
    save_root: &Path,
    backups_dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, SyncError> {
    if !save_root.exists() {
        return Err(SyncError::SaveRootMissing(save_root.to_path_buf()));
    }

    let backup_path = backups_dir.join(backup_dir_name(now));
    let backup_err = |source| SyncError::BackupIo {
        path: backup_path.clone(),
        source,
    };

    fs::create_dir_all(backups_dir).map_err(backup_err)?;
    fs::create_dir(&backup_path).map_err(backup_err)?;

    tracing::info!(
        src = %save_root.display(),
        dest = %backup_path.display(),
        "backing up saves"
    );

    copy_dir_recursive(save_root, &backup_path).map_err(|e| match e {
        SyncError::CopyIo { source, .. } => backup_err(source),
        other => other,
    })?;

    Ok(backup_path)
}

/// Names of existing backups, oldest first.
pub fn list_backups(backups_dir: &Path) -> Result<Vec<String>, SyncError> {
    let mut names: Vec<String> = crate::util::list_subdirectories_if_exists(backups_dir)?
        .into_iter()
        .filter(|name| name.starts_with(BACKUP_PREFIX))
        .collect();
    // the timestamp format sorts lexically
    names.sort();
    Ok(names)
}
