// Filesystem and hosting steps used by the remote pipelines

use super::pure::{MAX_NAME_ATTEMPTS, candidate_name, fallback_scratch_dir, repo_name};
use super::types::{CreateOutcome, RemoteRepo, RepoHost};
use crate::config::{AppConfig, ConfigStore};
use crate::error::SyncError;
use crate::util::copy_dir_recursive;

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Look up the configured repository, creating it when it doesn't exist.
/// A created repository's full name is written to the config right away.
pub fn resolve_or_create_repo(
    config: &mut AppConfig,
    store: &ConfigStore,
    host: &dyn RepoHost,
) -> Result<RemoteRepo, SyncError> {
    let configured = config.github_repo.trim().to_string();

    if let Some(repo) = host.find_repo(&configured)? {
        tracing::info!(repository = %repo.full_name, "using existing repository");
        return Ok(repo);
    }

    let base = repo_name(&configured);
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = candidate_name(base, attempt);
        match host.create_repo(&name)? {
            CreateOutcome::Created(repo) => {
                tracing::info!(repository = %repo.full_name, "created repository");
                config.github_repo = repo.full_name.clone();
                store.save(config)?;
                return Ok(repo);
            }
            CreateOutcome::NameTaken => continue,
        }
    }

    Err(SyncError::RemoteApi(format!(
        "Failed to get or create repository: no free name after {} attempts",
        MAX_NAME_ATTEMPTS
    )))
}

/// Get an empty scratch directory at `scratch`. If a stale one can't be
/// removed, a timestamped sibling is used instead.
pub fn prepare_scratch(scratch: &Path, now: NaiveDateTime) -> Result<PathBuf, SyncError> {
    let mut dir = scratch.to_path_buf();

    if dir.exists() {
        if let Err(e) = fs::remove_dir_all(&dir) {
            let fallback = fallback_scratch_dir(scratch, now);
            tracing::warn!(
                path = %dir.display(),
                fallback = %fallback.display(),
                error = %e,
                "could not remove stale scratch directory"
            );
            dir = fallback;
        }
    }

    fs::create_dir_all(&dir).map_err(|e| SyncError::copy_io(scratch, &dir, e))?;
    Ok(dir)
}

/// Best effort.
pub fn remove_scratch(dir: &Path) {
    if !dir.exists() {
        return;
    }
    if let Err(e) = fs::remove_dir_all(dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not remove scratch directory");
    }
}

/// Copy each user folder into the working copy root, replacing same-named trees.
pub fn stage_user_folders(
    save_root: &Path,
    workdir: &Path,
    user_folders: &[String],
) -> Result<(), SyncError> {
    for folder in user_folders {
        let src = save_root.join(folder);
        let dst = workdir.join(folder);
        if dst.exists() {
            fs::remove_dir_all(&dst).map_err(|e| SyncError::copy_io(&src, &dst, e))?;
        }
        tracing::debug!(src = %src.display(), dest = %dst.display(), "staging user folder");
        copy_dir_recursive(&src, &dst)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 7)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn prepare_scratch_clears_stale_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("ScheduleISyncTemp");
        fs::create_dir_all(scratch.join(".git")).unwrap();
        fs::write(scratch.join("old.txt"), "x").unwrap();

        let got = prepare_scratch(&scratch, now()).unwrap();
        assert_eq!(got, scratch);
        assert_eq!(fs::read_dir(&got).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn prepare_scratch_falls_back_when_removal_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("ScheduleISyncTemp");
        fs::create_dir_all(scratch.join("locked/inner")).unwrap();
        fs::write(scratch.join("locked/inner/f"), "x").unwrap();
        fs::set_permissions(scratch.join("locked"), fs::Permissions::from_mode(0o555)).unwrap();

        let got = prepare_scratch(&scratch, now());

        fs::set_permissions(scratch.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
        let got = got.unwrap();
        // root can remove anything, so either outcome is valid there
        if got != scratch {
            assert_eq!(got, dir.path().join("ScheduleISyncTemp_20250407_200000"));
            assert!(got.is_dir());
        }
    }

    #[test]
    fn stage_replaces_same_named_trees_only() {
        let dir = tempfile::tempdir().unwrap();
        let save_root = dir.path().join("Saves");
        let work = dir.path().join("work");
        fs::create_dir_all(save_root.join("7656/SaveGame_1")).unwrap();
        fs::write(save_root.join("7656/SaveGame_1/Game.json"), "new").unwrap();
        fs::create_dir_all(work.join("7656/SaveGame_9")).unwrap();
        fs::create_dir_all(work.join("9999/SaveGame_1")).unwrap();

        stage_user_folders(&save_root, &work, &["7656".to_string()]).unwrap();

        assert!(!work.join("7656/SaveGame_9").exists());
        assert_eq!(fs::read_to_string(work.join("7656/SaveGame_1/Game.json")).unwrap(), "new");
        assert!(work.join("9999/SaveGame_1").is_dir());
    }

    #[test]
    fn remove_scratch_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        remove_scratch(&dir.path().join("nope"));
        let there = dir.path().join("there");
        fs::create_dir(&there).unwrap();
        remove_scratch(&there);
        assert!(!there.exists());
    }
}
