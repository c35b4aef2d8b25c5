// Push to our repository, fetch from a friend's

use super::operations::{prepare_scratch, remove_scratch, resolve_or_create_repo, stage_user_folders};
use super::pure::{commit_message, friend_clone_url};
use super::types::{GitClient, PushReport, RemoteRepo, RepoHost};
use crate::config::{AppConfig, ConfigStore, find_friend, mark_friend_updated};
use crate::error::SyncError;
use crate::prompt::Prompter;
use crate::save_sync::{DownloadReport, download_from_friend_dir, visible_entries};
use crate::selection::Choice;
use crate::util::{DISPLAY_TIME_FORMAT, list_subdirectories};

use chrono::NaiveDateTime;
use std::path::Path;

/// Mirror every user folder of the save root into the configured repository.
///
/// Nothing touches the network until the config and the save root have been
/// checked. `scratch` is the working copy location; it is removed afterwards.
pub fn push_saves(
    config: &mut AppConfig,
    store: &ConfigStore,
    host: &dyn RepoHost,
    git: &dyn GitClient,
    scratch: &Path,
    now: NaiveDateTime,
) -> Result<PushReport, SyncError> {
    if !config.remote_configured() {
        return Err(SyncError::RemoteNotConfigured);
    }

    let save_root = config.save_dir();
    if !save_root.exists() {
        return Err(SyncError::SaveRootMissing(save_root));
    }
    let user_folders = visible_entries(list_subdirectories(&save_root)?);
    if user_folders.is_empty() {
        return Err(SyncError::NoUserFolders);
    }

    let repo = resolve_or_create_repo(config, store, host)?;

    let workdir = prepare_scratch(scratch, now)?;
    let result = commit_and_push(git, &repo, &save_root, &workdir, &user_folders, now);
    remove_scratch(&workdir);

    Ok(PushReport {
        repository: repo.full_name,
        html_url: repo.html_url,
        committed: result?,
        pushed_at: now,
    })
}

fn commit_and_push(
    git: &dyn GitClient,
    repo: &RemoteRepo,
    save_root: &Path,
    workdir: &Path,
    user_folders: &[String],
    now: NaiveDateTime,
) -> Result<bool, SyncError> {
    git.clone_repo(&repo.clone_url, workdir)?;
    stage_user_folders(save_root, workdir, user_folders)?;

    let committed = git.commit_all(workdir, &commit_message(now))?;
    if committed {
        git.push(workdir, &repo.default_branch)?;
        tracing::info!(repository = %repo.full_name, branch = %repo.default_branch, "pushed saves");
    } else {
        tracing::info!(repository = %repo.full_name, "remote already up to date");
    }
    Ok(committed)
}

/// Clone a friend's repository and run the download flow on it, with the
/// clone root standing in for the friend's shared folder.
#[allow(clippy::too_many_arguments)]
pub fn fetch_friend_save(
    config: &mut AppConfig,
    store: &ConfigStore,
    git: &dyn GitClient,
    friend_name: &str,
    scratch: &Path,
    backups_dir: &Path,
    prompter: &mut dyn Prompter,
    now: NaiveDateTime,
) -> Result<Choice<DownloadReport>, SyncError> {
    let friend = find_friend(config, friend_name)
        .cloned()
        .ok_or_else(|| SyncError::Friend(format!("No friend named {}", friend_name)))?;

    let save_root = config.save_dir();
    if !save_root.exists() {
        return Err(SyncError::SaveRootMissing(save_root));
    }

    let workdir = prepare_scratch(scratch, now)?;
    tracing::info!(friend = %friend.name, "fetching friend's repository");
    let result = git
        .clone_repo(&friend_clone_url(&friend.repo), &workdir)
        .and_then(|()| {
            download_from_friend_dir(&save_root, &workdir, &friend.name, backups_dir, prompter, now)
        });
    remove_scratch(&workdir);

    let choice = result?;
    if let Choice::Selected(_) = &choice {
        let stamp = now.format(DISPLAY_TIME_FORMAT).to_string();
        mark_friend_updated(config, &friend.name, &stamp)?;
        store.save(config)?;
    }
    Ok(choice)
}
