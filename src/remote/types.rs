use crate::error::SyncError;

use chrono::NaiveDateTime;
use std::path::Path;

/// A repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    /// `owner/name`
    pub full_name: String,
    pub clone_url: String,
    pub default_branch: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(RemoteRepo),
    /// The account already has a repository with that name.
    NameTaken,
}

/// Repository lookup and creation on the hosting service.
pub trait RepoHost {
    /// `Ok(None)` when the repository does not exist (or isn't visible to us).
    fn find_repo(&self, full_name: &str) -> Result<Option<RemoteRepo>, SyncError>;

    /// Create a private repository under the authenticated account.
    fn create_repo(&self, name: &str) -> Result<CreateOutcome, SyncError>;
}

/// The handful of git operations the pipelines need.
pub trait GitClient {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), SyncError>;

    /// Stage everything and commit. Returns `false` when there was nothing to commit.
    fn commit_all(&self, workdir: &Path, message: &str) -> Result<bool, SyncError>;

    fn push(&self, workdir: &Path, branch: &str) -> Result<(), SyncError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReport {
    /// `owner/name` actually pushed to (may differ from the configured one
    /// when the repository had to be created under another name)
    pub repository: String,
    pub html_url: String,
    /// `false` when the remote already matched the local saves
    pub committed: bool,
    pub pushed_at: NaiveDateTime,
}
