//! Error types for save sync operations.

use std::path::PathBuf;

/// Errors from loading or saving the configuration record.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine the home directory (set HOME or USERPROFILE)")]
    HomeNotFound,
}

/// Errors produced by sync, download, backup and push operations.
///
/// Cancelling a prompt is not an error; see [`crate::selection::Choice`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Save directory not found: {}", .0.display())]
    SaveRootMissing(PathBuf),

    #[error("No user save folders found")]
    NoUserFolders,

    #[error("No friend save folders found in the shared folder")]
    FriendFolderEmpty,

    #[error("No user save folders found for {0}")]
    UserFolderEmpty(String),

    #[error("No save games found in user folder {0}")]
    SaveSlotEmpty(String),

    #[error("Nothing to choose from")]
    NoCandidates,

    #[error("Shared folder is not configured. Please sync your saves first.")]
    SharedFolderNotConfigured,

    #[error("GitHub settings are not configured. Set github-token and github-repo first.")]
    RemoteNotConfigured,

    #[error("Remote repository error: {0}")]
    RemoteApi(String),

    #[error("Failed to create backup at {}: {source}", path.display())]
    BackupIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} -> {}: {source}", from.display(), to.display())]
    CopyIo {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No unused save slot number left in {}", .0.display())]
    NoFreeSlot(PathBuf),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("{0}")]
    Friend(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    pub fn copy_io(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::CopyIo {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Short title used when the error is shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            SyncError::NoUserFolders
            | SyncError::FriendFolderEmpty
            | SyncError::UserFolderEmpty(_)
            | SyncError::SaveSlotEmpty(_)
            | SyncError::NoCandidates => "Nothing Found",
            SyncError::SharedFolderNotConfigured | SyncError::RemoteNotConfigured => "Setup Required",
            SyncError::BackupIo { .. } => "Backup Failed",
            SyncError::RemoteApi(_) => "GitHub Error",
            SyncError::Config(_) => "Settings Error",
            _ => "Error",
        }
    }
}
