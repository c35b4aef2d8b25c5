use crate::paths::PlatformPaths;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `last_updated` of a friend whose repository was never fetched.
pub const NEVER_UPDATED: &str = "Never";

fn never_updated() -> String {
    NEVER_UPDATED.to_string()
}

/// A friend whose saves can be fetched from their remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEntry {
    pub name: String,
    /// `owner/name` or a full clone URL
    pub repo: String,
    #[serde(default = "never_updated")]
    pub last_updated: String,
}

impl FriendEntry {
    pub fn new(name: &str, repo: &str) -> Self {
        Self {
            name: name.to_string(),
            repo: repo.to_string(),
            last_updated: never_updated(),
        }
    }
}

/// Persisted settings. Field names match the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub save_dir: String,
    #[serde(default)]
    pub github_token: String,
    /// `owner/name`
    #[serde(default)]
    pub github_repo: String,
    #[serde(default)]
    pub friends: Vec<FriendEntry>,
    /// Empty when not configured
    #[serde(default)]
    pub shared_folder: String,
    /// Keys this version doesn't know about, written back untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AppConfig {
    pub fn with_defaults(paths: &PlatformPaths) -> Self {
        AppConfig {
            save_dir: paths.default_save_dir.to_string_lossy().to_string(),
            ..Default::default()
        }
    }

    /// Fill in defaults for keys that were missing or empty on disk.
    pub fn apply_defaults(&mut self, paths: &PlatformPaths) {
        if self.save_dir.trim().is_empty() {
            self.save_dir = paths.default_save_dir.to_string_lossy().to_string();
        }
    }

    pub fn save_dir(&self) -> PathBuf {
        PathBuf::from(&self.save_dir)
    }

    pub fn shared_folder(&self) -> Option<PathBuf> {
        if self.shared_folder.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.shared_folder))
        }
    }

    pub fn remote_configured(&self) -> bool {
        !self.github_token.trim().is_empty() && !self.github_repo.trim().is_empty()
    }

    pub fn repo_web_url(&self) -> Option<String> {
        if self.github_repo.trim().is_empty() {
            return None;
        }
        Some(format!("https://github.com/{}", self.github_repo.trim()))
    }
}

/// Settings that can be changed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SettingKey {
    SaveDir,
    SharedFolder,
    GithubToken,
    GithubRepo,
}
