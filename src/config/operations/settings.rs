use crate::config::types::{AppConfig, SettingKey};
use crate::error::SyncError;

/// Apply one settings change. `github-repo` must look like `owner/name`.
pub fn set_value(config: &mut AppConfig, key: SettingKey, value: &str) -> Result<(), SyncError> {
    let value = value.trim();
    match key {
        SettingKey::SaveDir => config.save_dir = value.to_string(),
        SettingKey::SharedFolder => config.shared_folder = value.to_string(),
        SettingKey::GithubToken => config.github_token = value.to_string(),
        SettingKey::GithubRepo => {
            if !value.is_empty() && !is_full_repo_name(value) {
                return Err(SyncError::InvalidName(value.to_string()));
            }
            config.github_repo = value.to_string();
        }
    }
    Ok(())
}

fn is_full_repo_name(value: &str) -> bool {
    match value.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}
