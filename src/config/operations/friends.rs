// Friends list maintenance. Callers persist the config after each change.

use crate::config::types::{AppConfig, FriendEntry};
use crate::error::SyncError;

pub fn add_friend(config: &mut AppConfig, name: &str, repo: &str) -> Result<(), SyncError> {
    let name = name.trim();
    let repo = repo.trim();

    if name.is_empty() || repo.is_empty() {
        return Err(SyncError::Friend(
            "Both repository URL and friend name are required".to_string(),
        ));
    }
    if find_friend(config, name).is_some() {
        return Err(SyncError::Friend(format!("A friend named {} already exists", name)));
    }

    config.friends.push(FriendEntry::new(name, repo));
    tracing::info!(friend = name, repo, "friend added");
    Ok(())
}

pub fn remove_friend(config: &mut AppConfig, name: &str) -> Result<FriendEntry, SyncError> {
    let idx = config
        .friends
        .iter()
        .position(|f| f.name == name)
        .ok_or_else(|| SyncError::Friend(format!("No friend named {}", name)))?;

    let removed = config.friends.remove(idx);
    tracing::info!(friend = name, "friend removed");
    Ok(removed)
}

pub fn find_friend<'a>(config: &'a AppConfig, name: &str) -> Option<&'a FriendEntry> {
    config.friends.iter().find(|f| f.name == name)
}

/// Record a successful fetch from the friend's repository.
pub fn mark_friend_updated(config: &mut AppConfig, name: &str, when: &str) -> Result<(), SyncError> {
    let friend = config
        .friends
        .iter_mut()
        .find(|f| f.name == name)
        .ok_or_else(|| SyncError::Friend(format!("No friend named {}", name)))?;
    friend.last_updated = when.to_string();
    Ok(())
}
