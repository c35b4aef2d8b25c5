pub mod operations;
pub mod types;

// Re-export types
pub use types::{AppConfig, FriendEntry, SettingKey, NEVER_UPDATED};

// Re-export operations
pub use operations::{
    ConfigStore, add_friend, find_friend, mark_friend_updated, remove_friend, set_value,
};
