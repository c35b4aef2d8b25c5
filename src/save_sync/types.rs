use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Where a downloaded slot goes in the local user folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadMode {
    /// Delete this existing slot and put the download in its place.
    Replace(String),
    /// Copy into the next unused `SaveGame_<N>`.
    NewSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub user_folder: String,
    /// `<shared>/MySaves/<user folder>`
    pub target: PathBuf,
    pub synced_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub friend: String,
    pub source_slot: String,
    pub slot_name: String,
    pub path: PathBuf,
    pub replaced: bool,
}

impl DownloadReport {
    pub fn summary(&self) -> String {
        if self.replaced {
            format!(
                "Successfully replaced save {} with {}'s save: {}",
                self.slot_name, self.friend, self.source_slot
            )
        } else {
            format!(
                "Successfully downloaded {}'s save as a new save slot: {}",
                self.friend, self.slot_name
            )
        }
    }
}
