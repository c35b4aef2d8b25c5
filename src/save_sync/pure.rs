// Pure functions for save synchronization
// No side effects - only computation and path manipulation

use crate::util::DISPLAY_TIME_FORMAT;

use chrono::NaiveDateTime;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Our own participant folder inside the shared folder.
pub const MY_SAVES_DIR: &str = "MySaves";

pub const SYNC_INFO_FILE: &str = "sync_info.txt";

const SLOT_PREFIX: &str = "SaveGame_";

/// `SaveGame_<N>`, optionally followed by `_<anything>`
static SLOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SaveGame_(\d+)(?:_.*)?$").expect("slot regex is valid"));

/// `<shared>/MySaves/<user folder>`
pub fn shared_user_dir(shared_root: &Path, user_folder: &str) -> PathBuf {
    shared_root.join(MY_SAVES_DIR).join(user_folder)
}

pub fn sync_info_contents(user_folder: &str, now: NaiveDateTime) -> String {
    format!(
        "Last synced: {}\nUser: {}\n",
        now.format(DISPLAY_TIME_FORMAT),
        user_folder
    )
}

/// Slot number of a `SaveGame_<N>` name. Anything else is `None`.
pub fn slot_number(name: &str) -> Option<u64> {
    SLOT_REGEX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Next unused slot name: one past the highest `SaveGame_<N>`, or `SaveGame_1`.
/// `None` once the highest number can't be incremented.
pub fn next_slot_name<S: AsRef<str>>(existing: &[S]) -> Option<String> {
    let next = match existing.iter().filter_map(|name| slot_number(name.as_ref())).max() {
        Some(max) => max.checked_add(1)?,
        None => 1,
    };
    Some(format!("{}{}", SLOT_PREFIX, next))
}

/// Drop hidden entries (`.git`, `.dropbox.cache`, ...) from a listing.
pub fn visible_entries(names: Vec<String>) -> Vec<String> {
    names.into_iter().filter(|n| !n.starts_with('.')).collect()
}

/// Participant folders in the shared root, minus our own.
pub fn friend_candidates(names: Vec<String>) -> Vec<String> {
    visible_entries(names)
        .into_iter()
        .filter(|n| n != MY_SAVES_DIR)
        .collect()
}
