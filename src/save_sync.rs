// Save game synchronization with a shared folder
//
// Layout of the shared folder (interop with other installations):
//   <shared>/MySaves/<user folder>/<save slot>/...   our own saves
//   <shared>/MySaves/<user folder>/sync_info.txt     who synced, and when
//   <shared>/<friend>/<user folder>/<save slot>/...  saves friends dropped in
//
// Syncing replaces our folder in the shared location wholesale. Downloading
// copies one friend slot into the local save root, either over an existing
// slot or into the next free SaveGame_<N>.

mod operations;
mod pipelines;
mod pure;
mod types;

pub use pipelines::{
    download_from_friend_dir, download_from_shared, download_interactive, sync_to_shared,
    sync_user_folder,
};
pub use pure::visible_entries;
pub use types::{DownloadMode, DownloadReport};
