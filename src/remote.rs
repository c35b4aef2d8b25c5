// Mirroring the save root to a hosted git repository (GitHub), and fetching
// a friend's repository for download.
//
// Repository layout: one directory per user folder at the root, no sidecar.
// The hosting API and git itself sit behind `RepoHost` / `GitClient` so the
// pipelines can run against fakes.

mod git;
mod github;
mod operations;
mod pipelines;
mod pure;
mod types;

pub use git::GitCli;
pub use github::GithubClient;
pub use pipelines::{fetch_friend_save, push_saves};
pub use types::{GitClient, PushReport, RepoHost};
