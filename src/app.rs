// Application actions: one method per user-facing operation.
//
// `App` owns the config, its store, the platform paths and the prompter.
// Every mutation of the config is flushed right away. Errors stop at `run`,
// which shows each one as a single notification.

use crate::backup::{create_backup, list_backups};
use crate::cli::{Command, ConfigCommand, DownloadArgs, FriendCommand};
use crate::config::{AppConfig, ConfigStore, SettingKey, add_friend, remove_friend, set_value};
use crate::error::SyncError;
use crate::paths::PlatformPaths;
use crate::prompt::{NoticeLevel, Prompter};
use crate::remote::{GitCli, GithubClient, fetch_friend_save, push_saves};
use crate::save_sync::{
    DownloadMode, download_from_shared, download_interactive, sync_to_shared, sync_user_folder,
    visible_entries,
};
use crate::selection::Choice;
use crate::util::{list_subdirectories, list_subdirectories_if_exists};

use chrono::NaiveDateTime;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Finished; anything worth saying was already shown.
    Done,
    /// Text for stdout.
    Listing(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Done | Outcome::Cancelled => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct App {
    paths: PlatformPaths,
    store: ConfigStore,
    config: AppConfig,
    prompter: Box<dyn Prompter>,
    clock: fn() -> NaiveDateTime,
}

impl App {
    /// Load the config. If it can't be read or created the user is told and
    /// defaults are used for this run.
    pub fn new(paths: PlatformPaths, mut prompter: Box<dyn Prompter>) -> Self {
        let store = ConfigStore::new(paths.config_file());
        let config = match store.load(&paths) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "failed to load config");
                prompter.notify(
                    NoticeLevel::Error,
                    "Error",
                    &format!("Failed to load config: {}", e),
                );
                AppConfig::with_defaults(&paths)
            }
        };

        Self {
            paths,
            store,
            config,
            prompter,
            clock: local_now,
        }
    }

    /// Run one command and surface its error, if any, as one notification.
    pub fn run(&mut self, command: Command) -> Outcome {
        match self.execute(command) {
            Ok(Reply::Done) => Outcome::Done,
            Ok(Reply::Listing(text)) => {
                print!("{}", text);
                Outcome::Done
            }
            Ok(Reply::Cancelled) => {
                tracing::debug!("cancelled by user");
                Outcome::Cancelled
            }
            Err(e) => {
                self.report_error(&e);
                Outcome::Failed
            }
        }
    }

    fn report_error(&mut self, err: &SyncError) {
        tracing::error!(error = %err, "operation failed");
        self.prompter
            .notify(NoticeLevel::Error, err.title(), &err.to_string());
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, SyncError> {
        match command {
            Command::Sync { user } => self.sync(user.as_deref()),
            Command::Download(args) => self.download(&args),
            Command::Backup { list: false } => self.backup(),
            Command::Backup { list: true } => self.backup_listing(),
            Command::Push => self.push(),
            Command::Saves => self.saves_listing(),
            Command::Friend(FriendCommand::Add { name, repo }) => self.add_friend(&name, &repo),
            Command::Friend(FriendCommand::Remove { name, yes }) => self.remove_friend(&name, yes),
            Command::Friend(FriendCommand::List) => Ok(Reply::Listing(self.friends_listing())),
            Command::Friend(FriendCommand::Fetch { name }) => self.fetch_friend(&name),
            Command::Config(ConfigCommand::Show) => Ok(Reply::Listing(self.config_listing())),
            Command::Config(ConfigCommand::Set { key, value }) => self.set_setting(key, &value),
        }
    }

    fn save_config(&self) -> Result<(), SyncError> {
        self.store.save(&self.config)?;
        Ok(())
    }

    fn info(&mut self, title: &str, message: &str) {
        self.prompter.notify(NoticeLevel::Info, title, message);
    }

    // ── shared folder ───────────────────────────────────────────

    /// The configured shared folder, or ask for one and remember it.
    fn shared_folder_or_ask(&mut self) -> Result<Choice<PathBuf>, SyncError> {
        if let Some(dir) = self.config.shared_folder() {
            return Ok(Choice::Selected(dir));
        }

        let dir = match self
            .prompter
            .pick_directory("Select Shared Folder (e.g. Dropbox, Google Drive)")
        {
            Choice::Selected(dir) => dir,
            Choice::Cancelled => return Ok(Choice::Cancelled),
        };

        self.config.shared_folder = dir.to_string_lossy().to_string();
        self.save_config()?;
        tracing::info!(shared_folder = %dir.display(), "shared folder configured");
        self.info(
            "Setup",
            &format!(
                "Shared folder set to:\n{}\n\nYou can share this folder with friends using Dropbox, Google Drive, etc.",
                dir.display()
            ),
        );
        Ok(Choice::Selected(dir))
    }

    fn sync(&mut self, user: Option<&str>) -> Result<Reply, SyncError> {
        let shared = match self.shared_folder_or_ask()? {
            Choice::Selected(dir) => dir,
            Choice::Cancelled => return Ok(Reply::Cancelled),
        };

        let now = (self.clock)();
        let save_root = self.config.save_dir();
        let synced = match user {
            Some(user) => Choice::Selected(sync_user_folder(&save_root, &shared, user, now)?),
            None => sync_to_shared(&save_root, &shared, self.prompter.as_mut(), now)?,
        };
        match synced {
            Choice::Selected(report) => {
                self.info(
                    "Success",
                    &format!(
                        "Save files for user {} successfully synced to shared folder!",
                        report.user_folder
                    ),
                );
                Ok(Reply::Done)
            }
            Choice::Cancelled => Ok(Reply::Cancelled),
        }
    }

    fn download(&mut self, args: &DownloadArgs) -> Result<Reply, SyncError> {
        let shared = self
            .config
            .shared_folder()
            .ok_or(SyncError::SharedFolderNotConfigured)?;

        let now = (self.clock)();
        let save_root = self.config.save_dir();
        let backups = self.paths.backups_dir();
        let downloaded = match args.target() {
            Some((friend, user, slot)) => {
                let mode = match &args.replace {
                    Some(target) => DownloadMode::Replace(target.clone()),
                    None => DownloadMode::NewSlot,
                };
                Choice::Selected(download_from_shared(&save_root, &shared, friend, user, slot, &mode)?)
            }
            None => download_interactive(&save_root, &shared, &backups, self.prompter.as_mut(), now)?,
        };
        match downloaded {
            Choice::Selected(report) => {
                self.info("Success", &report.summary());
                Ok(Reply::Done)
            }
            Choice::Cancelled => Ok(Reply::Cancelled),
        }
    }

    // ── backups ─────────────────────────────────────────────────

    fn backup(&mut self) -> Result<Reply, SyncError> {
        let path = create_backup(&self.config.save_dir(), &self.paths.backups_dir(), (self.clock)())?;
        self.info(
            "Backup",
            &format!("Backup created successfully at:\n{}", path.display()),
        );
        Ok(Reply::Done)
    }

    fn backup_listing(&self) -> Result<Reply, SyncError> {
        let backups_dir = self.paths.backups_dir();
        let names = list_backups(&backups_dir)?;
        if names.is_empty() {
            return Ok(Reply::Listing("No backups yet.\n".to_string()));
        }

        let mut out = String::new();
        for name in names {
            let _ = writeln!(out, "{}", backups_dir.join(name).display());
        }
        Ok(Reply::Listing(out))
    }

    fn saves_listing(&self) -> Result<Reply, SyncError> {
        let save_root = self.config.save_dir();
        if !save_root.exists() {
            return Err(SyncError::SaveRootMissing(save_root));
        }
        let users = visible_entries(list_subdirectories(&save_root)?);
        if users.is_empty() {
            return Err(SyncError::NoUserFolders);
        }

        let mut out = String::new();
        for user in users {
            let _ = writeln!(out, "{}", user);
            let slots = visible_entries(list_subdirectories_if_exists(&save_root.join(&user))?);
            if slots.is_empty() {
                let _ = writeln!(out, "  (no save games)");
            }
            for slot in slots {
                let _ = writeln!(out, "  {}", slot);
            }
        }
        Ok(Reply::Listing(out))
    }

    // ── remote ──────────────────────────────────────────────────

    fn push(&mut self) -> Result<Reply, SyncError> {
        if !self.config.remote_configured() {
            return Err(SyncError::RemoteNotConfigured);
        }
        let token = self.config.github_token.clone();
        let host = GithubClient::new(&token)?;
        let git = GitCli::new(Some(&token));

        let report = push_saves(
            &mut self.config,
            &self.store,
            &host,
            &git,
            &self.paths.scratch_dir(),
            (self.clock)(),
        )?;

        let message = if report.committed {
            format!(
                "Saves pushed to {}\n{}",
                report.repository, report.html_url
            )
        } else {
            format!("{} is already up to date.\n{}", report.repository, report.html_url)
        };
        self.info("Success", &message);
        Ok(Reply::Done)
    }

    fn fetch_friend(&mut self, name: &str) -> Result<Reply, SyncError> {
        let token = self.config.github_token.clone();
        let git = GitCli::new(Some(&token));
        let now = (self.clock)();

        let choice = fetch_friend_save(
            &mut self.config,
            &self.store,
            &git,
            name,
            &self.paths.friend_scratch_dir(),
            &self.paths.backups_dir(),
            self.prompter.as_mut(),
            now,
        )?;

        match choice {
            Choice::Selected(report) => {
                self.info("Success", &report.summary());
                Ok(Reply::Done)
            }
            Choice::Cancelled => Ok(Reply::Cancelled),
        }
    }

    // ── friends ─────────────────────────────────────────────────

    fn add_friend(&mut self, name: &str, repo: &str) -> Result<Reply, SyncError> {
        add_friend(&mut self.config, name, repo)?;
        self.save_config()?;
        self.info("Friends", &format!("Added {} ({})", name.trim(), repo.trim()));
        Ok(Reply::Done)
    }

    fn remove_friend(&mut self, name: &str, skip_confirm: bool) -> Result<Reply, SyncError> {
        if !skip_confirm
            && !self.prompter.confirm(
                "Remove Friend",
                &format!("Remove {} from your friends list?", name),
            )
        {
            return Ok(Reply::Cancelled);
        }

        remove_friend(&mut self.config, name)?;
        self.save_config()?;
        self.info("Friends", &format!("Removed {}", name));
        Ok(Reply::Done)
    }

    fn friends_listing(&self) -> String {
        if self.config.friends.is_empty() {
            return "No friends added yet.\n".to_string();
        }

        let name_w = self
            .config
            .friends
            .iter()
            .map(|f| f.name.len())
            .max()
            .unwrap_or(0)
            .max("NAME".len());
        let repo_w = self
            .config
            .friends
            .iter()
            .map(|f| f.repo.len())
            .max()
            .unwrap_or(0)
            .max("REPOSITORY".len());

        let mut out = String::new();
        let _ = writeln!(out, "{:<name_w$}  {:<repo_w$}  LAST UPDATED", "NAME", "REPOSITORY");
        for f in &self.config.friends {
            let _ = writeln!(out, "{:<name_w$}  {:<repo_w$}  {}", f.name, f.repo, f.last_updated);
        }
        out
    }

    // ── settings ────────────────────────────────────────────────

    fn config_listing(&self) -> String {
        let c = &self.config;
        let or_unset = |v: &str| {
            if v.trim().is_empty() {
                "(not set)".to_string()
            } else {
                v.to_string()
            }
        };
        let token = if c.github_token.trim().is_empty() {
            "(not set)"
        } else {
            "(set)"
        };
        let repo = match c.repo_web_url() {
            Some(url) => format!("{} ({})", c.github_repo, url),
            None => "(not set)".to_string(),
        };

        let mut out = String::new();
        let _ = writeln!(out, "config file:   {}", self.store.path().display());
        let _ = writeln!(out, "save-dir:      {}", or_unset(&c.save_dir));
        let _ = writeln!(out, "shared-folder: {}", or_unset(&c.shared_folder));
        let _ = writeln!(out, "github-token:  {}", token);
        let _ = writeln!(out, "github-repo:   {}", repo);
        let _ = writeln!(out, "friends:       {}", c.friends.len());
        let _ = writeln!(out, "backups:       {}", self.paths.backups_dir().display());
        out
    }

    fn set_setting(&mut self, key: SettingKey, value: &str) -> Result<Reply, SyncError> {
        set_value(&mut self.config, key, value)?;
        self.config.apply_defaults(&self.paths);
        self.save_config()?;
        tracing::info!(?key, "setting changed");
        self.info("Settings", "Settings saved successfully!");
        Ok(Reply::Done)
    }
}
