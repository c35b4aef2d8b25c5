//! Command-line interface for s1sync.

use crate::config::SettingKey;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Share Schedule I save games through a shared folder or a GitHub repository.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "s1sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Use desktop dialogs instead of terminal prompts.
    #[arg(long, global = true)]
    pub gui: bool,

    /// Directory holding config.json and backups.
    #[arg(long, global = true, env = "S1SYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Copy your saves into the shared folder (asks for the folder the first time).
    Sync {
        /// User folder to sync. Asked for when there are several.
        #[arg(long)]
        user: Option<String>,
    },
    /// Copy a friend's save from the shared folder into your saves.
    ///
    /// --friend, --user and --slot go together. With them nothing is asked:
    /// the save goes into a new slot, or over the one named by --replace.
    Download(DownloadArgs),
    /// Snapshot your whole save folder.
    Backup {
        /// List existing backups instead of creating one.
        #[arg(long)]
        list: bool,
    },
    /// Push your saves to your GitHub repository.
    Push,
    /// Show your user folders and their save slots.
    Saves,
    /// Manage friends whose saves live in their own GitHub repository.
    #[command(subcommand)]
    Friend(FriendCommand),
    /// Show or change settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadArgs {
    /// Friend folder in the shared folder.
    #[arg(long, requires = "user", requires = "slot")]
    pub friend: Option<String>,
    /// User folder inside the friend's folder.
    #[arg(long, requires = "friend", requires = "slot")]
    pub user: Option<String>,
    /// Save slot to download.
    #[arg(long, requires = "friend", requires = "user")]
    pub slot: Option<String>,
    /// Replace this local save slot instead of creating a new one.
    #[arg(long, requires = "slot")]
    pub replace: Option<String>,
}

impl DownloadArgs {
    /// `(friend, user, slot)` when the download is fully specified.
    pub fn target(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.friend.as_deref()?,
            self.user.as_deref()?,
            self.slot.as_deref()?,
        ))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FriendCommand {
    /// Add a friend.
    Add {
        name: String,
        /// `owner/name` or a full clone URL.
        repo: String,
    },
    /// Remove a friend.
    Remove {
        name: String,
        /// Don't ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// List friends.
    List,
    /// Download a save from a friend's repository.
    Fetch { name: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    /// Print the current settings (the token is never shown).
    Show,
    /// Change one setting. An empty value clears it.
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        value: String,
    },
}

/// Log filter used when RUST_LOG is not set.
pub fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Parse arguments from an iterator (exposed for tests).
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_required() {
        assert!(parse_from(["s1sync"]).is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(
            parse_from(["s1sync", "sync"]).unwrap().command,
            Command::Sync { user: None }
        );
        assert_eq!(
            parse_from(["s1sync", "download"]).unwrap().command,
            Command::Download(DownloadArgs::default())
        );
        assert_eq!(parse_from(["s1sync", "push"]).unwrap().command, Command::Push);
        assert_eq!(parse_from(["s1sync", "saves"]).unwrap().command, Command::Saves);
    }

    #[test]
    fn test_download_target() {
        let cli = parse_from([
            "s1sync", "download", "--friend", "bob", "--user", "7656", "--slot", "SaveGame_2",
        ])
        .unwrap();
        let Command::Download(args) = cli.command else {
            panic!("expected download");
        };
        assert_eq!(args.target(), Some(("bob", "7656", "SaveGame_2")));
        assert_eq!(args.replace, None);

        let cli = parse_from(["s1sync", "download"]).unwrap();
        let Command::Download(args) = cli.command else {
            panic!("expected download");
        };
        assert_eq!(args.target(), None);
    }

    #[test]
    fn test_download_target_is_all_or_nothing() {
        assert!(parse_from(["s1sync", "download", "--friend", "bob"]).is_err());
        assert!(parse_from(["s1sync", "download", "--friend", "bob", "--user", "7656"]).is_err());
        assert!(parse_from(["s1sync", "download", "--user", "7656", "--slot", "SaveGame_1"]).is_err());
        assert!(parse_from(["s1sync", "download", "--slot", "SaveGame_1"]).is_err());
    }

    #[test]
    fn test_download_replace_requires_slot() {
        assert!(parse_from(["s1sync", "download", "--replace", "SaveGame_1"]).is_err());

        let cli = parse_from([
            "s1sync", "download", "--friend", "bob", "--user", "7656", "--slot", "SaveGame_2",
            "--replace", "SaveGame_1",
        ])
        .unwrap();
        let Command::Download(args) = cli.command else {
            panic!("expected download");
        };
        assert_eq!(args.replace.as_deref(), Some("SaveGame_1"));
    }

    #[test]
    fn test_backup_list_flag() {
        let cli = parse_from(["s1sync", "backup"]).unwrap();
        assert_eq!(cli.command, Command::Backup { list: false });
        let cli = parse_from(["s1sync", "backup", "--list"]).unwrap();
        assert_eq!(cli.command, Command::Backup { list: true });
    }

    #[test]
    fn test_friend_subcommands() {
        let cli = parse_from(["s1sync", "friend", "add", "bob", "bob/s1-saves"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Friend(FriendCommand::Add {
                name: "bob".into(),
                repo: "bob/s1-saves".into()
            })
        );

        let cli = parse_from(["s1sync", "friend", "remove", "bob", "-y"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Friend(FriendCommand::Remove {
                name: "bob".into(),
                yes: true
            })
        );

        assert!(parse_from(["s1sync", "friend", "add", "bob"]).is_err());
    }

    #[test]
    fn test_config_set_keys_are_kebab_case() {
        let cli = parse_from(["s1sync", "config", "set", "github-repo", "me/saves"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Config(ConfigCommand::Set {
                key: SettingKey::GithubRepo,
                value: "me/saves".into()
            })
        );
        assert!(parse_from(["s1sync", "config", "set", "github_repo", "x"]).is_err());
    }

    #[test]
    fn test_config_set_accepts_empty_value() {
        let cli = parse_from(["s1sync", "config", "set", "shared-folder", ""]).unwrap();
        assert_eq!(
            cli.command,
            Command::Config(ConfigCommand::Set {
                key: SettingKey::SharedFolder,
                value: String::new()
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse_from(["s1sync", "saves", "--gui", "-vv", "--config-dir", "/tmp/s1"]).unwrap();
        assert!(cli.gui);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/s1")));
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(default_log_filter(0), "warn");
        assert_eq!(default_log_filter(1), "info");
        assert_eq!(default_log_filter(5), "debug");
    }
}
