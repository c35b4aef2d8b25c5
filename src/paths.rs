// Platform locations, detected once at startup and passed around explicitly.

use crate::error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

/// Steam app ID of Schedule I.
pub const SCHEDULE_I_APPID: u32 = 3164500;

/// Save folder relative to the Windows user profile.
const SAVES_REL: &str = "AppData/LocalLow/TVGS/Schedule I/Saves";

const CONFIG_DIR_NAME: &str = "ScheduleISync";
const SCRATCH_DIR_NAME: &str = "ScheduleISyncTemp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPaths {
    pub home: PathBuf,
    pub config_dir: PathBuf,
    pub default_save_dir: PathBuf,
}

impl PlatformPaths {
    /// Read the environment once. `config_dir_override` wins over the platform default.
    pub fn detect(config_dir_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let home = home_dir().ok_or(ConfigError::HomeNotFound)?;

        let config_dir = match config_dir_override {
            Some(dir) => dir,
            None => default_config_dir(&home),
        };

        let default_save_dir = default_save_dir(&home);

        tracing::debug!(
            home = %home.display(),
            config_dir = %config_dir.display(),
            save_dir = %default_save_dir.display(),
            "platform paths detected"
        );

        Ok(Self {
            home,
            config_dir,
            default_save_dir,
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.config_dir.join("backups")
    }

    /// Working copy used to stage pushes to the remote repository.
    pub fn scratch_dir(&self) -> PathBuf {
        self.home.join(SCRATCH_DIR_NAME)
    }

    /// Clone location used when fetching a friend's repository.
    pub fn friend_scratch_dir(&self) -> PathBuf {
        self.home.join(format!("{}_friend", SCRATCH_DIR_NAME))
    }
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn default_config_dir(home: &Path) -> PathBuf {
    if cfg!(windows) {
        if let Some(appdata) = env::var_os("APPDATA").filter(|v| !v.is_empty()) {
            return PathBuf::from(appdata).join(CONFIG_DIR_NAME);
        }
        return home.join("AppData/Roaming").join(CONFIG_DIR_NAME);
    }

    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(CONFIG_DIR_NAME);
    }
    home.join(".config").join(CONFIG_DIR_NAME)
}

fn default_save_dir(home: &Path) -> PathBuf {
    if cfg!(windows) {
        return home.join(SAVES_REL);
    }

    // The game only ships for Windows; on Linux it runs in a Proton prefix
    // inside whichever Steam library it is installed in.
    let library = locate_game_library().unwrap_or_else(|| fallback_steam_root(home));
    proton_save_dir(&library)
}

fn locate_game_library() -> Option<PathBuf> {
    let steam_dir = steamlocate::SteamDir::locate().ok()?;
    match steam_dir.find_app(SCHEDULE_I_APPID) {
        Ok(Some((_app, library))) => Some(library.path().to_path_buf()),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, "steam library lookup failed");
            None
        }
    }
}

fn fallback_steam_root(home: &Path) -> PathBuf {
    let candidates = [
        home.join(".local/share/Steam"),
        home.join(".steam/steam"),
        home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"),
    ];
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .unwrap_or_else(|| home.join(".local/share/Steam"))
}

/// Save folder of the game inside the Proton prefix of a Steam library.
pub fn proton_save_dir(library: &Path) -> PathBuf {
    library
        .join("steamapps/compatdata")
        .join(SCHEDULE_I_APPID.to_string())
        .join("pfx/drive_c/users/steamuser")
        .join(SAVES_REL)
}
