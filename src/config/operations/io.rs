use crate::config::types::AppConfig;
use crate::error::ConfigError;
use crate::paths::PlatformPaths;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reads and writes the JSON config record.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable config is moved.
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Load the config, creating the file with defaults if it doesn't exist.
    /// A file that can't be parsed is moved to `config.json.bak` and defaults
    /// are used, so a later save can't overwrite it.
    pub fn load(&self, paths: &PlatformPaths) -> Result<AppConfig, ConfigError> {
        if !self.path.exists() {
            let config = AppConfig::with_defaults(paths);
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "created default config");
            return Ok(config);
        }

        let file = File::open(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        match serde_json::from_reader::<_, AppConfig>(BufReader::new(file)) {
            Ok(mut config) => {
                config.apply_defaults(paths);
                Ok(config)
            }
            Err(e) => {
                let aside = self.backup_path();
                fs::rename(&self.path, &aside).map_err(|source| ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })?;
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "failed to load config, using defaults"
                );
                Ok(AppConfig::with_defaults(paths))
            }
        }
    }

    /// Write the whole record. Goes through a temp file so a crash never
    /// leaves a half-written config behind.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let file = File::create(&tmp).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, config)?;
        writer.flush().map_err(io_err)?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
