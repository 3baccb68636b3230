use std::{
    fs::{self, File, OpenOptions},
    io::{Error, Read, Write},
    path::PathBuf,
};

use serde::{Deserialize, Serialize};
use serde_json::to_string_pretty;
use thiserror::Error;

use crate::music_storage::playlist::{MAX_SIZE, MAX_TIME};

/// Budgets handed to every newly created playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPlaylist {
    /// Seconds
    pub max_time: u64,
    /// Kilobytes
    pub max_size: u64,
}

impl Default for ConfigPlaylist {
    fn default() -> Self {
        ConfigPlaylist {
            max_time: MAX_TIME,
            max_size: MAX_SIZE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub path: PathBuf,
    /// Folder searched for song database files
    pub database_folder: PathBuf,
    pub playlist: ConfigPlaylist,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            path: PathBuf::from("config.json"),
            database_folder: PathBuf::from("."),
            playlist: ConfigPlaylist::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    pub fn write_file(&self) -> Result<(), Error> {
        let mut writer = self.path.clone();
        writer.set_extension("tmp");
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&writer)?;
        let config = to_string_pretty(self)?;

        file.write_all(config.as_bytes())?;
        fs::rename(writer, self.path.as_path())?;
        Ok(())
    }

    pub fn read_file(path: PathBuf) -> Result<Self, Error> {
        let mut file: File = File::open(&path)?;
        let mut buf: String = String::new();
        file.read_to_string(&mut buf)?;
        let mut config: Config = serde_json::from_str::<Config>(&buf)?;
        config.path = path;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playlist.max_time == 0 {
            return Err(ConfigError::ZeroBudget("max_time"));
        }
        if self.playlist.max_size == 0 {
            return Err(ConfigError::ZeroBudget("max_size"));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Playlist {0} must be greater than zero")]
    ZeroBudget(&'static str),
}
