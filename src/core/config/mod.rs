use std::path::{Path, PathBuf};

use thiserror::Error;

mod loader;
mod paths;

use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::stream::DEFAULT_CHUNK_SIZE;

/// Where the session starts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDir {
    Cwd,
    Home,
}

/// Tunables read from the rc file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub chunk_size: usize,
    pub compression_quality: u32,
    pub start_dir: StartDir,
    pub history_size: usize,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression_quality: 11,
            start_dir: StartDir::Cwd,
            history_size: 1000,
            color: true,
        }
    }
}

pub struct Config {
    paths: ConfigPaths,
    settings: Settings,
}

impl Config {
    /// Uses the default rc file in the home directory.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_paths(ConfigPaths::new()?))
    }

    /// Uses an explicitly requested rc file, which then has to exist.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_paths(ConfigPaths::explicit(path))
    }

    fn with_paths(paths: ConfigPaths) -> Self {
        Config {
            paths,
            settings: Settings::default(),
        }
    }

    pub fn load(&mut self) -> Result<(), ConfigError> {
        let loader = ConfigLoader::new(&self.paths);
        loader.load_into(&mut self.settings)
    }

    pub fn rc_path(&self) -> &Path {
        &self.paths.rc_path
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config file not found: {0}")]
    ConfigFileNotFound(String),
    #[error("line {line}: invalid value {value:?} for {key}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
