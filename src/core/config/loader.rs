use std::fs;
use std::str::FromStr;

use log::{debug, warn};

use super::{ConfigError, ConfigPaths, Settings, StartDir};

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_into(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        let path = &self.paths.rc_path;
        if !path.exists() {
            if self.paths.required {
                return Err(ConfigError::ConfigFileNotFound(path.display().to_string()));
            }
            debug!("no rc file at {}", path.display());
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line, settings)?;
        }
        debug!("loaded {}: {:?}", path.display(), settings);
        Ok(())
    }

    fn process_line(&self, number: usize, line: &str, settings: &mut Settings) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!("rc line {}: expected key = value, got {:?}", number, line);
            return Ok(());
        };
        let key = key.trim();
        let mut value = value.trim();

        // Remove quotes if present
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = &value[1..value.len() - 1];
        }

        let invalid = || ConfigError::InvalidValue {
            line: number,
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "chunk_size" => {
                settings.chunk_size = parse(value).filter(|n| *n > 0).ok_or_else(invalid)?;
            }
            "compression_quality" => {
                settings.compression_quality = parse(value).filter(|q| *q <= 11).ok_or_else(invalid)?;
            }
            "start_dir" => {
                settings.start_dir = match value {
                    "cwd" => StartDir::Cwd,
                    "home" => StartDir::Home,
                    _ => return Err(invalid()),
                };
            }
            "history_size" => {
                settings.history_size = parse(value).ok_or_else(invalid)?;
            }
            "color" => {
                settings.color = parse(value).ok_or_else(invalid)?;
            }
            _ => warn!("rc line {}: unknown key {:?}", number, key),
        }
        Ok(())
    }
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}
