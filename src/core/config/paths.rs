use super::ConfigError;
use std::path::PathBuf;

const RC_FILE_NAME: &str = ".filemanrc";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    /// Set when the path came from `--config`; a missing file is then an error.
    pub required: bool,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home_path = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            rc_path: home_path.join(RC_FILE_NAME),
            required: false,
        })
    }

    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: path.into(),
            required: true,
        }
    }
}
