use thiserror::Error;

use crate::core::config::ConfigError;

/// Errors that stop the file manager from starting or keep it from running.
///
/// Failures of individual commands never surface here; they are reported to
/// the user as [`crate::core::commands::CommandError`] and the loop goes on.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("missing required argument --username=<name>")]
    MissingUsername,
    #[error("invalid username: {0:?}")]
    InvalidUsername(String),
    #[error("Start directory is not usable: {0}")]
    InvalidStartDir(String),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Flag error: {0}")]
    FlagError(String),
    #[error("Ctrl-C error: {0}")]
    CtrlC(String),
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::CtrlC(err.to_string())
    }
}
