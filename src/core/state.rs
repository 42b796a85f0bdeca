use std::path::{Path, PathBuf};

use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// The one piece of mutable state the file manager has: who the user is and
/// which directory they are "in".
///
/// The current directory is virtual. It is never pushed into the process
/// working directory, and only `cd` and `up` move it.
#[derive(Debug)]
pub struct Session {
    current_dir: PathBuf,
    username: String,
    state: SessionState,
}

impl Session {
    pub fn new(username: impl Into<String>, start_dir: impl Into<PathBuf>) -> Result<Self, ShellError> {
        let username = username.into();
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(ShellError::InvalidUsername(username));
        }

        let start_dir = start_dir.into();
        if !start_dir.is_absolute() || !start_dir.is_dir() {
            return Err(ShellError::InvalidStartDir(start_dir.display().to_string()));
        }

        Ok(Self {
            current_dir: start_dir,
            username,
            state: SessionState::Running,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub(crate) fn change_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Moves to [`SessionState::Terminated`]. Returns `true` only for the
    /// call that actually ended the session, so the farewell prints once.
    pub fn terminate(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = SessionState::Terminated;
        was_running
    }

    pub fn greeting(&self) -> String {
        format!("Welcome to the File Manager, {}!", self.username)
    }

    pub fn location(&self) -> String {
        format!("You are currently in {}", self.current_dir.display())
    }

    pub fn farewell(&self) -> String {
        format!("Thank you for using File Manager, {}, goodbye!", self.username)
    }
}
