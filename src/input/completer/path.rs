use std::fs;
use std::path::{Path, PathBuf};

use rustyline::completion::Pair;

use crate::path::PathResolver;

/// Completes path arguments against the session's current directory.
#[derive(Clone)]
pub struct PathCompleter {
    current_dir: PathBuf,
    resolver: PathResolver,
}

impl PathCompleter {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
            resolver: PathResolver::new(),
        }
    }

    pub fn set_current_dir(&mut self, dir: &Path) {
        self.current_dir = dir.to_path_buf();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        // Split "dir/part" into the text to keep and the name prefix to match.
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(idx) => incomplete.split_at(idx + 1),
            None => ("", incomplete),
        };
        let dir_to_search = self.resolver.resolve(typed_dir, &self.current_dir);

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if !name.starts_with(file_prefix) {
                    continue;
                }
                matches.push(self.create_completion_pair(typed_dir, &name, &entry.path()));
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn create_completion_pair(&self, typed_dir: &str, name: &str, path: &Path) -> Pair {
        let full = format!("{}{}", typed_dir, name);
        if path.is_dir() {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}/", full),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{} ", full),
            }
        }
    }
}
