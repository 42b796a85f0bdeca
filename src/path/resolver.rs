use std::path::{Component, Path, PathBuf};

/// Turns user supplied path tokens into absolute paths.
///
/// Relative tokens are joined onto the session's current directory, never
/// onto the process working directory. Resolution is purely lexical: nothing
/// on disk is consulted, so the result may name an entry that does not exist.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver;

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn is_absolute(&self, token: &str) -> bool {
        token.starts_with('/')
    }

    pub fn resolve(&self, token: &str, current_dir: &Path) -> PathBuf {
        if self.is_absolute(token) {
            normalize(Path::new(token))
        } else {
            normalize(&current_dir.join(token))
        }
    }
}

/// Collapses `.` and `..` segments. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir => {
                normalized.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    normalized
}
