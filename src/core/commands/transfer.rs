use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::CommandError;
use crate::core::config::Settings;
use crate::path::check_access;
use crate::stream::{Completion, Pipeline, Sink, Transform};

/// Fails unless `path` passes the access probe and is a regular file.
pub(crate) async fn accessible_file(path: &Path) -> io::Result<()> {
    check_access(path)?;
    let metadata = fs::metadata(path).await?;
    if metadata.is_file() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ))
    }
}

/// A resolved source/destination pair for file-to-file streaming commands.
pub(crate) struct Transfer {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Transfer {
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Streaming a file onto itself would truncate it before the first read.
    ///
    /// Besides equal paths this catches a destination that is a symlink or
    /// hard link to the source, by comparing device and inode.
    pub async fn is_in_place(&self) -> io::Result<bool> {
        if self.source == self.destination {
            return Ok(true);
        }
        let destination = match fs::metadata(&self.destination).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        let source = fs::metadata(&self.source).await?;
        Ok(source.dev() == destination.dev() && source.ino() == destination.ino())
    }

    pub async fn check_source(&self) -> io::Result<()> {
        accessible_file(&self.source).await
    }

    pub async fn stream(
        &self,
        settings: &Settings,
        transform: Transform,
    ) -> Result<Completion, CommandError> {
        let completion = Pipeline::new(&self.source, Sink::File(self.destination.clone()))
            .transform(transform)
            .chunk_size(settings.chunk_size)
            .run()
            .await?;
        Ok(completion)
    }
}
