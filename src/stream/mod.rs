//! Chunked source-to-sink byte pipeline.
//!
//! A [`Pipeline`] reads a file chunk by chunk, optionally passes every chunk
//! through a [`Transform`] and forwards the result to a [`Sink`]. Each run
//! ends in exactly one `Ok(Completion)` or `Err(PipelineError)`, including
//! for empty sources. A failed run leaves whatever was already written to a
//! destination file in place.

use std::io;
use std::path::PathBuf;

use async_compression::tokio::write::{BrotliDecoder, BrotliEncoder};
use async_compression::Level;
use log::debug;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot open source {path}: {source}")]
    OpenSource { path: PathBuf, source: io::Error },
    #[error("cannot open destination {path}: {source}")]
    OpenSink { path: PathBuf, source: io::Error },
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
    #[error("could not finish stream: {0}")]
    Finish(#[source] io::Error),
}

/// What happens to each chunk between source and sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// Forward chunks unchanged while feeding them into a SHA-256 digest.
    Sha256,
    BrotliCompress { quality: u32 },
    BrotliDecompress,
}

/// Where transformed chunks end up.
pub enum Sink<'a> {
    /// An already open writer, typically the console.
    Writer(&'a mut (dyn AsyncWrite + Unpin)),
    /// A file that is created or truncated before the first chunk.
    File(PathBuf),
    Discard,
}

/// Successful outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub bytes_read: u64,
    /// Lowercase hex SHA-256, present only for [`Transform::Sha256`].
    pub digest: Option<String>,
}

pub struct Pipeline<'a> {
    source: PathBuf,
    sink: Sink<'a>,
    transform: Transform,
    chunk_size: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: impl Into<PathBuf>, sink: Sink<'a>) -> Self {
        Self {
            source: source.into(),
            sink,
            transform: Transform::Identity,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub async fn run(self) -> Result<Completion, PipelineError> {
        let mut reader = File::open(&self.source)
            .await
            .map_err(|source| PipelineError::OpenSource {
                path: self.source.clone(),
                source,
            })?;

        let sink: Box<dyn AsyncWrite + Unpin + 'a> = match self.sink {
            Sink::Writer(writer) => Box::new(writer),
            Sink::File(path) => {
                let file = File::create(&path)
                    .await
                    .map_err(|source| PipelineError::OpenSink { path, source })?;
                Box::new(file)
            }
            Sink::Discard => Box::new(tokio::io::sink()),
        };

        let mut writer: Box<dyn AsyncWrite + Unpin + 'a> = match self.transform {
            Transform::BrotliCompress { quality } => Box::new(BrotliEncoder::with_quality(
                sink,
                Level::Precise(quality as i32),
            )),
            Transform::BrotliDecompress => Box::new(BrotliDecoder::new(sink)),
            Transform::Identity | Transform::Sha256 => sink,
        };

        let mut hasher = (self.transform == Transform::Sha256).then(Sha256::new);
        let mut buf = vec![0u8; self.chunk_size];
        let mut bytes_read = 0u64;

        loop {
            let n = reader.read(&mut buf).await.map_err(PipelineError::Read)?;
            if n == 0 {
                break;
            }
            let chunk = &buf[..n];
            if let Some(hasher) = hasher.as_mut() {
                hasher.update(chunk);
            }
            writer.write_all(chunk).await.map_err(PipelineError::Write)?;
            bytes_read += n as u64;
        }

        // Finalizes codec framing and flushes the sink.
        writer.shutdown().await.map_err(PipelineError::Finish)?;

        debug!(
            "pipeline {:?} from {} done, {} bytes read",
            self.transform,
            self.source.display(),
            bytes_read
        );

        Ok(Completion {
            bytes_read,
            digest: hasher.map(|h| hex::encode(h.finalize())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::fs;

    type TestResult = Result<(), Box<dyn Error>>;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[tokio::test]
    async fn test_copy_to_file_multi_chunk() -> TestResult {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        let data = patterned(200 * 1024);
        fs::write(&src, &data)?;

        let done = Pipeline::new(&src, Sink::File(dst.clone())).run().await?;

        assert_eq!(done.bytes_read, data.len() as u64);
        assert_eq!(done.digest, None);
        assert_eq!(fs::read(&dst)?, data);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_source_still_completes() -> TestResult {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("empty");
        fs::write(&src, b"")?;

        let done = Pipeline::new(&src, Sink::Discard)
            .transform(Transform::Sha256)
            .run()
            .await?;

        assert_eq!(done.bytes_read, 0);
        assert_eq!(done.digest.as_deref(), Some(EMPTY_SHA256));
        Ok(())
    }

    #[tokio::test]
    async fn test_digest_independent_of_chunk_size() -> TestResult {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("abc");
        fs::write(&src, b"abc")?;

        let whole = Pipeline::new(&src, Sink::Discard)
            .transform(Transform::Sha256)
            .run()
            .await?;
        let bytewise = Pipeline::new(&src, Sink::Discard)
            .transform(Transform::Sha256)
            .chunk_size(1)
            .run()
            .await?;

        assert_eq!(
            whole.digest.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(whole.digest, bytewise.digest);
        Ok(())
    }

    #[tokio::test]
    async fn test_writer_sink_receives_bytes() -> TestResult {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("hello.txt");
        fs::write(&src, b"hello\nworld")?;

        let mut out: Vec<u8> = Vec::new();
        Pipeline::new(&src, Sink::Writer(&mut out)).run().await?;

        assert_eq!(out, b"hello\nworld");
        Ok(())
    }

    #[tokio::test]
    async fn test_brotli_round_trip() -> TestResult {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("plain.txt");
        let packed = dir.path().join("plain.txt.br");
        let unpacked = dir.path().join("plain.out");
        let data = b"to be or not to be ".repeat(5000);
        fs::write(&src, &data)?;

        Pipeline::new(&src, Sink::File(packed.clone()))
            .transform(Transform::BrotliCompress { quality: 5 })
            .run()
            .await?;
        Pipeline::new(&packed, Sink::File(unpacked.clone()))
            .transform(Transform::BrotliDecompress)
            .chunk_size(7)
            .run()
            .await?;

        assert!(fs::metadata(&packed)?.len() < data.len() as u64);
        assert_eq!(fs::read(&unpacked)?, data);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_source_creates_no_destination() -> TestResult {
        let dir = tempfile::tempdir()?;
        let dst = dir.path().join("never");

        let result = Pipeline::new(dir.path().join("absent"), Sink::File(dst.clone()))
            .run()
            .await;

        assert!(matches!(result, Err(PipelineError::OpenSource { .. })));
        assert!(!dst.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_decompress_garbage_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("garbage.br");
        fs::write(&src, patterned(4096))?;

        let result = Pipeline::new(&src, Sink::Discard)
            .transform(Transform::BrotliDecompress)
            .run()
            .await;

        assert!(result.is_err());
        Ok(())
    }
}
