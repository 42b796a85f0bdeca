use tokio::io::AsyncWrite;

use super::transfer::Transfer;
use super::{Command, CommandError, Context};
use crate::stream::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Compress,
    Decompress,
}

/// `compress` and `decompress`: Brotli over a file-to-file pipeline.
#[derive(Clone)]
pub struct CodecCommand {
    codec: Codec,
}

impl CodecCommand {
    pub fn new(codec: Codec) -> Self {
        Self { codec }
    }
}

impl Command for CodecCommand {
    fn min_args(&self) -> usize {
        2
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let transfer = Transfer::new(ctx.resolve(&args[0]), ctx.resolve(&args[1]));
        transfer.check_source().await?;
        if transfer.is_in_place().await? {
            return Err(CommandError::failed("source and destination are the same file"));
        }

        let (transform, message) = match self.codec {
            Codec::Compress => (
                Transform::BrotliCompress {
                    quality: ctx.settings.compression_quality,
                },
                "File compressed",
            ),
            Codec::Decompress => (Transform::BrotliDecompress, "File decompressed"),
        };

        transfer.stream(ctx.settings, transform).await?;
        ctx.console.print_line(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Harness, TestResult};
    use crate::core::config::Settings;
    use std::fs;
    use std::os::unix::fs::symlink;

    #[tokio::test]
    async fn test_round_trip() -> TestResult {
        let mut h = Harness::new()?;
        let text = "all work and no play makes jack a dull boy\n".repeat(4000);
        fs::write(h.path("story.txt"), &text)?;

        assert_eq!(h.run("compress story.txt story.br").await?, "File compressed\n");
        assert!(fs::metadata(h.path("story.br"))?.len() < text.len() as u64);

        assert_eq!(h.run("decompress story.br story.out").await?, "File decompressed\n");
        assert_eq!(fs::read_to_string(h.path("story.out"))?, text);
        Ok(())
    }

    #[tokio::test]
    async fn test_round_trip_empty_file_small_chunks() -> TestResult {
        let settings = Settings {
            chunk_size: 3,
            compression_quality: 1,
            ..Settings::default()
        };
        let mut h = Harness::with_settings(settings)?;
        fs::write(h.path("empty"), b"")?;

        h.run("compress empty empty.br").await?;
        assert!(h.path("empty.br").exists());
        h.run("decompress empty.br empty.out").await?;
        assert_eq!(fs::read(h.path("empty.out"))?, b"");
        Ok(())
    }

    #[tokio::test]
    async fn test_decompress_plain_text_fails() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("plain.txt"), "this was never compressed at all, honest")?;
        assert_eq!(h.run("decompress plain.txt out.txt").await?, "Operation failed\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_compress_in_place_refused() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("data"), b"keep me")?;
        assert_eq!(h.run("compress data data").await?, "Operation failed\n");
        assert_eq!(fs::read(h.path("data"))?, b"keep me");
        Ok(())
    }

    #[tokio::test]
    async fn test_decompress_truncated_stream_fails() -> TestResult {
        let mut h = Harness::new()?;
        let text = "the quick brown fox jumps over the lazy dog\n".repeat(2000);
        fs::write(h.path("fox.txt"), &text)?;
        h.run("compress fox.txt fox.br").await?;

        let packed = fs::read(h.path("fox.br"))?;
        fs::write(h.path("cut.br"), &packed[..packed.len() / 2])?;

        assert_eq!(h.run("decompress cut.br cut.txt").await?, "Operation failed\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_compress_onto_link_to_source_refused() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("data"), b"keep me")?;
        symlink("data", h.path("alias"))?;
        fs::hard_link(h.path("data"), h.path("twin"))?;

        assert_eq!(h.run("compress data alias").await?, "Operation failed\n");
        assert_eq!(h.run("decompress data twin").await?, "Operation failed\n");
        assert_eq!(fs::read(h.path("data"))?, b"keep me");
        Ok(())
    }

    #[tokio::test]
    async fn test_compress_missing_source() -> TestResult {
        let mut h = Harness::new()?;
        assert_eq!(h.run("compress ghost ghost.br").await?, "Operation failed\n");
        assert!(!h.path("ghost.br").exists());
        Ok(())
    }
}
