use tokio::fs;
use tokio::io::AsyncWrite;

use super::transfer::Transfer;
use super::{Command, CommandError, Context};
use crate::path::check_access;
use crate::stream::Transform;

fn plan<W>(ctx: &Context<'_, W>, args: &[String]) -> Transfer {
    Transfer::new(ctx.resolve(&args[0]), ctx.resolve(&args[1]))
}

#[derive(Clone)]
pub struct CopyCommand;

impl Default for CopyCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CopyCommand {
    fn min_args(&self) -> usize {
        2
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let transfer = plan(ctx, args);
        transfer
            .check_source()
            .await
            .map_err(|e| CommandError::invalid(format!("{}: {}", transfer.source.display(), e)))?;

        if !transfer.is_in_place().await? {
            transfer.stream(ctx.settings, Transform::Identity).await?;
        }
        ctx.console.print_line("File copied").await?;
        Ok(())
    }
}

/// Copy followed by deletion of the source. Not atomic: an interruption
/// between the two phases leaves both files behind.
#[derive(Clone)]
pub struct MoveCommand;

impl Default for MoveCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MoveCommand {
    fn min_args(&self) -> usize {
        2
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let transfer = plan(ctx, args);
        transfer.check_source().await?;

        let in_place = transfer.is_in_place().await?;
        if !in_place {
            transfer.stream(ctx.settings, Transform::Identity).await?;
        }
        ctx.console.print_line("File moved").await?;

        check_access(&transfer.source)?;
        if !in_place {
            fs::remove_file(&transfer.source).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Harness, TestResult};
    use std::fs;
    use std::os::unix::fs::symlink;

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 253) as u8).collect()
    }

    #[tokio::test]
    async fn test_cp_fidelity_across_sizes() -> TestResult {
        let mut h = Harness::new()?;
        for (name, len) in [("zero", 0), ("one", 1), ("big", 300 * 1024)] {
            let data = patterned(len);
            fs::write(h.path(name), &data)?;

            let line = format!("cp {} {}.copy", name, name);
            assert_eq!(h.run(&line).await?, "File copied\n");
            assert_eq!(fs::read(h.path(&format!("{}.copy", name)))?, data);
            assert_eq!(fs::read(h.path(name))?, data);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_cp_overwrites_destination() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("src"), b"new")?;
        fs::write(h.path("dst"), b"old and longer")?;
        h.run("cp src dst").await?;
        assert_eq!(fs::read(h.path("dst"))?, b"new");
        Ok(())
    }

    #[tokio::test]
    async fn test_cp_into_subdirectory() -> TestResult {
        let mut h = Harness::new()?;
        fs::create_dir(h.path("sub"))?;
        fs::write(h.path("a.txt"), b"abc")?;
        h.run("cd sub").await?;
        assert_eq!(h.run("cp ../a.txt b.txt").await?, "File copied\n");
        assert_eq!(fs::read(h.path("sub/b.txt"))?, b"abc");
        Ok(())
    }

    #[tokio::test]
    async fn test_cp_missing_source_is_invalid_input() -> TestResult {
        let mut h = Harness::new()?;
        assert_eq!(h.run("cp ghost.txt copy.txt").await?, "Invalid input\n");
        assert!(!h.path("copy.txt").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_cp_destination_dir_missing() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("a.txt"), b"abc")?;
        assert_eq!(h.run("cp a.txt nodir/a.txt").await?, "Operation failed\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_mv_moves_file() -> TestResult {
        let mut h = Harness::new()?;
        let data = patterned(70 * 1024);
        fs::write(h.path("from.bin"), &data)?;

        assert_eq!(h.run("mv from.bin to.bin").await?, "File moved\n");
        assert!(!h.path("from.bin").exists());
        assert_eq!(fs::read(h.path("to.bin"))?, data);
        Ok(())
    }

    #[tokio::test]
    async fn test_mv_onto_itself_keeps_file() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("same.txt"), b"precious")?;

        assert_eq!(h.run("mv same.txt same.txt").await?, "File moved\n");
        assert_eq!(fs::read(h.path("same.txt"))?, b"precious");

        assert_eq!(h.run("mv same.txt ./same.txt").await?, "File moved\n");
        assert_eq!(fs::read(h.path("same.txt"))?, b"precious");
        Ok(())
    }

    #[tokio::test]
    async fn test_cp_onto_hard_link_keeps_source() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("data.txt"), b"shared bytes")?;
        fs::hard_link(h.path("data.txt"), h.path("link.txt"))?;

        assert_eq!(h.run("cp data.txt link.txt").await?, "File copied\n");
        assert_eq!(fs::read(h.path("data.txt"))?, b"shared bytes");
        assert_eq!(fs::read(h.path("link.txt"))?, b"shared bytes");
        Ok(())
    }

    #[tokio::test]
    async fn test_mv_onto_symlink_to_source_keeps_data() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("data.txt"), b"do not lose me")?;
        symlink("data.txt", h.path("alias.txt"))?;

        assert_eq!(h.run("mv data.txt alias.txt").await?, "File moved\n");
        assert_eq!(fs::read(h.path("data.txt"))?, b"do not lose me");
        assert_eq!(fs::read(h.path("alias.txt"))?, b"do not lose me");
        Ok(())
    }

    #[tokio::test]
    async fn test_mv_onto_hard_link_keeps_data() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("data.txt"), b"twice named")?;
        fs::hard_link(h.path("data.txt"), h.path("other.txt"))?;

        assert_eq!(h.run("mv data.txt other.txt").await?, "File moved\n");
        assert_eq!(fs::read(h.path("data.txt"))?, b"twice named");
        assert_eq!(fs::read(h.path("other.txt"))?, b"twice named");
        Ok(())
    }

    #[tokio::test]
    async fn test_mv_missing_source() -> TestResult {
        let mut h = Harness::new()?;
        assert_eq!(h.run("mv ghost.txt there.txt").await?, "Operation failed\n");
        assert!(!h.path("there.txt").exists());
        Ok(())
    }
}
