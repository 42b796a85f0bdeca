use tokio::fs;
use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};
use crate::path::check_access;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn min_args(&self) -> usize {
        1
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let target = ctx.resolve(&args[0]);

        check_access(&target)
            .map_err(|e| CommandError::failed(format!("{}: {}", target.display(), e)))?;
        let metadata = fs::metadata(&target).await?;
        if !metadata.is_dir() {
            return Err(CommandError::failed(format!(
                "{} is not a directory",
                target.display()
            )));
        }

        ctx.session.change_dir(target);
        let location = ctx.session.location();
        ctx.console.print_line(&location).await?;
        Ok(())
    }
}
