use tokio::fs;
use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};
use crate::path::check_access;

#[derive(Clone)]
pub struct RmCommand;

impl Default for RmCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RmCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RmCommand {
    fn min_args(&self) -> usize {
        1
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let path = ctx.resolve(&args[0]);
        check_access(&path)
            .map_err(|e| CommandError::failed(format!("{}: {}", path.display(), e)))?;

        fs::remove_file(&path).await?;
        ctx.console
            .print_line(&format!("File {} deleted", args[0]))
            .await?;
        Ok(())
    }
}
