use tokio::fs;
use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};

#[derive(Clone)]
pub struct RnCommand;

impl Default for RnCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RnCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for RnCommand {
    fn min_args(&self) -> usize {
        2
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let from = ctx.resolve(&args[0]);
        let to = ctx.resolve(&args[1]);

        fs::rename(&from, &to).await.map_err(|e| {
            CommandError::invalid(format!("{} -> {}: {}", from.display(), to.display(), e))
        })
    }
}
