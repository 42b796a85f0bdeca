use tokio::fs;
use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};

#[derive(Clone)]
pub struct AddCommand;

impl Default for AddCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl AddCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for AddCommand {
    fn min_args(&self) -> usize {
        1
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let path = ctx.resolve(&args[0]);
        fs::write(&path, b"").await?;
        Ok(())
    }
}
