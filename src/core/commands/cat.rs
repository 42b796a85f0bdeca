use tokio::io::AsyncWrite;

use super::transfer::accessible_file;
use super::{Command, CommandError, Context};
use crate::stream::{Pipeline, Sink};

#[derive(Clone)]
pub struct CatCommand;

impl Default for CatCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CatCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CatCommand {
    fn min_args(&self) -> usize {
        1
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let path = ctx.resolve(&args[0]);
        accessible_file(&path).await?;

        Pipeline::new(&path, Sink::Writer(ctx.console.writer()))
            .chunk_size(ctx.settings.chunk_size)
            .run()
            .await?;
        Ok(())
    }
}
