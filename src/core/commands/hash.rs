use tokio::io::AsyncWrite;

use super::transfer::accessible_file;
use super::{Command, CommandError, Context};
use crate::stream::{Pipeline, Sink, Transform};

#[derive(Clone)]
pub struct HashCommand;

impl Default for HashCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HashCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HashCommand {
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

        let completion = Pipeline::new(&path, Sink::Discard)
            .transform(Transform::Sha256)
            .chunk_size(ctx.settings.chunk_size)
            .run()
            .await?;
        let digest = completion
            .digest
            .ok_or_else(|| CommandError::failed("digest missing from completed pipeline"))?;

        ctx.console.print_line(&digest).await?;
        Ok(())
    }
}
