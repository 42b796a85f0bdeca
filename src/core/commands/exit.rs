use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        _args: &[String],
    ) -> Result<(), CommandError> {
        if ctx.session.terminate() {
            let farewell = ctx.session.farewell();
            ctx.console.print_line(&farewell).await?;
        }
        Ok(())
    }
}
