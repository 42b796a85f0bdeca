use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};

const ROOT_MESSAGE: &str = "User can't go upper than root directory";

#[derive(Clone)]
pub struct UpCommand;

impl Default for UpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl UpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for UpCommand {
    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        _args: &[String],
    ) -> Result<(), CommandError> {
        match ctx.session.current_dir().parent().map(|p| p.to_path_buf()) {
            Some(parent) => {
                ctx.session.change_dir(parent);
                let location = ctx.session.location();
                ctx.console.print_line(&location).await?;
            }
            None => ctx.console.print_line(ROOT_MESSAGE).await?,
        }
        Ok(())
    }
}
