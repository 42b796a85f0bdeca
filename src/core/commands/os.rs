use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};

/// Sub-flags understood by `os`, also offered by tab completion.
pub const OS_FLAGS: [&str; 5] = ["--EOL", "--cpus", "--homedir", "--username", "--architecture"];

#[derive(Clone)]
pub struct OsCommand;

impl Default for OsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl OsCommand {
    pub fn new() -> Self {
        Self
    }

    fn report<W>(&self, ctx: &Context<'_, W>, flag: &str) -> Result<Vec<String>, CommandError> {
        let os = ctx.os;
        let lines = match flag {
            "--EOL" => vec![format!("EOL: {:?}", os.eol())],
            "--cpus" => {
                let cpus = os.cpus();
                let mut lines = vec![format!("Overall amount of CPUS is {}", cpus.len())];
                lines.extend(cpus.iter().enumerate().map(|(i, cpu)| match cpu.speed_mhz {
                    Some(mhz) => format!("CPU {}: {} ({:.2} GHz)", i + 1, cpu.model, mhz / 1000.0),
                    None => format!("CPU {}: {}", i + 1, cpu.model),
                }));
                lines
            }
            "--homedir" => {
                let home = os
                    .home_dir()
                    .ok_or_else(|| CommandError::failed("home directory unknown"))?;
                vec![home.display().to_string()]
            }
            "--username" => vec![os.username()],
            "--architecture" => vec![os.architecture().to_string()],
            other => return Err(CommandError::failed(format!("unknown os flag {:?}", other))),
        };
        Ok(lines)
    }
}

impl Command for OsCommand {
    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let flag = args
            .first()
            .ok_or_else(|| CommandError::failed("os needs a flag"))?;

        for line in self.report(ctx, flag)? {
            ctx.console.print_line(&line).await?;
        }
        Ok(())
    }
}
