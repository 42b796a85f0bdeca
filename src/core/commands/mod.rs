use std::collections::BTreeMap;
use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;
use tokio::io::AsyncWrite;

mod add;
mod cat;
mod cd;
mod codec;
mod copy;
mod exit;
mod hash;
mod ls;
mod os;
mod rm;
mod rn;
mod transfer;
mod up;

pub use add::AddCommand;
pub use cat::CatCommand;
pub use cd::CdCommand;
pub use codec::{Codec, CodecCommand};
pub use copy::{CopyCommand, MoveCommand};
pub use exit::ExitCommand;
pub use hash::HashCommand;
pub use ls::{EntryKind, FileEntry, LsCommand};
pub use os::{OsCommand, OS_FLAGS};
pub use rm::RmCommand;
pub use rn::RnCommand;
pub use up::UpCommand;

use crate::core::config::Settings;
use crate::core::Session;
use crate::os::{OsInfoProvider, SystemInfo};
use crate::path::PathResolver;
use crate::shell::Console;
use crate::stream::PipelineError;

/// The only two outcomes a user ever sees for a failed command.
///
/// The payload is the underlying cause, kept for the debug log.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid input")]
    InvalidInput(String),
    #[error("Operation failed")]
    OperationFailed(String),
}

impl CommandError {
    pub fn invalid(reason: impl Display) -> Self {
        CommandError::InvalidInput(reason.to_string())
    }

    pub fn failed(reason: impl Display) -> Self {
        CommandError::OperationFailed(reason.to_string())
    }

    pub fn reason(&self) -> &str {
        match self {
            CommandError::InvalidInput(reason) | CommandError::OperationFailed(reason) => reason,
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::failed(err)
    }
}

impl From<PipelineError> for CommandError {
    fn from(err: PipelineError) -> Self {
        CommandError::failed(err)
    }
}

/// Everything a command may look at or change while it runs.
pub struct Context<'a, W> {
    pub session: &'a mut Session,
    pub console: &'a mut Console<W>,
    pub settings: &'a Settings,
    pub os: &'a dyn OsInfoProvider,
}

impl<W> Context<'_, W> {
    /// Resolves a path token against the session's current directory.
    pub fn resolve(&self, token: &str) -> PathBuf {
        PathResolver::new().resolve(token, self.session.current_dir())
    }
}

pub(crate) trait Command {
    /// Arguments required after the command name.
    fn min_args(&self) -> usize {
        0
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Up(UpCommand),
    Cd(CdCommand),
    Ls(LsCommand),
    Cat(CatCommand),
    Add(AddCommand),
    Rn(RnCommand),
    Cp(CopyCommand),
    Mv(MoveCommand),
    Rm(RmCommand),
    Os(OsCommand),
    Hash(HashCommand),
    Codec(CodecCommand),
}

impl Command for CommandType {
    fn min_args(&self) -> usize {
        match self {
            CommandType::Exit(cmd) => cmd.min_args(),
            CommandType::Up(cmd) => cmd.min_args(),
            CommandType::Cd(cmd) => cmd.min_args(),
            CommandType::Ls(cmd) => cmd.min_args(),
            CommandType::Cat(cmd) => cmd.min_args(),
            CommandType::Add(cmd) => cmd.min_args(),
            CommandType::Rn(cmd) => cmd.min_args(),
            CommandType::Cp(cmd) => cmd.min_args(),
            CommandType::Mv(cmd) => cmd.min_args(),
            CommandType::Rm(cmd) => cmd.min_args(),
            CommandType::Os(cmd) => cmd.min_args(),
            CommandType::Hash(cmd) => cmd.min_args(),
            CommandType::Codec(cmd) => cmd.min_args(),
        }
    }

    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        args: &[String],
    ) -> Result<(), CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(ctx, args).await,
            CommandType::Up(cmd) => cmd.execute(ctx, args).await,
            CommandType::Cd(cmd) => cmd.execute(ctx, args).await,
            CommandType::Ls(cmd) => cmd.execute(ctx, args).await,
            CommandType::Cat(cmd) => cmd.execute(ctx, args).await,
            CommandType::Add(cmd) => cmd.execute(ctx, args).await,
            CommandType::Rn(cmd) => cmd.execute(ctx, args).await,
            CommandType::Cp(cmd) => cmd.execute(ctx, args).await,
            CommandType::Mv(cmd) => cmd.execute(ctx, args).await,
            CommandType::Rm(cmd) => cmd.execute(ctx, args).await,
            CommandType::Os(cmd) => cmd.execute(ctx, args).await,
            CommandType::Hash(cmd) => cmd.execute(ctx, args).await,
            CommandType::Codec(cmd) => cmd.execute(ctx, args).await,
        }
    }
}

/// One input line split into a command name and its arguments.
///
/// Tokens are separated by single spaces with no quoting, so a name that
/// contains a space cannot be addressed, and doubled spaces yield empty
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split(' ').map(str::to_string);
        let name = tokens.next().unwrap_or_default();
        Self {
            name,
            args: tokens.collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Routes input lines to the builtin commands.
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    settings: Settings,
    os: Box<dyn OsInfoProvider>,
}

impl CommandExecutor {
    pub fn new(settings: Settings) -> Self {
        Self::with_os_info(settings, Box::new(SystemInfo::new()))
    }

    pub fn with_os_info(settings: Settings, os: Box<dyn OsInfoProvider>) -> Self {
        let mut commands = BTreeMap::new();

        // Register commands
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("up", CommandType::Up(UpCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("ls", CommandType::Ls(LsCommand::new()));
        commands.insert("cat", CommandType::Cat(CatCommand::new()));
        commands.insert("add", CommandType::Add(AddCommand::new()));
        commands.insert("rn", CommandType::Rn(RnCommand::new()));
        commands.insert("cp", CommandType::Cp(CopyCommand::new()));
        commands.insert("mv", CommandType::Mv(MoveCommand::new()));
        commands.insert("rm", CommandType::Rm(RmCommand::new()));
        commands.insert("os", CommandType::Os(OsCommand::new()));
        commands.insert("hash", CommandType::Hash(HashCommand::new()));
        commands.insert(
            "compress",
            CommandType::Codec(CodecCommand::new(Codec::Compress)),
        );
        commands.insert(
            "decompress",
            CommandType::Codec(CodecCommand::new(Codec::Decompress)),
        );

        Self {
            commands,
            settings,
            os,
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    pub fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Runs one input line to completion.
    ///
    /// Command failures are printed and swallowed; only a failure to write to
    /// the console itself is returned.
    pub async fn execute_line<W: AsyncWrite + Unpin>(
        &self,
        line: &str,
        session: &mut Session,
        console: &mut Console<W>,
    ) -> io::Result<Flow> {
        let parsed = ParsedCommand::parse(line);
        let mut ctx = Context {
            session,
            console,
            settings: &self.settings,
            os: self.os.as_ref(),
        };

        let result = match self.commands.get(parsed.name.as_str()) {
            None => Err(CommandError::invalid(format!(
                "unknown command {:?}",
                parsed.name
            ))),
            Some(cmd) if parsed.args.len() < cmd.min_args() => {
                Err(CommandError::invalid(format!(
                    "{} expects at least {} argument(s), got {}",
                    parsed.name,
                    cmd.min_args(),
                    parsed.args.len()
                )))
            }
            Some(cmd) => cmd.execute(&mut ctx, &parsed.args).await,
        };

        if let Err(err) = result {
            debug!("{}: {}", parsed.name, err.reason());
            ctx.console.print_line(&err.to_string()).await?;
        }

        Ok(if ctx.session.is_running() {
            Flow::Continue
        } else {
            Flow::Exit
        })
    }
}
