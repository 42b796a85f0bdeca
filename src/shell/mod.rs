use std::path::Path;

use log::{debug, info};
use rustyline::{config::Configurer, error::ReadlineError, history::DefaultHistory, Editor};
use tokio::io::{AsyncWrite, Stdout};
use tokio::runtime::{Builder, Runtime};

mod console;

pub use console::Console;

use crate::{
    core::{
        commands::{CommandExecutor, Flow},
        config::{Config, StartDir},
        Session,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
};

/// Source of input lines for the loop.
pub trait LineReader {
    /// `Ok(None)` means the input is over and the session should end.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    /// Called before every prompt with the session's current directory.
    fn set_current_dir(&mut self, _dir: &Path) {}
}

/// Interactive [`LineReader`] on top of rustyline.
pub struct Prompt {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl Prompt {
    pub fn new(completer: ShellCompleter, history_size: usize) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_max_history_size(history_size)?;
        editor.set_auto_add_history(true);
        editor.set_helper(Some(completer));
        Ok(Self { editor })
    }
}

impl LineReader for Prompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => {
                debug!("CTRL-C at prompt");
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                debug!("end of input");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_current_dir(dir);
        }
    }
}

/// The read-eval-print loop.
///
/// Every line runs to completion on a single-threaded runtime before the
/// next prompt is shown, so streaming commands never overlap.
pub struct Shell<R, W> {
    reader: R,
    console: Console<W>,
    session: Session,
    executor: CommandExecutor,
    runtime: Runtime,
}

impl Shell<Prompt, Stdout> {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        let username = flags.username()?;

        let mut config = match flags.get_value("config") {
            Some(path) => Config::from_file(path),
            None => Config::new()?,
        };
        config.load()?;
        info!("configuration from {}", config.rc_path().display());
        let settings = config.into_settings();

        let start_dir = match settings.start_dir {
            StartDir::Cwd => std::env::current_dir()?,
            StartDir::Home => dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?,
        };
        let session = Session::new(username, start_dir)?;

        let highlighter = SyntaxHighlighter::new(settings.color);
        let history_size = settings.history_size;
        let executor = CommandExecutor::new(settings);
        let completer = ShellCompleter::new(
            executor.command_names(),
            session.current_dir(),
            highlighter,
        );
        let reader = Prompt::new(completer, history_size)?;

        // rustyline turns Ctrl-C at the prompt into an error; this handler
        // only fires while a command is running.
        let farewell = session.farewell();
        ctrlc::set_handler(move || {
            println!("\n{}", farewell);
            std::process::exit(0);
        })?;

        Self::with_parts(reader, Console::new(tokio::io::stdout()), session, executor)
    }
}

impl<R: LineReader, W: AsyncWrite + Unpin> Shell<R, W> {
    pub fn with_parts(
        reader: R,
        console: Console<W>,
        session: Session,
        executor: CommandExecutor,
    ) -> Result<Self, ShellError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Shell {
            reader,
            console,
            session,
            executor,
            runtime,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let Shell {
            reader,
            console,
            session,
            executor,
            runtime,
        } = self;

        let greeting = session.greeting();
        let location = session.location();
        runtime.block_on(async {
            console.print_line(&greeting).await?;
            console.print_line(&location).await
        })?;

        while session.is_running() {
            reader.set_current_dir(session.current_dir());
            let prompt = format!("{} > ", session.current_dir().display());
            let Some(line) = reader.read_line(&prompt)? else {
                break;
            };

            let flow = runtime.block_on(executor.execute_line(&line, session, console))?;
            if flow == Flow::Exit {
                break;
            }
        }

        // End of input counts as `exit`.
        if session.terminate() {
            let farewell = session.farewell();
            runtime.block_on(console.print_line(&farewell))?;
        }
        Ok(())
    }
}
