use std::borrow::Cow;
use std::path::Path;

mod command;
mod path;

use command::CommandCompleter;
use path::PathCompleter;

use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// rustyline helper: completion and highlighting for the file manager.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(
        commands: impl IntoIterator<Item = &'static str>,
        current_dir: &Path,
        highlighter: SyntaxHighlighter,
    ) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(commands),
            path_completer: PathCompleter::new(current_dir),
            highlighter,
        }
    }

    pub fn set_current_dir(&mut self, dir: &Path) {
        self.path_completer.set_current_dir(dir);
    }

    fn candidates(&self, line_up_to_cursor: &str) -> (usize, Vec<Pair>) {
        let words: Vec<&str> = line_up_to_cursor.split(' ').collect();
        // The word under the cursor starts after the last space.
        let start = line_up_to_cursor.rfind(' ').map_or(0, |idx| idx + 1);
        let current = words.last().copied().unwrap_or("");

        let matches = match (words.len(), words.first().copied()) {
            (0 | 1, _) => self.command_completer.complete_command(current),
            (2, Some("os")) => self.command_completer.complete_os_flag(current),
            _ => self.path_completer.complete_path(current),
        };
        (start, matches)
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !self.highlighter.is_enabled() {
            return Cow::Borrowed(line);
        }
        Cow::Owned(
            self.highlighter
                .highlight_command(line, |cmd| self.command_completer.is_known(cmd)),
        )
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, _default: bool) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.highlight_prompt(prompt))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.is_enabled()
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}
