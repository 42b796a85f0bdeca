use rustyline::completion::Pair;

use crate::core::commands::OS_FLAGS;

/// Completes builtin command names, and the sub-flags of `os`.
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    pub fn new(commands: impl IntoIterator<Item = &'static str>) -> Self {
        let mut commands: Vec<&'static str> = commands.into_iter().collect();
        commands.sort_unstable();
        commands.dedup();
        Self { commands }
    }

    pub fn is_known(&self, command: &str) -> bool {
        self.commands.binary_search_by(|c| (*c).cmp(command)).is_ok()
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        Self::matches(self.commands.iter().copied(), input, true)
    }

    pub fn complete_os_flag(&self, input: &str) -> Vec<Pair> {
        Self::matches(OS_FLAGS.iter().copied(), input, false)
    }

    fn matches<'a>(candidates: impl Iterator<Item = &'a str>, input: &str, add_space: bool) -> Vec<Pair> {
        candidates
            .filter(|candidate| candidate.starts_with(input))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: if add_space {
                    format!("{} ", candidate)
                } else {
                    candidate.to_string()
                },
            })
            .collect()
    }
}
