use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: Option<String>,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        let mut insert = |name: &str, short: Option<&str>, long: &str, description: &str, takes_value: bool| {
            flags.insert(
                name.to_string(),
                Flag {
                    short: short.map(str::to_string),
                    long: long.to_string(),
                    description: description.to_string(),
                    takes_value,
                    value: None,
                },
            );
        };

        insert("help", Some("-h"), "--help", "Print this help message", false);
        insert("version", Some("-v"), "--version", "Show version information", false);
        insert("username", None, "--username", "Name to greet the user with (required)", true);
        insert("config", Some("-c"), "--config", "Specify custom config file path", true);
        insert("debug", Some("-d"), "--debug", "Enable debug logging on stderr", false);

        Flags { flags }
    }

    /// Parses command line arguments.
    ///
    /// Accepts `--flag value` and `--flag=value`. Arguments that match no
    /// known flag are ignored so wrappers such as `npm run` can pass extras.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let (name, inline_value) = match args[i].split_once('=') {
                Some((name, value)) if name.starts_with("--") => (name, Some(value)),
                _ => (args[i].as_str(), None),
            };

            if let Some(flag) = self
                .flags
                .values_mut()
                .find(|f| f.long == name || f.short.as_deref() == Some(name))
            {
                if flag.takes_value {
                    let value = match inline_value {
                        Some(value) => value.to_string(),
                        None if i + 1 < args.len() => {
                            i += 1;
                            args[i].clone()
                        }
                        None => {
                            return Err(ShellError::FlagError(format!(
                                "Flag {} requires a value",
                                name
                            )))
                        }
                    };
                    flag.value = Some(value);
                } else {
                    flag.value = Some("true".to_string());
                }
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    /// The `--username` value, which the file manager cannot start without.
    pub fn username(&self) -> Result<&str, ShellError> {
        self.get_value("username")
            .map(String::as_str)
            .ok_or(ShellError::MissingUsername)
    }

    pub fn print_help(&self) {
        println!("Usage: fileman --username=<name> [OPTIONS]");
        println!("\nOptions:");
        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        for flag in flags {
            let short = flag.short.as_deref().unwrap_or("  ");
            println!("  {}, {:<15} {}", short, flag.long, flag.description);
        }
    }
}
