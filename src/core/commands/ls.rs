use std::cmp::Ordering;
use std::fmt::Write as _;

use tokio::fs;
use tokio::io::AsyncWrite;

use super::{Command, CommandError, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Per-character sort key: punctuation and symbols rank before digits,
/// digits before letters, and letters compare case-insensitively.
fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars().map(collation_key).cmp(b.chars().map(collation_key))
}

/// Directories first, then by name in dictionary order, lowercase before
/// uppercase when names differ only in case.
///
/// This follows the shape of locale collation for ASCII names; it does not
/// implement accent or language-specific rules.
fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| b.name.cmp(&a.name))
}

pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

/// Renders entries as a boxed three column table.
pub fn render_table(entries: &[FileEntry]) -> String {
    let headers = ["(index)", "Name", "Type"];
    let rows: Vec<[String; 3]> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| [i.to_string(), e.name.clone(), e.kind.as_str().to_string()])
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: [&str; 3]| {
        let mut out = String::from("│");
        for (cell, width) in cells.iter().zip(widths) {
            let pad = width - cell.chars().count();
            let _ = write!(out, " {}{} │", cell, " ".repeat(pad));
        }
        out.push('\n');
        out
    };

    let mut table = border("┌", "┬", "┐");
    table.push_str(&line(headers));
    table.push_str(&border("├", "┼", "┤"));
    for row in &rows {
        table.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    table.push_str(&border("└", "┴", "┘"));
    table
}

#[derive(Clone)]
pub struct LsCommand;

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for LsCommand {
    async fn execute<W: AsyncWrite + Unpin>(
        &self,
        ctx: &mut Context<'_, W>,
        _args: &[String],
    ) -> Result<(), CommandError> {
        let mut reader = fs::read_dir(ctx.session.current_dir()).await?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            // file_type() does not follow symlinks.
            let kind = if entry.file_type().await?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        sort_entries(&mut entries);
        let table = render_table(&entries);
        ctx.console.print_line(table.trim_end_matches('\n')).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Harness, TestResult};
    use super::*;
    use std::fs;

    fn entry(name: &str, kind: EntryKind) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            kind,
        }
    }

    #[test]
    fn test_sort_directories_first() {
        let mut entries = vec![
            entry("b.txt", EntryKind::File),
            entry("a.txt", EntryKind::File),
            entry("sub", EntryKind::Directory),
        ];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["sub", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_sort_ignores_case_first() {
        let mut entries = vec![
            entry("Beta", EntryKind::File),
            entry("alpha", EntryKind::File),
            entry("Alpha", EntryKind::File),
            entry("Zed", EntryKind::Directory),
            entry("docs", EntryKind::Directory),
        ];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "Zed", "alpha", "Alpha", "Beta"]);
    }

    #[test]
    fn test_sort_punctuation_before_digits_and_letters() {
        let mut entries = vec![
            entry("zeta", EntryKind::File),
            entry("~backup", EntryKind::File),
            entry("10.log", EntryKind::File),
            entry("{draft}", EntryKind::File),
            entry("_notes", EntryKind::File),
            entry("Apple", EntryKind::File),
        ];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["_notes", "{draft}", "~backup", "10.log", "Apple", "zeta"]
        );
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[
            entry("sub", EntryKind::Directory),
            entry("a.txt", EntryKind::File),
        ]);
        let expected = "\
┌─────────┬───────┬───────────┐
│ (index) │ Name  │ Type      │
├─────────┼───────┼───────────┤
│ 0       │ sub   │ directory │
│ 1       │ a.txt │ file      │
└─────────┴───────┴───────────┘
";
        assert_eq!(table, expected);
    }

    #[tokio::test]
    async fn test_ls_lists_current_directory() -> TestResult {
        let mut h = Harness::new()?;
        fs::write(h.path("b.txt"), b"b")?;
        fs::write(h.path("a.txt"), b"a")?;
        fs::create_dir(h.path("sub"))?;

        let out = h.run("ls").await?;
        let rows: Vec<&str> = out.lines().skip(3).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains("sub") && rows[0].contains("directory"));
        assert!(rows[1].contains("a.txt") && rows[1].contains("file"));
        assert!(rows[2].contains("b.txt"));
        assert!(rows[3].starts_with('└'));
        Ok(())
    }

    #[tokio::test]
    async fn test_ls_follows_virtual_directory() -> TestResult {
        let mut h = Harness::new()?;
        fs::create_dir(h.path("inner"))?;
        fs::write(h.path("inner/only.txt"), b"")?;

        h.run("cd inner").await?;
        let out = h.run("ls").await?;
        assert!(out.contains("only.txt"));
        assert!(!out.contains("inner"));
        Ok(())
    }

    #[tokio::test]
    async fn test_ls_empty_directory() -> TestResult {
        let mut h = Harness::new()?;
        let out = h.run("ls").await?;
        assert_eq!(out.lines().count(), 4);
        Ok(())
    }
}
