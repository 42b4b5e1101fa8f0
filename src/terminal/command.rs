//! Custom terminal command entries.

use crate::terminal::placeholder::{resolve_placeholders, PlaceholderHost};
use serde::{Deserialize, Serialize};

/// Cursor marker used when none is configured.
pub const DEFAULT_CURSOR_SYMBOL: &str = "<|>";

/// `os` may be written as one name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OsFilter {
    One(String),
    Many(Vec<String>),
}

impl OsFilter {
    fn names(&self) -> Vec<&str> {
        match self {
            OsFilter::One(name) => vec![name.as_str()],
            OsFilter::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// A saved command template from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomCommand {
    pub title: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsFilter>,
    /// Working directory; the workspace root when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

/// Canonical platform name: `windows` → `win32`, `mac`/`macos` → `darwin`.
pub fn normalize_os(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "windows" => "win32".to_string(),
        "mac" | "macos" => "darwin".to_string(),
        _ => lower,
    }
}

/// Platform of the running process, in the canonical naming.
pub fn current_platform() -> String {
    normalize_os(std::env::consts::OS)
}

impl CustomCommand {
    /// Title and command are both non-blank.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.command.trim().is_empty()
    }

    /// Whether the entry is offered on `platform`. No filter means everywhere.
    pub fn applies_to(&self, platform: &str) -> bool {
        let platform = normalize_os(platform);
        match &self.os {
            None => true,
            Some(filter) => filter.names().iter().any(|n| normalize_os(n) == platform),
        }
    }

    /// Resolve placeholders and split at the cursor marker.
    pub fn prepare<H: PlaceholderHost + ?Sized>(&self, host: &mut H, cursor_symbol: &str) -> Prepared {
        let resolved = resolve_placeholders(self.command.trim(), host);
        match split_at_cursor(&resolved, cursor_symbol) {
            (head, Some(tail)) => Prepared::Snippet {
                head: head.to_string(),
                tail: tail.to_string(),
            },
            (_, None) => Prepared::Run {
                dangerous: needs_confirmation(&resolved),
                command: resolved,
            },
        }
    }
}

/// A resolved command, ready for the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Prepared {
    /// Send and execute `command`; ask first when `dangerous`.
    Run { command: String, dangerous: bool },
    /// Type `head` without executing; `tail` is sent when the user finishes.
    Snippet { head: String, tail: String },
}

/// Split `text` at the first cursor marker.
///
/// An empty `symbol` falls back to [`DEFAULT_CURSOR_SYMBOL`].
pub fn split_at_cursor<'a>(text: &'a str, symbol: &str) -> (&'a str, Option<&'a str>) {
    let symbol = if symbol.is_empty() {
        DEFAULT_CURSOR_SYMBOL
    } else {
        symbol
    };
    match text.split_once(symbol) {
        Some((head, tail)) => (head, Some(tail)),
        None => (text, None),
    }
}

/// Remainders of `text` after each `git <ws>+ <sub>`.
fn after_git_subcommand<'a>(text: &'a str, sub: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.match_indices("git").filter_map(move |(idx, _)| {
        let rest = &text[idx + 3..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            return None;
        }
        trimmed.strip_prefix(sub)
    })
}

/// `-f` / `--force` as a whitespace-delimited word in `rest`.
fn has_force_flag(rest: &str) -> bool {
    let leading_space = rest.starts_with(char::is_whitespace);
    rest.split_whitespace()
        .enumerate()
        .any(|(i, word)| (i > 0 || leading_space) && (word == "-f" || word == "--force"))
}

/// Destructive git commands: `git reset --hard`, `git clean` with `-fd` or
/// `--force`, `git push` with `-f` or `--force`. Case is ignored.
pub fn needs_confirmation(command: &str) -> bool {
    let lower = command.to_lowercase();
    after_git_subcommand(&lower, "reset").any(|rest| {
        let flags = rest.trim_start();
        flags.len() < rest.len() && flags.starts_with("--hard")
    }) || after_git_subcommand(&lower, "clean")
        .any(|rest| rest.contains("-fd") || rest.contains("--force"))
        || after_git_subcommand(&lower, "push").any(has_force_flag)
}
