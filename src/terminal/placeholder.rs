//! `${...}` placeholder substitution for command templates.
//!
//! | Placeholder           | Value                                       |
//! |-----------------------|---------------------------------------------|
//! | `${input:Label}`      | Prompted text, asked once per template      |
//! | `${pick:Label\|a\|b}` | One of the listed options                   |
//! | `${env:KEY}`          | Process environment variable, empty if unset |
//! | `${workspaceFolder}`  | Workspace root, empty without one           |
//! | `${clipboard}`        | Clipboard text                              |
//!
//! Substituted values are single-quoted for POSIX shells. Anything else in
//! `${...}` is left exactly as written.

use std::collections::HashMap;

/// Source of placeholder values; the host's prompts and environment.
///
/// `None` from a prompt means the user dismissed it; the placeholder then
/// becomes an empty quoted string.
pub trait PlaceholderHost {
    fn input(&mut self, label: &str) -> Option<String>;
    fn pick(&mut self, label: &str, options: &[&str]) -> Option<String>;
    fn env(&self, key: &str) -> Option<String>;
    fn workspace_folder(&self) -> Option<String>;
    fn clipboard(&mut self) -> Option<String>;
}

/// Quote `value` for a POSIX shell.
///
/// ```
/// use toolbelt::terminal::shell_escape_posix;
///
/// assert_eq!(shell_escape_posix("it's"), r#"'it'\''s'"#);
/// ```
pub fn shell_escape_posix(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn substitute<H: PlaceholderHost + ?Sized>(
    whole: &str,
    body: &str,
    host: &mut H,
    inputs: &mut HashMap<String, String>,
) -> String {
    if let Some(label) = body.strip_prefix("input:") {
        if let Some(cached) = inputs.get(whole) {
            return cached.clone();
        }
        let escaped = shell_escape_posix(&host.input(label).unwrap_or_default());
        inputs.insert(whole.to_string(), escaped.clone());
        return escaped;
    }
    if let Some(rest) = body.strip_prefix("pick:") {
        let mut parts = rest.split('|');
        let label = parts.next().unwrap_or_default();
        let options: Vec<&str> = parts.collect();
        return shell_escape_posix(&host.pick(label, &options).unwrap_or_default());
    }
    if let Some(key) = body.strip_prefix("env:") {
        return shell_escape_posix(&host.env(key).unwrap_or_default());
    }
    match body {
        "workspaceFolder" => shell_escape_posix(&host.workspace_folder().unwrap_or_default()),
        "clipboard" => shell_escape_posix(&host.clipboard().unwrap_or_default()),
        _ => whole.to_string(),
    }
}

/// Replace every `${...}` in `template`, left to right.
///
/// A `${` without a closing `}`, or with nothing inside, is copied verbatim.
pub fn resolve_placeholders<H: PlaceholderHost + ?Sized>(template: &str, host: &mut H) -> String {
    let mut inputs = HashMap::new();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("${") {
        let after = &rest[open + 2..];
        match after.find('}') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                let whole = &rest[open..open + 2 + close + 1];
                out.push_str(&substitute(whole, &after[..close], host, &mut inputs));
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..open + 2]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
