//! Structural parser for env block files.
//!
//! ```text
//! # Local                      <- header: comment with no '='
//! API_URL=http://local         <- active entry
//! # Staging
//! # API_URL=http://staging     <- commented entry
//! ```
//!
//! Lines before the first header, and lines under a header that hold no
//! `=`, are inert: they are kept in [`ParsedEnvFile::lines`] but never
//! tracked, so a rewrite passes them through untouched.

use crate::model::LineEnding;
use serde::Serialize;
use tracing::warn;

/// One `key=value` line owned by a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvEntry {
    /// Index into [`ParsedEnvFile::lines`].
    pub line_index: usize,
    pub indent: String,
    /// Uncommented form, e.g. `API_URL=http://local`.
    pub body: String,
    pub commented: bool,
}

impl EnvEntry {
    /// The source line with the entry enabled.
    pub fn enabled_line(&self) -> String {
        format!("{}{}", self.indent, self.body)
    }

    /// The source line with the entry disabled, always `# ` after the indent.
    pub fn disabled_line(&self) -> String {
        format!("{}# {}", self.indent, self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvBlock {
    /// Header text; never empty, never contains `=`.
    pub name: String,
    pub entries: Vec<EnvEntry>,
}

impl EnvBlock {
    /// A block is live when at least one of its entries is uncommented.
    pub fn has_active_entry(&self) -> bool {
        self.entries.iter().any(|e| !e.commented)
    }
}

/// Result of [`parse_env_file`]. Built fresh on every parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEnvFile {
    pub eol: LineEnding,
    #[serde(skip)]
    pub lines: Vec<String>,
    pub blocks: Vec<EnvBlock>,
    /// First block, in file order, with an uncommented entry.
    pub active: Option<String>,
}

impl ParsedEnvFile {
    pub fn block(&self, name: &str) -> Option<&EnvBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn block_names(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.name.as_str()).collect()
    }

    /// Live blocks after the first one.
    ///
    /// A hand-edited file can enable entries in several blocks at once; only
    /// the first counts as active and the rest are reported here.
    pub fn conflicting(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter(|b| b.has_active_entry())
            .skip(1)
            .map(|b| b.name.as_str())
            .collect()
    }

    /// The line buffer joined with the file's own terminator.
    pub fn render(&self) -> String {
        self.lines.join(self.eol.as_str())
    }
}

/// `Some(name)` when `line` is a block header.
fn header_name(line: &str) -> Option<&str> {
    let comment = line.trim().strip_prefix('#')?.trim_start();
    (!comment.is_empty() && !comment.contains('=')).then_some(comment)
}

fn parse_entry(line_index: usize, line: &str) -> Option<EnvEntry> {
    let rest = line.trim_start();
    let indent = &line[..line.len() - rest.len()];
    let (body, commented) = match rest.strip_prefix('#') {
        Some(after) => (after.trim_start(), true),
        None => (rest, false),
    };
    if !body.contains('=') {
        return None;
    }
    Some(EnvEntry {
        line_index,
        indent: indent.to_string(),
        body: body.to_string(),
        commented,
    })
}

/// Parse `text` into blocks of entries.
///
/// Never fails: text without headers yields no blocks.
pub fn parse_env_file(text: &str) -> ParsedEnvFile {
    let eol = LineEnding::detect(text);
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    let mut blocks: Vec<EnvBlock> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if let Some(name) = header_name(line) {
            blocks.push(EnvBlock {
                name: name.to_string(),
                entries: Vec::new(),
            });
            continue;
        }
        let Some(current) = blocks.last_mut() else {
            continue;
        };
        if let Some(entry) = parse_entry(index, line) {
            current.entries.push(entry);
        }
    }

    let active = blocks
        .iter()
        .find(|b| b.has_active_entry())
        .map(|b| b.name.clone());

    let parsed = ParsedEnvFile {
        eol,
        lines,
        blocks,
        active,
    };
    let conflicting = parsed.conflicting();
    if !conflicting.is_empty() {
        warn!(
            active = parsed.active.as_deref().unwrap_or_default(),
            ?conflicting,
            "several env blocks have uncommented entries"
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Local\nAPI_URL=http://local\n# Staging\n# API_URL=http://staging\n";

    #[test]
    fn parses_blocks_and_active_name() {
        let parsed = parse_env_file(SAMPLE);
        assert_eq!(parsed.block_names(), vec!["Local", "Staging"]);
        assert_eq!(parsed.active.as_deref(), Some("Local"));
        assert_eq!(parsed.eol, LineEnding::Lf);

        let staging = parsed.block("Staging").unwrap();
        assert_eq!(
            staging.entries,
            vec![EnvEntry {
                line_index: 3,
                indent: String::new(),
                body: "API_URL=http://staging".to_string(),
                commented: true,
            }]
        );
    }

    #[test]
    fn no_headers_no_blocks() {
        let parsed = parse_env_file("API_URL=x\nDEBUG=1\n");
        assert!(parsed.blocks.is_empty());
        assert_eq!(parsed.active, None);
    }

    #[test]
    fn lines_before_first_header_are_ignored() {
        let parsed = parse_env_file("TOP=1\n# Dev\nA=1\n");
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.blocks[0].entries.len(), 1);
        assert_eq!(parsed.blocks[0].entries[0].line_index, 2);
    }

    #[test]
    fn comment_with_equals_is_an_entry_not_a_header() {
        let parsed = parse_env_file("# Dev\n#KEY=1\n  #   OTHER = 2\n");
        let entries = &parsed.blocks[0].entries;
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(entries[0].body, "KEY=1");
        assert_eq!(entries[1].indent, "  ");
        assert_eq!(entries[1].body, "OTHER = 2");
        assert!(entries.iter().all(|e| e.commented));
        assert_eq!(parsed.active, None);
    }

    #[test]
    fn bare_hash_and_blank_lines_are_inert() {
        let parsed = parse_env_file("# Dev\n#\n\nA=1\nnot an entry\n");
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.blocks[0].entries.len(), 1);
    }

    #[test]
    fn header_name_is_trimmed() {
        let parsed = parse_env_file("   #   Production EU   \nA=1\n");
        assert_eq!(parsed.block_names(), vec!["Production EU"]);
    }

    #[test]
    fn crlf_is_detected_and_stripped() {
        let parsed = parse_env_file("# A\r\nX=1\r\n# B\r\n# X=2\r\n");
        assert_eq!(parsed.eol, LineEnding::CrLf);
        assert_eq!(parsed.blocks[0].entries[0].body, "X=1");
        assert_eq!(parsed.render(), "# A\r\nX=1\r\n# B\r\n# X=2\r\n");
    }

    #[test]
    fn render_round_trips_untouched_text() {
        let text = "intro\n# Dev\n  A=1\n\n# note without equals\ntrailing";
        assert_eq!(parse_env_file(text).render(), text);
    }

    #[test]
    fn several_live_blocks_report_first_and_list_the_rest() {
        let parsed = parse_env_file("# A\nX=1\n# B\nX=2\n# C\nX=3\n");
        assert_eq!(parsed.active.as_deref(), Some("A"));
        assert_eq!(parsed.conflicting(), vec!["B", "C"]);
    }
}
