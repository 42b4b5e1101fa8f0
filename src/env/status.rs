//! Read-only summary of an env file for status displays.

use crate::env::parser::ParsedEnvFile;
use serde::Serialize;

/// Block names and which one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EnvSummary {
    pub blocks: Vec<String>,
    pub active: Option<String>,
    /// Blocks besides `active` that also have uncommented entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicting: Vec<String>,
}

impl EnvSummary {
    pub fn from_parsed(parsed: &ParsedEnvFile) -> Self {
        Self {
            blocks: parsed.blocks.iter().map(|b| b.name.clone()).collect(),
            active: parsed.active.clone(),
            conflicting: parsed
                .conflicting()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    /// Short status text: `env: n/a`, `env: none` or the active name.
    pub fn status_text(&self) -> String {
        if self.blocks.is_empty() {
            return "env: n/a".to_string();
        }
        match &self.active {
            Some(name) => name.clone(),
            None => "env: none".to_string(),
        }
    }

    /// Three-line tooltip: active header, block count, file path.
    pub fn tooltip(&self, display_path: &str) -> String {
        let header = match &self.active {
            Some(name) => format!("Active environment: {name}"),
            None => "No active environment detected".to_string(),
        };
        let count = match self.blocks.len() {
            1 => "1 environment block found".to_string(),
            n => format!("{n} environment blocks found"),
        };
        format!("{header}\n{count}\n{display_path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::parse_env_file;

    #[test]
    fn status_text_states() {
        let none = EnvSummary::from_parsed(&parse_env_file("A=1"));
        assert_eq!(none.status_text(), "env: n/a");

        let inactive = EnvSummary::from_parsed(&parse_env_file("# Dev\n# A=1\n"));
        assert_eq!(inactive.status_text(), "env: none");

        let active = EnvSummary::from_parsed(&parse_env_file("# Dev\nA=1\n"));
        assert_eq!(active.status_text(), "Dev");
        assert!(active.is_active("Dev"));
    }

    #[test]
    fn tooltip_pluralizes_block_count() {
        let one = EnvSummary::from_parsed(&parse_env_file("# Dev\nA=1\n"));
        assert_eq!(
            one.tooltip(".env.local"),
            "Active environment: Dev\n1 environment block found\n.env.local"
        );

        let two = EnvSummary::from_parsed(&parse_env_file("# Dev\n# A=1\n# Prod\n# A=2\n"));
        assert_eq!(
            two.tooltip("/srv/app/.env"),
            "No active environment detected\n2 environment blocks found\n/srv/app/.env"
        );
    }

    #[test]
    fn summary_json_omits_empty_conflicts() {
        let summary = EnvSummary::from_parsed(&parse_env_file("# Dev\nA=1\n# Prod\n# A=2\n"));
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"blocks":["Dev","Prod"],"active":"Dev"}"#);
    }
}
