//! Recently run commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capacity used when the configured size is zero.
pub const DEFAULT_HISTORY_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    /// The command as sent, placeholders resolved.
    pub command: String,
    pub at: DateTime<Utc>,
}

/// Newest-first list with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandHistory {
    entries: Vec<HistoryEntry>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a run at `at`, dropping the oldest entries beyond `capacity`
    /// (zero means [`DEFAULT_HISTORY_SIZE`]).
    pub fn push(&mut self, title: &str, command: &str, at: DateTime<Utc>, capacity: usize) {
        let capacity = if capacity == 0 {
            DEFAULT_HISTORY_SIZE
        } else {
            capacity
        };
        self.entries.insert(
            0,
            HistoryEntry {
                title: title.to_string(),
                command: command.to_string(),
                at,
            },
        );
        self.entries.truncate(capacity);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn newest_first_and_bounded() {
        let mut history = CommandHistory::new();
        for i in 0..4 {
            history.push("t", &format!("cmd {i}"), at(i), 3);
        }
        let commands: Vec<&str> = history.entries().iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["cmd 3", "cmd 2", "cmd 1"]);
        assert_eq!(history.latest().map(|e| e.at), Some(at(3)));
    }

    #[test]
    fn zero_capacity_means_default() {
        let mut history = CommandHistory::new();
        for i in 0..15 {
            history.push("t", "c", at(i), 0);
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut history = CommandHistory::new();
        history.push("Status", "git status", at(0), 10);
        let json = serde_json::to_string(&history).unwrap();
        assert!(json.starts_with("[{\"title\":\"Status\""));
        let back: CommandHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
