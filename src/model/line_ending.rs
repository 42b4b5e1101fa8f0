//! File-wide line terminator.

use serde::Serialize;

/// Terminator used when a parsed file is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LineEnding {
    #[default]
    #[serde(rename = "\n")]
    Lf,
    #[serde(rename = "\r\n")]
    CrLf,
}

impl LineEnding {
    /// `CrLf` if `text` contains `\r\n` anywhere, `Lf` otherwise.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}
