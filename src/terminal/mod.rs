//! Custom terminal commands.
//!
//! Templates come from the configuration; placeholder values come from a
//! [`PlaceholderHost`]. Creating and driving the terminal is the host's job.

mod command;
mod history;
mod placeholder;

pub use command::{
    current_platform, needs_confirmation, normalize_os, split_at_cursor, CustomCommand, OsFilter,
    Prepared, DEFAULT_CURSOR_SYMBOL,
};
pub use history::{CommandHistory, HistoryEntry, DEFAULT_HISTORY_SIZE};
pub use placeholder::{resolve_placeholders, shell_escape_posix, PlaceholderHost};
