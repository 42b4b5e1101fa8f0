//! Env Block Parser / Switcher.
//!
//! Switching is two calls on purpose: list with [`parse_env_file`], then
//! re-read the file and call [`plan_switch`] on the fresh text. Disk access
//! lives in [`crate::source::EnvFile`].

mod parser;
mod status;
mod switcher;

pub use parser::{parse_env_file, EnvBlock, EnvEntry, ParsedEnvFile};
pub use status::EnvSummary;
pub use switcher::{plan_switch, rewrite, SwitchOutcome};
