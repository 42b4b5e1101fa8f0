//! toolbelt
//!
//! Editor productivity engines: a CSS unit converter (px/rem, viewport units,
//! Tailwind spacing steps) and a `.env` block switcher, plus the script runner
//! and custom terminal command support around them.
//!
//! The engines are pure functions over text. File access, configuration and
//! remembered choices sit in the outer modules, and `integration` ties them
//! together for the `toolbelt` binary.

pub mod config;
pub mod convert;
pub mod env;
pub mod logging;
pub mod model;
pub mod scripts;
pub mod source;
pub mod state;
pub mod terminal;

// Operations used by the binary
pub mod integration;

#[cfg(test)]
mod tests;
