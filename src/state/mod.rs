//! "Last used" state kept between runs.
//!
//! The engines take every choice as an argument; this store is where the
//! command-line host remembers them.

pub mod store;

pub use store::{default_state_path, LastCommand, LastUsed, StateError, StateStore, STATE_ENV_VAR};
