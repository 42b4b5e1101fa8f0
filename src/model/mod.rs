//! Domain model types (pure).
//!
//! All types in this module are plain data; parsing and formatting live in
//! the engine modules.

pub mod error;
pub mod line_ending;
pub mod screen;
pub mod token;
pub mod unit;

// Re-export for convenience
pub use error::{AppError, ConversionError, EnvError, InputError, ScreenError};
pub use line_ending::LineEnding;
pub use screen::Screen;
pub use token::{Token, TokenMatch};
pub use unit::{Axis, OutputUnit, Unit, ABSOLUTE_UNITS, SUFFIXED_UNITS, VIEWPORT_UNITS};
