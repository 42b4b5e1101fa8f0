//! Error types for toolbelt.
//!
//! This module defines the error taxonomy using `thiserror`. Engine functions
//! themselves never fail for "nothing matched": scanners and converters return
//! `Option` and callers skip the occurrence. The enums here cover the failures
//! a host has to surface to the user.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error of the command-line host
//!   - [`ConversionError`] - Converter settings are unusable (no screens, bad screen)
//!   - [`InputError`] - Env file or manifest could not be located or read
//!   - [`EnvError`] - Env switch failed (block vanished, file unreadable)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file unreadable or invalid
//!   - [`ManifestError`](crate::scripts::ManifestError) - `package.json` unreadable
//!   - [`StateError`](crate::state::StateError) - Last-used store unreadable
//!
//! # Recovery Strategy
//!
//! Every failure is scoped to one invocation. Parse failures abort only the
//! unit of work they belong to, configuration errors point at settings rather
//! than input text, and a vanished env block forces the caller to re-read the
//! file before offering a new choice.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the command-line host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Converter configuration is unusable.
    #[error("Converter configuration error: {0}")]
    Conversion(#[from] ConversionError),

    /// Failed to locate or read an input file.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Env block switching failed.
    #[error("Env switch failed: {0}")]
    Env(#[from] EnvError),

    /// Configuration file could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Project manifest could not be loaded.
    #[error("Manifest error: {0}")]
    Manifest(#[from] crate::scripts::ManifestError),

    /// Last-used state could not be loaded or saved.
    #[error("State error: {0}")]
    State(#[from] crate::state::StateError),

    /// A command-line argument was rejected after parsing.
    #[error("Invalid argument: {0}")]
    Usage(String),

    /// Terminal I/O (stdin prompts, stdout) failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// A `WIDTHxHEIGHT` screen string was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// Text does not follow the `WIDTHxHEIGHT` grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolbelt::model::Screen;
    ///
    /// let err = Screen::parse("1440 by 900").unwrap_err();
    /// assert!(err.to_string().contains("WIDTHxHEIGHT"));
    /// ```
    #[error("Invalid screen format: {0}. Expected WIDTHxHEIGHT like 1440x1024")]
    Malformed(String),

    /// One of the dimensions is zero.
    #[error("Screen {0} has a zero dimension")]
    ZeroDimension(String),
}

/// Converter settings cannot be used for a conversion.
///
/// These point at the configuration, not at the text being converted, and are
/// reported separately from "no convertible value found".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The configured screen list is empty.
    #[error("No screens configured. Add entries under [converter] screens (e.g. \"1440x1024\")")]
    NoScreens,

    /// A screen string failed to parse.
    #[error(transparent)]
    Screen(#[from] ScreenError),

    /// The requested screen is not in the configured list.
    #[error("Screen {0} is not in the configured screen list")]
    UnknownScreen(String),
}

/// Errors encountered when locating or reading host files.
#[derive(Debug, Error)]
pub enum InputError {
    /// No env file is configured, or a relative path was given without a workspace.
    ///
    /// Hosts treat this as "no environment configured" and stay quiet.
    #[error("No env file configured")]
    NotConfigured,

    /// The file does not exist at the resolved path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use toolbelt::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.env")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.env"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The resolved path that was attempted.
        path: PathBuf,
    },

    /// Any other I/O failure (permissions, invalid UTF-8, disk errors).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors of the env block switch protocol.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The target block was present when listed but is gone after re-reading.
    ///
    /// The file changed between the pick and the switch; callers must re-parse
    /// before offering another choice.
    #[error("Block '{name}' disappeared")]
    BlockDisappeared {
        /// Name of the block that was requested.
        name: String,
    },

    /// Reading or writing the env file failed.
    #[error(transparent)]
    Input(#[from] InputError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn screen_error_malformed_display() {
        let err = ScreenError::Malformed("abc".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid screen format: abc"));
        assert!(msg.contains("WIDTHxHEIGHT"));
    }

    #[test]
    fn conversion_error_is_transparent_over_screen_error() {
        let err: ConversionError = ScreenError::ZeroDimension("0x900".to_string()).into();
        assert_eq!(err.to_string(), "Screen 0x900 has a zero dimension");
    }

    #[test]
    fn input_error_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let input_err: InputError = io_err.into();
        let msg = input_err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn env_error_block_disappeared_display() {
        let err = EnvError::BlockDisappeared {
            name: "Staging".to_string(),
        };
        assert_eq!(err.to_string(), "Block 'Staging' disappeared");
    }

    #[test]
    fn app_error_from_conversion_error() {
        let app_err: AppError = ConversionError::NoScreens.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Converter configuration error"));
        assert!(msg.contains("No screens configured"));
    }

    #[test]
    fn app_error_nested_io_through_env_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let env_err: EnvError = InputError::from(io_err).into();
        let app_err: AppError = env_err.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Env switch failed"));
        assert!(msg.contains("IO error"));
        assert!(msg.contains("gone"));
    }
}
