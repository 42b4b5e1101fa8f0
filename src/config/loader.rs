//! Configuration file loading with precedence handling.

use crate::convert::{clamp_precision, parse_screens};
use crate::model::{Axis, OutputUnit, Screen};
use crate::scripts::{WorkspaceMode, DEFAULT_MAX_BUTTONS};
use crate::terminal::{CustomCommand, DEFAULT_CURSOR_SYMBOL, DEFAULT_HISTORY_SIZE};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "TOOLBELT_CONFIG";
/// Environment variable selecting the screen for one run.
pub const SCREEN_ENV_VAR: &str = "TOOLBELT_SCREEN";
/// Environment variable overriding the precision.
pub const PRECISION_ENV_VAR: &str = "TOOLBELT_PRECISION";
/// Environment variable overriding the base font size.
pub const BASE_FONT_SIZE_ENV_VAR: &str = "TOOLBELT_BASE_FONT_SIZE";
/// Environment variable overriding the env block file.
pub const ENV_FILE_ENV_VAR: &str = "TOOLBELT_ENV_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range or malformed.
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted setting name, e.g. `converter.screens`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/toolbelt/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    #[serde(default)]
    pub converter: ConverterSection,

    #[serde(default)]
    pub env: EnvSection,

    #[serde(default)]
    pub scripts: ScriptsSection,

    #[serde(default)]
    pub terminal: TerminalSection,
}

/// `[converter]`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConverterSection {
    /// `WIDTHxHEIGHT` strings, first one is the default.
    pub screens: Option<Vec<String>>,
    pub base_font_size: Option<f64>,
    pub precision: Option<i32>,
    pub auto_detect_axis: Option<bool>,
    pub default_axis: Option<Axis>,
    pub default_output_unit: Option<OutputUnit>,
}

/// `[env]`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnvSection {
    /// Env block file; `~/` and workspace-relative paths allowed.
    pub file: Option<String>,
}

/// `[scripts]`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScriptsSection {
    pub exclude: Option<Vec<String>>,
    pub order: Option<Vec<String>>,
    pub max_buttons: Option<usize>,
    /// `first`, `all` or `pick`.
    pub workspace_mode: Option<WorkspaceMode>,
}

/// `[terminal]` and its `[[terminal.commands]]` entries.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TerminalSection {
    pub cursor_symbol: Option<String>,
    pub confirm_dangerous: Option<bool>,
    pub history_size: Option<usize>,
    pub commands: Option<Vec<CustomCommand>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args. Values
/// are still raw here; [`ResolvedConfig::validate`] checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    pub screens: Vec<String>,
    /// Screen picked for this run (`--screen` / `TOOLBELT_SCREEN`).
    pub screen: Option<String>,
    pub base_font_size: f64,
    pub precision: i32,
    pub auto_detect_axis: bool,
    pub default_axis: Axis,
    pub default_output_unit: OutputUnit,
    pub env_file: String,
    pub script_exclude: Vec<String>,
    pub script_order: Vec<String>,
    pub max_buttons: usize,
    pub workspace_mode: WorkspaceMode,
    pub cursor_symbol: String,
    pub confirm_dangerous: bool,
    pub history_size: usize,
    pub commands: Vec<CustomCommand>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            screens: vec!["1440x900".to_string()],
            screen: None,
            base_font_size: 16.0,
            precision: 4,
            auto_detect_axis: true,
            default_axis: Axis::Vw,
            default_output_unit: OutputUnit::Px,
            env_file: ".env.local".to_string(),
            script_exclude: Vec::new(),
            script_order: ["dev", "start", "build", "test", "lint"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_buttons: DEFAULT_MAX_BUTTONS,
            workspace_mode: WorkspaceMode::First,
            cursor_symbol: DEFAULT_CURSOR_SYMBOL.to_string(),
            confirm_dangerous: true,
            history_size: DEFAULT_HISTORY_SIZE,
            commands: Vec::new(),
        }
    }
}

/// Configuration checked once at the boundary, with typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_file_path: PathBuf,
    /// Never empty.
    pub screens: Vec<Screen>,
    pub screen_override: Option<Screen>,
    /// Finite and positive.
    pub base_font_size: f64,
    /// Within `0..=8`.
    pub precision: i32,
    pub auto_detect_axis: bool,
    pub default_axis: Axis,
    pub default_output_unit: OutputUnit,
    pub env_file: String,
    pub script_exclude: Vec<String>,
    pub script_order: Vec<String>,
    pub max_buttons: usize,
    pub workspace_mode: WorkspaceMode,
    pub cursor_symbol: String,
    pub confirm_dangerous: bool,
    pub history_size: usize,
    /// Valid entries only; blank ones are dropped with a warning.
    pub commands: Vec<CustomCommand>,
}

impl ResolvedConfig {
    /// Check ranges and parse screens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty or malformed screen list,
    /// a malformed screen override, or a base font size that is not a
    /// positive finite number. Precision is clamped, not rejected.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let screens = parse_screens(&self.screens).map_err(|e| ConfigError::Invalid {
            field: "converter.screens",
            reason: e.to_string(),
        })?;
        let screen_override = self
            .screen
            .as_deref()
            .map(Screen::parse)
            .transpose()
            .map_err(|e| ConfigError::Invalid {
                field: "screen",
                reason: e.to_string(),
            })?;
        if !(self.base_font_size.is_finite() && self.base_font_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "converter.base_font_size",
                reason: format!("{} is not a positive number", self.base_font_size),
            });
        }
        let precision = clamp_precision(self.precision) as i32;
        if precision != self.precision {
            warn!(configured = self.precision, used = precision, "precision clamped");
        }
        let commands = self
            .commands
            .into_iter()
            .filter(|c| {
                let valid = c.is_valid();
                if !valid {
                    warn!(title = %c.title, "ignoring custom command with blank title or command");
                }
                valid
            })
            .collect();

        Ok(Settings {
            log_file_path: self.log_file_path,
            screens,
            screen_override,
            base_font_size: self.base_font_size,
            precision,
            auto_detect_axis: self.auto_detect_axis,
            default_axis: self.default_axis,
            default_output_unit: self.default_output_unit,
            env_file: self.env_file,
            script_exclude: self.script_exclude,
            script_order: self.script_order,
            max_buttons: if self.max_buttons == 0 {
                DEFAULT_MAX_BUTTONS
            } else {
                self.max_buttons
            },
            workspace_mode: self.workspace_mode,
            cursor_symbol: if self.cursor_symbol.is_empty() {
                DEFAULT_CURSOR_SYMBOL.to_string()
            } else {
                self.cursor_symbol
            },
            confirm_dangerous: self.confirm_dangerous,
            history_size: if self.history_size == 0 {
                DEFAULT_HISTORY_SIZE
            } else {
                self.history_size
            },
            commands,
        })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/toolbelt/toolbelt.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("toolbelt").join("toolbelt.log")
    } else {
        PathBuf::from("toolbelt.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/toolbelt/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("toolbelt").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TOOLBELT_CONFIG` environment variable
/// 3. Default path `~/.config/toolbelt/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Read `name` and parse it, warning and ignoring values that do not parse.
fn parsed_env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TOOLBELT_SCREEN`: screen for this run
/// - `TOOLBELT_PRECISION`: precision
/// - `TOOLBELT_BASE_FONT_SIZE`: base font size
/// - `TOOLBELT_ENV_FILE`: env block file
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(screen) = std::env::var(SCREEN_ENV_VAR) {
        config.screen = Some(screen);
    }
    if let Some(precision) = parsed_env_var(PRECISION_ENV_VAR) {
        config.precision = precision;
    }
    if let Some(size) = parsed_env_var(BASE_FONT_SIZE_ENV_VAR) {
        config.base_font_size = size;
    }
    if let Ok(file) = std::env::var(ENV_FILE_ENV_VAR) {
        config.env_file = file;
    }
    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };
    let ConfigFile {
        log_file_path,
        converter,
        env,
        scripts,
        terminal,
    } = config;

    ResolvedConfig {
        log_file_path: log_file_path.unwrap_or(defaults.log_file_path),
        screens: converter.screens.unwrap_or(defaults.screens),
        screen: defaults.screen,
        base_font_size: converter.base_font_size.unwrap_or(defaults.base_font_size),
        precision: converter.precision.unwrap_or(defaults.precision),
        auto_detect_axis: converter
            .auto_detect_axis
            .unwrap_or(defaults.auto_detect_axis),
        default_axis: converter.default_axis.unwrap_or(defaults.default_axis),
        default_output_unit: converter
            .default_output_unit
            .unwrap_or(defaults.default_output_unit),
        env_file: env.file.unwrap_or(defaults.env_file),
        script_exclude: scripts.exclude.unwrap_or(defaults.script_exclude),
        script_order: scripts.order.unwrap_or(defaults.script_order),
        max_buttons: scripts.max_buttons.unwrap_or(defaults.max_buttons),
        workspace_mode: scripts.workspace_mode.unwrap_or(defaults.workspace_mode),
        cursor_symbol: terminal.cursor_symbol.unwrap_or(defaults.cursor_symbol),
        confirm_dangerous: terminal
            .confirm_dangerous
            .unwrap_or(defaults.confirm_dangerous),
        history_size: terminal.history_size.unwrap_or(defaults.history_size),
        commands: terminal.commands.unwrap_or(defaults.commands),
    }
}

/// Command-line flags that override configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub screen: Option<String>,
    pub precision: Option<i32>,
    pub base_font_size: Option<f64>,
    pub env_file: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(screen) = cli.screen {
        config.screen = Some(screen);
    }
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(size) = cli.base_font_size {
        config.base_font_size = size;
    }
    if let Some(file) = cli.env_file {
        config.env_file = file;
    }
    config
}

/// Full precedence chain: load, merge, env vars, CLI flags, validate.
pub fn resolve_settings(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<Settings, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let resolved = apply_cli_overrides(apply_env_overrides(merge_config(file)), cli);
    resolved.validate()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
