//! Configuration module.
//!
//! Settings come from defaults, an optional TOML file, `TOOLBELT_*`
//! environment variables and command-line flags, in increasing precedence,
//! and are validated once into [`Settings`].

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, resolve_settings, CliOverrides,
    ConfigError, ConfigFile, ResolvedConfig, Settings,
};
