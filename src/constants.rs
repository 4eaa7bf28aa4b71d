//! Global constants shared across the engine.

/// Environment variable overriding the themes directory location.
pub mod env_vars {
    /// Absolute or relative path to the directory holding theme files.
    pub const THEMES_DIR: &str = "VENEER_THEMES_DIR";
}

/// File extension of on-disk theme definitions.
pub const THEME_FILE_EXTENSION: &str = "json";

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log file when none is configured.
pub const DEFAULT_LOG_FILE: &str = "veneer.log";
