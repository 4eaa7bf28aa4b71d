use crate::constants::CONFIG_FILE_NAME;
use config::{Config, Environment, File, FileFormat};

// Re-export all submodules
pub mod app;
pub mod defaults;
pub mod validation;

// Re-export main types
pub use app::{AppConfig, ConflictConfig, LoggingConfig, ThemingConfig};
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Global configuration loading and access
static CONFIG: std::sync::OnceLock<ConfigLoadResult> = std::sync::OnceLock::new();

fn load_config() -> ConfigLoadResult {
    dotenv::dotenv().ok();
    let env_source = Environment::with_prefix("VENEER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true);

    // The embedded defaults always parse; a config.toml in the working
    // directory overrides them, environment entries override both.
    let default_source = File::from_str(defaults::DEFAULT_CONFIG, FileFormat::Toml);
    let file_source = File::with_name(CONFIG_FILE_NAME).required(false);

    let config = match Config::builder()
        .add_source(default_source)
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => match validation::validate_config(&app_config) {
            Ok(()) => ConfigLoadResult::Success(Box::new(app_config)),
            Err(e) => ConfigLoadResult::DeserializeError(e.user_message()),
        },
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

pub fn get_config() -> &'static ConfigLoadResult {
    CONFIG.get_or_init(load_config)
}

/// Immutable theming snapshot for one apply cycle.
///
/// A broken configuration degrades to defaults with a warning; a theme
/// switch must never be fatal to the host.
pub fn theming_snapshot() -> ThemingConfig {
    match get_config() {
        ConfigLoadResult::Success(config) => config.theming().clone(),
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => {
            log::warn!("Using default theming configuration: {e}");
            ThemingConfig::default()
        }
    }
}

/// Immutable conflict-monitor snapshot.
pub fn conflicts_snapshot() -> ConflictConfig {
    match get_config() {
        ConfigLoadResult::Success(config) => config.conflicts().clone(),
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => {
            log::warn!("Using default conflict configuration: {e}");
            ConflictConfig::default()
        }
    }
}

/// Immutable logging snapshot used once at logger setup.
pub fn logging_snapshot() -> LoggingConfig {
    match get_config() {
        ConfigLoadResult::Success(config) => config.logging().clone(),
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => {
            eprintln!("Warning: using default logging configuration: {e}");
            LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshots_never_panic() {
        // Whatever the environment looks like, snapshot access degrades to
        // defaults instead of failing.
        let theming = theming_snapshot();
        assert!(!theming.current_theme().is_empty());

        let conflicts = conflicts_snapshot();
        assert!(conflicts.scan_interval().as_secs() > 0);

        let logging = logging_snapshot();
        assert!(!logging.level().is_empty());
    }
}
