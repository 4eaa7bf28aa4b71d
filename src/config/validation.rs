use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid scan_interval_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    ScanInterval {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid logging level: {configured}")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::ScanInterval {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Conflict scan interval out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update scan_interval_secs in config.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown logging level: '{configured}'\n\n\
                    Valid levels: trace, debug, info, warn, error\n\n\
                    Please update level in the [logging] section of config.toml."
                )
            }
        }
    }
}

impl From<ConfigValidationError> for crate::error::AppError {
    fn from(error: ConfigValidationError) -> Self {
        crate::error::AppError::Config(error.user_message())
    }
}

/// Bounds accepted for the conflict scan interval.
pub const MIN_SCAN_INTERVAL_SECS: u64 = 5;
pub const MAX_SCAN_INTERVAL_SECS: u64 = 3600;

/// Validate a loaded configuration, returning the first offending value.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigValidationError> {
    let interval = config.conflicts().scan_interval().as_secs();
    if !(MIN_SCAN_INTERVAL_SECS..=MAX_SCAN_INTERVAL_SECS).contains(&interval) {
        return Err(ConfigValidationError::ScanInterval {
            configured: interval,
            min_limit: MIN_SCAN_INTERVAL_SECS,
            max_limit: MAX_SCAN_INTERVAL_SECS,
        });
    }

    let level = config.logging().level().to_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        return Err(ConfigValidationError::LogLevel { configured: level });
    }

    Ok(())
}

/// Configuration loading result
#[derive(Clone)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
