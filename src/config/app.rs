use super::defaults;
use serde::Deserialize;
use std::time::Duration;

/// Top-level engine configuration.
///
/// Owned by an external configuration collaborator; the engine reads it
/// as an immutable snapshot per apply cycle and never writes it back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    theming: ThemingConfig,
    #[serde(default)]
    conflicts: ConflictConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    pub fn theming(&self) -> &ThemingConfig {
        &self.theming
    }

    pub fn conflicts(&self) -> &ConflictConfig {
        &self.conflicts
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Which theme is active and which surfaces the engine may touch.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemingConfig {
    #[serde(default = "defaults::default_current_theme")]
    current_theme: String,
    #[serde(default = "defaults::default_true")]
    apply_to_shell: bool,
    #[serde(default = "defaults::default_true")]
    apply_to_document_surface: bool,
    #[serde(default)]
    use_title_bar_theming: bool,
    #[serde(default)]
    custom_style_override: String,
}

impl Default for ThemingConfig {
    fn default() -> Self {
        Self {
            current_theme: defaults::default_current_theme(),
            apply_to_shell: true,
            apply_to_document_surface: true,
            use_title_bar_theming: false,
            custom_style_override: String::new(),
        }
    }
}

impl ThemingConfig {
    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    pub fn apply_to_shell(&self) -> bool {
        self.apply_to_shell
    }

    pub fn apply_to_document_surface(&self) -> bool {
        self.apply_to_document_surface
    }

    pub fn use_title_bar_theming(&self) -> bool {
        self.use_title_bar_theming
    }

    /// Raw style text appended after compiled output on every apply cycle.
    pub fn custom_style_override(&self) -> &str {
        &self.custom_style_override
    }
}

/// Periodic conflict scanning settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConflictConfig {
    #[serde(default = "defaults::default_true")]
    enabled: bool,
    #[serde(default = "defaults::default_scan_interval_secs")]
    scan_interval_secs: u64,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scan_interval_secs: defaults::default_scan_interval_secs(),
        }
    }
}

impl ConflictConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
