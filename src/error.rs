use std::fmt::Display;

/// Application-wide error types for the theming engine.
///
/// This enum provides error classification for all engine operations
/// including theme loading, style compilation, cache access and host
/// surface mutation. Each variant carries a human-readable message; the
/// subsystem-specific error types (`ThemeValidationError`,
/// `ConfigValidationError`, `ApplyError`) convert into these variants at
/// the module boundary.
///
/// # Error Categories
///
/// - [`Validation`] - malformed theme source (non-object input, missing name)
/// - [`Compile`] - style compilation defects (unreachable for validated input)
/// - [`Apply`] - every application mechanism failed for a context
/// - [`Cache`] - cache lookup/store problems (absorbed internally, never user-visible)
/// - [`Config`] - configuration loading and validation errors
/// - [`Surface`] - host surface access failures outside an apply cycle
///
/// No error in this engine is fatal to the host process. The worst-case
/// outcome of any failure is "theme not applied, previous appearance
/// retained".
///
/// [`Validation`]: AppError::Validation
/// [`Compile`]: AppError::Compile
/// [`Apply`]: AppError::Apply
/// [`Cache`]: AppError::Cache
/// [`Config`]: AppError::Config
/// [`Surface`]: AppError::Surface
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Malformed theme source data.
    ///
    /// Raised only when the raw input is not a well-formed mapping or the
    /// `name` field is absent or empty. Missing color keys are never a
    /// validation failure; they are filled from the defaulting table.
    Validation(String),

    /// Style compilation failure.
    ///
    /// Validated input cannot fail to compile; reaching this variant
    /// indicates a compiler defect and should be reported as a bug.
    Compile(String),

    /// Every application mechanism failed for a surface context.
    ///
    /// Reported per-context so that a title-bar failure does not block
    /// shell or document-surface application.
    Apply(String),

    /// Cache lookup or store failure.
    ///
    /// Always absorbed internally and degraded to direct recompilation;
    /// callers log it at debug level and continue.
    Cache(String),

    /// Configuration loading and validation errors.
    Config(String),

    /// Host surface access failure outside an apply cycle
    /// (e.g. snapshot getters during restore).
    Surface(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::Compile(msg) => write!(f, "Compile Error: {msg}"),
            AppError::Apply(msg) => write!(f, "Apply Error: {msg}"),
            AppError::Cache(msg) => write!(f, "Cache Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Surface(msg) => write!(f, "Surface Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;

/// Error severity levels for appropriate reporting
#[derive(Debug, Clone)]
pub enum ErrorSeverity {
    /// Warning severity - logged, theme keeps working with fallbacks
    Warning,
    /// High severity - logged, the affected operation is abandoned
    Error,
}

/// Context information for errors
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub technical_details: Option<String>,
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    /// Create new error context with component and operation
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            technical_details: None,
            severity: ErrorSeverity::Error,
        }
    }

    /// Builder pattern method for adding technical details
    pub fn with_technical_details(mut self, details: &str) -> Self {
        self.technical_details = Some(details.to_string());
        self
    }

    /// Builder pattern method for setting severity
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Central error reporting helper.
///
/// The engine has no UI of its own; reporting means structured logging
/// with component/operation context so the host's diagnostics can pick
/// it up.
#[derive(Clone, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    /// Report a simple error with basic context
    pub fn report_simple(&self, error: &AppError, component: &str, operation: &str) {
        let context =
            ErrorContext::new(component, operation).with_technical_details(&error.to_string());
        self.report(error, context);
    }

    /// Report a warning (logged, not treated as an operation failure)
    pub fn report_warning(&self, error: &AppError, component: &str, operation: &str) {
        let context = ErrorContext::new(component, operation)
            .with_severity(ErrorSeverity::Warning)
            .with_technical_details(&error.to_string());
        self.report(error, context);
    }

    /// Report error with full context
    pub fn report(&self, error: &AppError, context: ErrorContext) {
        match context.severity {
            ErrorSeverity::Warning => {
                log::warn!(
                    "[{}:{}] {} {}",
                    context.component,
                    context.operation,
                    error,
                    context.technical_details.as_deref().unwrap_or("")
                );
            }
            ErrorSeverity::Error => {
                log::error!(
                    "[{}:{}] {} {}",
                    context.component,
                    context.operation,
                    error,
                    context.technical_details.as_deref().unwrap_or("")
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_category() {
        let err = AppError::Validation("name is empty".to_string());
        assert_eq!(err.to_string(), "Validation Error: name is empty");

        let err = AppError::Apply("all mechanisms failed".to_string());
        assert!(err.to_string().starts_with("Apply Error"));
    }

    #[test]
    fn test_error_context_builder() {
        let context = ErrorContext::new("Cache", "get_or_compile")
            .with_technical_details("storage unavailable")
            .with_severity(ErrorSeverity::Warning);

        assert_eq!(context.component, "Cache");
        assert_eq!(context.operation, "get_or_compile");
        assert_eq!(
            context.technical_details.as_deref(),
            Some("storage unavailable")
        );
    }
}
