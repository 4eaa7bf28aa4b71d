use crate::error::AppError;
use crate::theme::types::{DEFAULT_COLORS, ThemeDefinition};
use crate::validation::Validator;
use std::path::PathBuf;

/// Validation errors specific to theme operations
#[derive(Debug, Clone)]
pub enum ThemeValidationError {
    NotAnObject { found: String },
    MissingName,
    InvalidThemeId { id: String, reason: String },
    InvalidThemePath { path: String, reason: String },
    InvalidFileExtension { path: String, expected: String },
    IncompleteDefinition { missing_key: String },
}

impl ThemeValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeValidationError::NotAnObject { found } => {
                format!(
                    "Theme source is not an object (found {found}).\n\n\
                    Theme files must be a mapping with at least a 'name' field."
                )
            }
            ThemeValidationError::MissingName => "Theme source has no 'name' field.\n\n\
                Every theme must carry a non-empty display name."
                .to_string(),
            ThemeValidationError::InvalidThemeId { id, reason } => {
                format!(
                    "Invalid theme id: '{id}'\n\n\
                    Reason: {reason}\n\n\
                    Please use valid theme ids (alphanumeric, hyphens, underscores only)."
                )
            }
            ThemeValidationError::InvalidThemePath { path, reason } => {
                format!(
                    "Invalid theme path: '{path}'\n\n\
                    Reason: {reason}\n\n\
                    Please ensure the path exists and is accessible."
                )
            }
            ThemeValidationError::InvalidFileExtension { path, expected } => {
                format!(
                    "Invalid file extension for: '{path}'\n\n\
                    Expected: '{expected}' files\n\n\
                    Please ensure theme files have the correct extension."
                )
            }
            ThemeValidationError::IncompleteDefinition { missing_key } => {
                format!(
                    "Theme definition is missing '{missing_key}' after defaulting.\n\n\
                    This indicates a loader defect; please report it."
                )
            }
        }
    }
}

impl From<ThemeValidationError> for AppError {
    fn from(error: ThemeValidationError) -> Self {
        AppError::Validation(error.user_message())
    }
}

/// Validator for theme ids (file stems of on-disk themes)
pub struct ThemeIdValidator;

impl Validator<str> for ThemeIdValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.is_empty() {
            return Err(ThemeValidationError::InvalidThemeId {
                id: input.to_string(),
                reason: "Id cannot be empty".to_string(),
            });
        }

        if input.len() > 50 {
            return Err(ThemeValidationError::InvalidThemeId {
                id: input.to_string(),
                reason: "Id too long (max 50 characters)".to_string(),
            });
        }

        if !input
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ThemeValidationError::InvalidThemeId {
                id: input.to_string(),
                reason: "Id contains invalid characters (only alphanumeric, hyphens, and underscores allowed)".to_string(),
            });
        }

        if input.starts_with('-')
            || input.starts_with('_')
            || input.ends_with('-')
            || input.ends_with('_')
        {
            return Err(ThemeValidationError::InvalidThemeId {
                id: input.to_string(),
                reason: "Id cannot start or end with hyphens or underscores".to_string(),
            });
        }

        Ok(())
    }
}

/// Validator for on-disk theme paths
pub struct ThemePathValidator;

impl Validator<PathBuf> for ThemePathValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &PathBuf) -> Result<(), Self::Error> {
        if !input.exists() {
            return Err(ThemeValidationError::InvalidThemePath {
                path: input.display().to_string(),
                reason: "Path does not exist".to_string(),
            });
        }

        if !input.is_file() {
            return Err(ThemeValidationError::InvalidThemePath {
                path: input.display().to_string(),
                reason: "Path is not a file".to_string(),
            });
        }

        if input.extension().and_then(|s| s.to_str()) != Some(crate::constants::THEME_FILE_EXTENSION)
        {
            return Err(ThemeValidationError::InvalidFileExtension {
                path: input.display().to_string(),
                expected: crate::constants::THEME_FILE_EXTENSION.to_string(),
            });
        }

        Ok(())
    }
}

/// Validator for loaded theme definitions.
///
/// Checks the post-load invariants: non-empty name and a colors map that
/// covers every defaulting-table key.
pub struct DefinitionValidator;

impl Validator<ThemeDefinition> for DefinitionValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &ThemeDefinition) -> Result<(), Self::Error> {
        if input.name.trim().is_empty() {
            return Err(ThemeValidationError::MissingName);
        }

        for (key, _) in DEFAULT_COLORS {
            if !input.colors.contains_key(*key) {
                return Err(ThemeValidationError::IncompleteDefinition {
                    missing_key: key.to_string(),
                });
            }
        }

        Ok(())
    }
}
