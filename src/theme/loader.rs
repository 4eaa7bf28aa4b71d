use crate::constants::{THEME_FILE_EXTENSION, env_vars};
use crate::error::{AppError, AppResult};
use crate::theme::types::{
    Color, DEFAULT_COLORS, Kind, ThemeDefinition, TokenRule, TokenStyle,
};
use crate::theme::validation::{
    DefinitionValidator, ThemeIdValidator, ThemePathValidator, ThemeValidationError,
};
use crate::validation::Validator;
use serde_json::Value;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};

/// Load a theme definition from already-resident raw data.
///
/// The loader is deliberately lenient: real-world theme files are
/// frequently incomplete, so missing color keys are filled from the
/// defaulting table and malformed color values or token rules are
/// skipped with a warning. The only hard failures are a non-object
/// input and an absent or empty `name`.
pub fn load(raw: &Value) -> AppResult<ThemeDefinition> {
    let object = raw.as_object().ok_or_else(|| {
        AppError::from(ThemeValidationError::NotAnObject {
            found: json_type_name(raw).to_string(),
        })
    })?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::from(ThemeValidationError::MissingName))?
        .to_string();

    let mut colors = BTreeMap::new();
    if let Some(raw_colors) = object.get("colors").and_then(Value::as_object) {
        for (key, value) in raw_colors {
            match value.as_str().map(Color::parse) {
                Some(Ok(color)) => {
                    colors.insert(key.clone(), color);
                }
                Some(Err(reason)) => {
                    log::warn!("Theme '{name}': skipping color '{key}': {reason}");
                }
                None => {
                    log::warn!("Theme '{name}': skipping non-string color '{key}'");
                }
            }
        }
    }

    // Defaulting table: every listed key is present after this point.
    for (key, default) in DEFAULT_COLORS {
        colors.entry(key.to_string()).or_insert(*default);
    }

    let token_rules = object
        .get("tokenColors")
        .and_then(Value::as_array)
        .map(|entries| parse_token_rules(&name, entries))
        .unwrap_or_default();

    let kind = colors
        .get("editor.background")
        .copied()
        .map(Kind::classify)
        .unwrap_or(Kind::Unknown);

    let definition = ThemeDefinition {
        name,
        kind,
        colors,
        token_rules,
    };

    DefinitionValidator.validate(&definition)?;
    Ok(definition)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_token_rules(theme_name: &str, entries: &[Value]) -> Vec<TokenRule> {
    let mut rules = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Some(object) = entry.as_object() else {
            log::warn!("Theme '{theme_name}': token rule {index} is not an object, skipping");
            continue;
        };

        // Scope may be a single string or an array of strings.
        let scopes: Vec<String> = match object.get("scope") {
            Some(Value::String(scope)) => scope
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::Array(scopes)) => scopes
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => {
                log::warn!("Theme '{theme_name}': token rule {index} has no usable scope, skipping");
                continue;
            }
        };

        let Some(settings) = object.get("settings").and_then(Value::as_object) else {
            log::warn!("Theme '{theme_name}': token rule {index} has no settings, skipping");
            continue;
        };

        let foreground = settings
            .get("foreground")
            .and_then(Value::as_str)
            .and_then(|hex| match Color::parse(hex) {
                Ok(color) => Some(color),
                Err(reason) => {
                    log::warn!(
                        "Theme '{theme_name}': token rule {index} foreground '{hex}': {reason}"
                    );
                    None
                }
            });

        let font_style = settings
            .get("fontStyle")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if scopes.is_empty() {
            continue;
        }

        rules.push(TokenRule {
            scopes,
            style: TokenStyle {
                foreground,
                italic: font_style.contains("italic"),
                bold: font_style.contains("bold"),
            },
        });
    }

    rules
}

/// Listing entry produced by theme discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeListing {
    pub id: String,
    pub name: String,
    pub kind: Kind,
}

/// Theme loader responsible for loading themes from the filesystem
pub struct ThemeLoader {
    themes_dir: PathBuf,
    id_validator: ThemeIdValidator,
    path_validator: ThemePathValidator,
}

impl ThemeLoader {
    pub fn new() -> Self {
        let themes_dir = Self::find_themes_directory();

        Self {
            themes_dir,
            id_validator: ThemeIdValidator,
            path_validator: ThemePathValidator,
        }
    }

    /// Loader rooted at an explicit directory (used by hosts and tests).
    pub fn with_directory(themes_dir: PathBuf) -> Self {
        Self {
            themes_dir,
            id_validator: ThemeIdValidator,
            path_validator: ThemePathValidator,
        }
    }

    fn find_themes_directory() -> PathBuf {
        if let Ok(dir) = std::env::var(env_vars::THEMES_DIR) {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                log::info!("Using themes directory from environment: {}", path.display());
                return path;
            }
            log::warn!(
                "{} points at '{}' which is not a directory",
                env_vars::THEMES_DIR,
                path.display()
            );
        }

        let mut possible_paths = vec![PathBuf::from("themes")];
        if let Some(config_dir) = dirs::config_dir() {
            possible_paths.push(config_dir.join("veneer").join("themes"));
        }

        for path in possible_paths {
            if path.is_dir() {
                log::info!("Found themes directory at: {}", path.display());
                return path;
            }
        }

        log::warn!(
            "Could not find themes directory in any expected location, using default 'themes'"
        );
        PathBuf::from("themes")
    }

    pub fn themes_dir(&self) -> &PathBuf {
        &self.themes_dir
    }

    pub fn load_theme(&self, theme_id: &str) -> AppResult<ThemeDefinition> {
        self.id_validator.validate(theme_id)?;

        let theme_path = self
            .themes_dir
            .join(format!("{theme_id}.{THEME_FILE_EXTENSION}"));

        self.path_validator.validate(&theme_path)?;

        let theme_content = fs::read_to_string(&theme_path).map_err(|e| {
            AppError::Validation(format!(
                "Failed to read theme file '{}': {e}",
                theme_path.display()
            ))
        })?;

        let raw: Value = serde_json::from_str(&theme_content).map_err(|e| {
            AppError::Validation(format!(
                "Failed to parse theme file '{}': {e}",
                theme_path.display()
            ))
        })?;

        load(&raw)
    }

    /// Enumerate loadable themes, sorted by id.
    ///
    /// Files that fail to load are logged and skipped; one broken theme
    /// must not hide the rest.
    pub fn discover_themes(&self) -> AppResult<Vec<ThemeListing>> {
        if !self.themes_dir.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.themes_dir).map_err(|e| {
            AppError::Validation(format!(
                "Failed to read themes directory '{}': {e}",
                self.themes_dir.display()
            ))
        })?;

        let mut listings = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| AppError::Validation(format!("Failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|s| s.to_str()) != Some(THEME_FILE_EXTENSION)
            {
                continue;
            }

            let Some(theme_id) = path.file_stem().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.id_validator.validate(theme_id).is_err() {
                continue;
            }

            match self.load_theme(theme_id) {
                Ok(definition) => listings.push(ThemeListing {
                    id: theme_id.to_string(),
                    name: definition.name.clone(),
                    kind: definition.kind,
                }),
                Err(e) => {
                    log::warn!("Skipping unloadable theme '{theme_id}': {e}");
                }
            }
        }

        listings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listings)
    }
}

impl Default for ThemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};
    use serde_json::json;

    #[test]
    fn test_load_rejects_non_object() {
        assert_err!(load(&json!("just a string")));
        assert_err!(load(&json!([1, 2, 3])));
        assert_err!(load(&json!(null)));
    }

    #[test]
    fn test_load_rejects_missing_or_empty_name() {
        assert_err!(load(&json!({ "colors": {} })));
        assert_err!(load(&json!({ "name": "" })));
        assert_err!(load(&json!({ "name": "   " })));
    }

    #[test]
    fn test_load_name_only_theme_fills_defaults() {
        let definition = assert_ok!(load(&json!({ "name": "Bare" })));

        assert_eq!(definition.name, "Bare");
        for (key, default) in DEFAULT_COLORS {
            assert_eq!(definition.colors.get(*key), Some(default));
        }
        assert!(definition.token_rules.is_empty());
        // The built-in defaults are a dark palette.
        assert_eq!(definition.kind, Kind::Dark);
    }

    #[test]
    fn test_load_skips_invalid_colors() {
        let definition = assert_ok!(load(&json!({
            "name": "Partial",
            "colors": {
                "editor.background": "#282c34",
                "statusBar.background": "not-a-color",
                "focusBorder": 42
            }
        })));

        assert_eq!(
            definition.color("editor.background"),
            Some(Color::rgb(0x28, 0x2c, 0x34))
        );
        assert_eq!(definition.color("statusBar.background"), None);
        assert_eq!(definition.color("focusBorder"), None);
    }

    #[test]
    fn test_load_token_rules_string_and_array_scopes() {
        let definition = assert_ok!(load(&json!({
            "name": "Tokens",
            "tokenColors": [
                {
                    "scope": "comment, punctuation.definition.comment",
                    "settings": { "foreground": "#5c6370", "fontStyle": "italic" }
                },
                {
                    "scope": ["keyword", "storage.type"],
                    "settings": { "foreground": "#c678dd" }
                },
                { "settings": { "foreground": "#ffffff" } },
                "garbage"
            ]
        })));

        assert_eq!(definition.token_rules.len(), 2);
        assert_eq!(
            definition.token_rules[0].scopes,
            vec!["comment", "punctuation.definition.comment"]
        );
        assert!(definition.token_rules[0].style.italic);
        assert_eq!(definition.token_rules[1].scopes.len(), 2);
        assert!(!definition.token_rules[1].style.italic);
    }

    #[test]
    fn test_classification_follows_background() {
        let dark = assert_ok!(load(&json!({
            "name": "Dark",
            "colors": { "editor.background": "#1e1e1e" }
        })));
        assert_eq!(dark.kind, Kind::Dark);

        let light = assert_ok!(load(&json!({
            "name": "Light",
            "colors": { "editor.background": "#fafafa" }
        })));
        assert_eq!(light.kind, Kind::Light);
    }

    #[test]
    fn test_loader_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let theme = json!({
            "name": "Disk Theme",
            "colors": { "editor.background": "#282c34" }
        });
        fs::write(
            dir.path().join("disk_theme.json"),
            serde_json::to_string_pretty(&theme).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loader = ThemeLoader::with_directory(dir.path().to_path_buf());

        let definition = assert_ok!(loader.load_theme("disk_theme"));
        assert_eq!(definition.name, "Disk Theme");

        let listings = assert_ok!(loader.discover_themes());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "disk_theme");
        assert_eq!(listings[0].kind, Kind::Dark);
    }

    #[test]
    fn test_loader_missing_theme_fails_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ThemeLoader::with_directory(dir.path().to_path_buf());

        let result = loader.load_theme("nonexistent_theme");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("nonexistent_theme") || message.contains("Invalid"));
    }
}
