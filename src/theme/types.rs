use crate::theme::color::luminance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An RGB color with optional translucency, parsed from hex notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` notation.
    pub fn parse(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim().trim_start_matches('#');

        let expanded;
        let hex = if hex.len() == 3 {
            expanded = hex
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>();
            expanded.as_str()
        } else {
            hex
        };

        if hex.len() != 6 && hex.len() != 8 {
            return Err("Invalid hex color format");
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid red component")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid green component")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid blue component")?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).map_err(|_| "Invalid alpha component")?
        } else {
            255
        };

        Ok(Self { r, g, b, a })
    }

    /// Lowercase hex notation; alpha is emitted only when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Theme classification derived from the editor background luminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Dark,
    Light,
    /// Only reachable when the background key is absent, which cannot
    /// happen after defaulting.
    Unknown,
}

impl Kind {
    /// Classify a background color by perceptual luminance.
    ///
    /// The boundary case `L = 0.5` classifies as `Light`.
    pub fn classify(background: Color) -> Self {
        if luminance(background) < 0.5 {
            Kind::Dark
        } else {
            Kind::Light
        }
    }
}

/// One of the distinct host surfaces being styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Context {
    /// Window chrome, menus and side panels.
    Shell,
    /// Embedded content view rendering user documents.
    DocumentSurface,
    /// Native or emulated window title bar.
    TitleBar,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Shell => write!(f, "shell"),
            Context::DocumentSurface => write!(f, "document-surface"),
            Context::TitleBar => write!(f, "title-bar"),
        }
    }
}

impl Context {
    pub const ALL: [Context; 3] = [Context::Shell, Context::DocumentSurface, Context::TitleBar];
}

/// Style attached to a syntax-highlight scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenStyle {
    pub foreground: Option<Color>,
    pub italic: bool,
    pub bold: bool,
}

/// One ordered (scope-pattern, style) pair. A rule applies to every
/// scope that starts with one of its patterns; when several rules match
/// the same scope, the later rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRule {
    pub scopes: Vec<String>,
    pub style: TokenStyle,
}

/// Defaulting table consulted during validation. After loading, `colors`
/// always contains every key listed here.
pub const DEFAULT_COLORS: &[(&str, Color)] = &[
    ("editor.background", Color::rgb(0x1e, 0x1e, 0x1e)),
    ("editor.foreground", Color::rgb(0xd4, 0xd4, 0xd4)),
    ("editor.selectionBackground", Color::rgb(0x26, 0x4f, 0x78)),
    ("editor.lineHighlightBackground", Color::rgb(0x2a, 0x2d, 0x2e)),
    ("editorCursor.foreground", Color::rgb(0xae, 0xaf, 0xad)),
    ("button.background", Color::rgb(0x40, 0x47, 0x54)),
];

/// Look up the documented default for a color key, if it has one.
pub fn default_color(key: &str) -> Option<Color> {
    DEFAULT_COLORS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, color)| *color)
}

/// Validated, immutable in-memory representation of one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub kind: Kind,
    pub colors: BTreeMap<String, Color>,
    pub token_rules: Vec<TokenRule>,
}

impl ThemeDefinition {
    pub fn color(&self, key: &str) -> Option<Color> {
        self.colors.get(key).copied()
    }

    /// Color for `key`, falling back to the defaulting table and finally
    /// to the guaranteed editor background. Only reachable for keys
    /// outside the table when the caller chains optional lookups.
    pub fn color_or_default(&self, key: &str) -> Color {
        self.color(key)
            .or_else(|| default_color(key))
            .unwrap_or_else(|| self.background())
    }

    /// Editor background; guaranteed present after validation.
    pub fn background(&self) -> Color {
        self.color("editor.background")
            .unwrap_or(Color::rgb(0x1e, 0x1e, 0x1e))
    }

    /// Editor foreground; guaranteed present after validation.
    pub fn foreground(&self) -> Color {
        self.color("editor.foreground")
            .unwrap_or(Color::rgb(0xd4, 0xd4, 0xd4))
    }

    /// Resolve the effective style for a highlight scope.
    ///
    /// Rules are scanned in definition order; a rule matches when any of
    /// its patterns is a prefix of `scope`, and the last matching rule
    /// wins outright.
    pub fn style_for_scope(&self, scope: &str) -> Option<TokenStyle> {
        let mut resolved = None;
        for rule in &self.token_rules {
            if rule
                .scopes
                .iter()
                .any(|pattern| !pattern.is_empty() && scope.starts_with(pattern.as_str()))
            {
                resolved = Some(rule.style);
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let color = Color::parse("#1e1e1e").unwrap();
        assert_eq!(color, Color::rgb(0x1e, 0x1e, 0x1e));
    }

    #[test]
    fn test_parse_three_digit_hex_expands() {
        let color = Color::parse("#abc").unwrap();
        assert_eq!(color, Color::rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_parse_eight_digit_hex_keeps_alpha() {
        let color = Color::parse("#4e566680").unwrap();
        assert_eq!(color.a, 0x80);
        assert_eq!(color.to_hex(), "#4e566680");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse("").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
        assert!(Color::parse("red").is_err());
    }

    #[test]
    fn test_to_hex_omits_opaque_alpha() {
        assert_eq!(Color::rgb(0x0e, 0x63, 0x9c).to_hex(), "#0e639c");
    }

    #[test]
    fn test_classify_dark_and_light() {
        assert_eq!(Kind::classify(Color::rgb(10, 10, 10)), Kind::Dark);
        assert_eq!(Kind::classify(Color::rgb(250, 250, 250)), Kind::Light);
    }

    #[test]
    fn test_classify_boundary_is_light() {
        // The split is L < 0.5: anything at or above the midpoint is
        // Light. Mid gray sits just above the boundary.
        assert_eq!(Kind::classify(Color::rgb(128, 128, 128)), Kind::Light);
        assert_eq!(Kind::classify(Color::rgb(127, 127, 127)), Kind::Dark);
    }

    #[test]
    fn test_default_table_covers_required_keys() {
        for key in [
            "editor.background",
            "editor.foreground",
            "editor.selectionBackground",
            "editor.lineHighlightBackground",
            "editorCursor.foreground",
            "button.background",
        ] {
            assert!(default_color(key).is_some(), "missing default for {key}");
        }
        assert!(default_color("statusBar.background").is_none());
    }

    fn definition_with_rules(rules: Vec<TokenRule>) -> ThemeDefinition {
        ThemeDefinition {
            name: "test".to_string(),
            kind: Kind::Dark,
            colors: DEFAULT_COLORS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            token_rules: rules,
        }
    }

    #[test]
    fn test_style_for_scope_prefix_match() {
        let def = definition_with_rules(vec![TokenRule {
            scopes: vec!["comment".to_string()],
            style: TokenStyle {
                foreground: Some(Color::rgb(0x5c, 0x63, 0x70)),
                italic: true,
                bold: false,
            },
        }]);

        let style = def.style_for_scope("comment.line.double-slash").unwrap();
        assert!(style.italic);
        assert_eq!(style.foreground, Some(Color::rgb(0x5c, 0x63, 0x70)));
        assert!(def.style_for_scope("keyword.control").is_none());
    }

    #[test]
    fn test_style_for_scope_later_rule_wins() {
        let early = TokenStyle {
            foreground: Some(Color::rgb(1, 1, 1)),
            italic: false,
            bold: false,
        };
        let late = TokenStyle {
            foreground: Some(Color::rgb(2, 2, 2)),
            italic: false,
            bold: true,
        };
        let def = definition_with_rules(vec![
            TokenRule {
                scopes: vec!["string".to_string()],
                style: early,
            },
            TokenRule {
                scopes: vec!["string.quoted".to_string()],
                style: late,
            },
        ]);

        assert_eq!(def.style_for_scope("string.quoted.single"), Some(late));
        // Only the earlier rule matches a bare string scope.
        assert_eq!(def.style_for_scope("string.template"), Some(early));
    }
}
