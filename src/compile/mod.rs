//! Context-scoped style compilation.
//!
//! `compile` is a pure function of the theme definition, the target
//! context and [`COMPILER_VERSION`]: identical inputs always yield
//! byte-identical output. The cache depends on this.

mod document;
mod shell;
mod title_bar;

use crate::theme::types::{Context, ThemeDefinition};

/// Bumped whenever the emitted rule-set semantics change, so cached
/// entries from a previous compiler are never served.
pub const COMPILER_VERSION: u32 = 3;

/// The compiled style payload for one theme+context pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStyle {
    pub theme_name: String,
    pub context: Context,
    pub version: u32,
    pub text: String,
}

/// Compile the style sheet for one surface context.
pub fn compile(definition: &ThemeDefinition, context: Context) -> CompiledStyle {
    let text = match context {
        Context::Shell => shell::emit(definition),
        Context::DocumentSurface => document::emit(definition),
        Context::TitleBar => title_bar::emit(definition),
    };

    CompiledStyle {
        theme_name: definition.name.clone(),
        context,
        version: COMPILER_VERSION,
        text,
    }
}

/// Append one `selector { property: value; ... }` block.
///
/// All emitters go through this so the output shape (and therefore the
/// byte-identity guarantee) lives in one place.
pub(crate) fn push_rule(out: &mut String, selector: &str, declarations: &[(&str, &str)]) {
    use std::fmt::Write;

    out.push_str(selector);
    out.push_str(" {\n");
    for (property, value) in declarations {
        let _ = writeln!(out, "    {property}: {value};");
    }
    out.push_str("}\n\n");
}

/// Color lookups shared by the per-context emitters.
///
/// Optional keys fall back along the same chains the palette builder
/// uses, bottoming out in the defaulting-table keys that are always
/// present after validation.
pub(crate) struct ColorPlan<'a> {
    definition: &'a ThemeDefinition,
}

impl<'a> ColorPlan<'a> {
    pub fn new(definition: &'a ThemeDefinition) -> Self {
        Self { definition }
    }

    pub fn background(&self) -> String {
        self.definition.background().to_hex()
    }

    pub fn foreground(&self) -> String {
        self.definition.foreground().to_hex()
    }

    pub fn selection_background(&self) -> String {
        self.definition
            .color_or_default("editor.selectionBackground")
            .to_hex()
    }

    pub fn selection_foreground(&self) -> String {
        self.definition
            .color("editor.selectionForeground")
            .unwrap_or_else(|| self.definition.foreground())
            .to_hex()
    }

    pub fn cursor(&self) -> String {
        self.definition
            .color_or_default("editorCursor.foreground")
            .to_hex()
    }

    pub fn border(&self) -> String {
        self.definition
            .color("editorGroup.border")
            .unwrap_or_else(|| self.definition.color_or_default("editor.lineHighlightBackground"))
            .to_hex()
    }

    pub fn panel_background(&self) -> String {
        self.definition
            .color("sideBar.background")
            .unwrap_or_else(|| self.definition.background())
            .to_hex()
    }

    pub fn panel_foreground(&self) -> String {
        self.definition
            .color("sideBar.foreground")
            .unwrap_or_else(|| self.definition.foreground())
            .to_hex()
    }

    pub fn button_background(&self) -> String {
        self.definition.color_or_default("button.background").to_hex()
    }

    pub fn button_foreground(&self) -> String {
        self.definition
            .color("button.foreground")
            .unwrap_or_else(|| {
                crate::theme::color::contrasting_foreground(
                    self.definition.color_or_default("button.background"),
                )
            })
            .to_hex()
    }

    pub fn button_hover(&self) -> String {
        self.definition
            .color("button.hoverBackground")
            .or_else(|| self.definition.color("list.hoverBackground"))
            .unwrap_or_else(|| self.definition.color_or_default("editor.selectionBackground"))
            .to_hex()
    }

    pub fn input_background(&self) -> String {
        self.definition
            .color("input.background")
            .unwrap_or_else(|| self.definition.color_or_default("editor.lineHighlightBackground"))
            .to_hex()
    }

    pub fn input_foreground(&self) -> String {
        self.definition
            .color("input.foreground")
            .unwrap_or_else(|| self.definition.foreground())
            .to_hex()
    }

    pub fn list_hover(&self) -> String {
        self.definition
            .color("list.hoverBackground")
            .unwrap_or_else(|| self.definition.color_or_default("editor.lineHighlightBackground"))
            .to_hex()
    }

    pub fn list_active_background(&self) -> String {
        self.definition
            .color("list.activeSelectionBackground")
            .unwrap_or_else(|| self.definition.color_or_default("editor.selectionBackground"))
            .to_hex()
    }

    pub fn list_active_foreground(&self) -> String {
        self.definition
            .color("list.activeSelectionForeground")
            .unwrap_or_else(|| self.definition.foreground())
            .to_hex()
    }

    pub fn scrollbar(&self) -> String {
        self.definition
            .color("scrollbarSlider.background")
            .unwrap_or_else(|| self.definition.color_or_default("editor.selectionBackground"))
            .to_hex()
    }

    pub fn scrollbar_hover(&self) -> String {
        self.definition
            .color("scrollbarSlider.hoverBackground")
            .or_else(|| self.definition.color("scrollbarSlider.background"))
            .unwrap_or_else(|| self.definition.color_or_default("editor.selectionBackground"))
            .to_hex()
    }

    pub fn focus(&self) -> String {
        self.definition
            .color("focusBorder")
            .unwrap_or_else(|| self.definition.color_or_default("button.background"))
            .to_hex()
    }

    pub fn status_background(&self) -> String {
        self.definition
            .color("statusBar.background")
            .or_else(|| self.definition.color("sideBar.background"))
            .unwrap_or_else(|| self.definition.background())
            .to_hex()
    }

    pub fn status_foreground(&self) -> String {
        self.definition
            .color("statusBar.foreground")
            .or_else(|| self.definition.color("sideBar.foreground"))
            .unwrap_or_else(|| self.definition.foreground())
            .to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::loader::load;
    use serde_json::json;

    fn sample_definition() -> ThemeDefinition {
        load(&json!({
            "name": "Sample",
            "colors": {
                "editor.background": "#1e1e1e",
                "editor.foreground": "#d4d4d4",
                "button.background": "#0e639c",
                "sideBar.background": "#21252b",
                "focusBorder": "#007acc"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_compile_is_idempotent() {
        let definition = sample_definition();
        for context in Context::ALL {
            let first = compile(&definition, context);
            let second = compile(&definition, context);
            assert_eq!(first.text, second.text, "{context} output drifted");
            assert_eq!(first.version, COMPILER_VERSION);
        }
    }

    #[test]
    fn test_equal_content_compiles_identically() {
        let a = sample_definition();
        let b = sample_definition();
        for context in Context::ALL {
            assert_eq!(compile(&a, context).text, compile(&b, context).text);
        }
    }

    #[test]
    fn test_shell_covers_chrome_surfaces() {
        let text = compile(&sample_definition(), Context::Shell).text;
        assert!(text.contains("QWidget"));
        assert!(text.contains("QPushButton:hover"));
        assert!(text.contains("QScrollBar::handle"));
        assert!(text.contains("QMenu"));
        assert!(text.contains("#0e639c"));
    }

    #[test]
    fn test_document_surface_is_container_scoped() {
        let text = compile(&sample_definition(), Context::DocumentSurface).text;

        assert!(text.contains("html"));
        assert!(text.contains("body"));
        assert!(text.contains(".card"));

        // The container/content split is the primary correctness property
        // for this context: no selector may match leaf text elements.
        let leaf_elements = [
            "p", "span", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th", "a", "pre", "code",
            "tt", "blockquote", "table", "img", "ul", "ol", "b", "i", "em", "strong",
        ];
        for line in text.lines() {
            let selector = line.trim_start();
            for leaf in leaf_elements {
                let leaked = selector.starts_with(&format!("{leaf} "))
                    || selector.starts_with(&format!("{leaf},"))
                    || selector.starts_with(&format!("{leaf}:"))
                    || selector.starts_with(&format!("{leaf}."));
                assert!(!leaked, "document sheet leaked leaf selector in '{line}'");
            }
        }
    }

    #[test]
    fn test_title_bar_uses_derived_color() {
        use crate::theme::color::{derive_title_bar_color, to_hsv};
        use crate::theme::types::Kind;

        let definition = sample_definition();
        let text = compile(&definition, Context::TitleBar).text;

        let derived = derive_title_bar_color(
            definition.background(),
            definition.color_or_default("button.background"),
            Kind::Dark,
        );
        assert!(text.contains(&derived.to_hex()));
        assert!(to_hsv(derived).v <= 0.30 + 1.0 / 255.0);
    }
}
