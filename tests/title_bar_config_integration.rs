//! Title-bar theming and custom override, driven through the
//! environment-backed configuration.
//!
//! Configuration loads once per process, so everything that depends on
//! the overridden settings lives in a single test function.

use serde_json::json;
use std::fs;
use veneer::apply::{HostSurface, InMemorySurface, Mechanism};
use veneer::error::AppResult;
use veneer::theme::ThemeManager;
use veneer::theme::color::{derive_title_bar_color, to_hsv};
use veneer::theme::loader::ThemeLoader;
use veneer::theme::types::{Context, Kind};

struct EmptyRegistry;

impl veneer::conflict::SourceRegistry for EmptyRegistry {
    fn installed_sources(&self) -> Vec<String> {
        Vec::new()
    }

    fn is_enabled(&self, _id: &str) -> bool {
        false
    }

    fn set_enabled(&mut self, _id: &str, _enabled: bool) -> AppResult<()> {
        Ok(())
    }
}

#[test]
fn title_bar_theming_and_custom_override() {
    // Must run before the first configuration access in this process.
    unsafe {
        std::env::set_var("VENEER__THEMING__USE_TITLE_BAR_THEMING", "true");
        std::env::set_var(
            "VENEER__THEMING__CUSTOM_STYLE_OVERRIDE",
            "QWidget { font-size: 13px; }",
        );
    }

    let dir = tempfile::tempdir().unwrap().keep();
    fs::write(
        dir.join("dark_sample.json"),
        serde_json::to_string(&json!({
            "name": "Dark Sample",
            "colors": {
                "editor.background": "#1e1e1e",
                "button.background": "#0e639c"
            }
        }))
        .unwrap(),
    )
    .unwrap();

    let mut surface = InMemorySurface::new();
    // Force the style-text mechanism on the shell so the appended
    // override becomes observable.
    surface.disable_palette(Context::Shell);

    let mut manager = ThemeManager::with_loader(
        ThemeLoader::with_directory(dir),
        Box::new(surface),
        Box::new(EmptyRegistry),
    );

    let report = manager.switch_theme("dark_sample").unwrap();

    // All three contexts are enabled with this configuration.
    assert_eq!(
        report.outcomes.get(&Context::Shell),
        Some(&Ok(Mechanism::StyleText))
    );
    assert!(report.succeeded(Context::DocumentSurface));
    assert!(report.succeeded(Context::TitleBar));

    // The shell sheet carries the configured override after the
    // compiled output.
    let shell_text = manager.surface().style_text(Context::Shell).unwrap();
    assert!(shell_text.contains("/* Dark Sample - shell chrome */"));
    assert!(shell_text.ends_with("QWidget { font-size: 13px; }"));

    // The title-bar palette carries the derived frame color and the
    // native dark flag went on additively for a dark theme.
    let definition = manager.current().unwrap();
    let derived = derive_title_bar_color(
        definition.background(),
        definition.color_or_default("button.background"),
        Kind::Dark,
    );
    let applied = manager.surface().palette(Context::TitleBar).unwrap();
    assert_eq!(applied.window, derived);
    assert!(to_hsv(derived).v <= 0.30 + 1.0 / 255.0);
    assert!(manager.surface().native_dark().unwrap());
}
