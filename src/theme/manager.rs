use crate::apply::{Applier, ApplyReport, ContextPayload, HostSurface, PaletteSpec, RestoreReport};
use crate::cache::StyleCache;
use crate::config::{self, ThemingConfig};
use crate::conflict::{ConflictMonitor, ConflictRecord, Resolution, SourceRegistry};
use crate::error::{AppError, AppResult, ErrorReporter};
use crate::events::{Event, EventBus, EventKind, SubscriptionId};
use crate::theme::color::{contrasting_foreground, derive_title_bar_color};
use crate::theme::loader::{ThemeListing, ThemeLoader};
use crate::theme::types::{Context, Kind, ThemeDefinition};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Mutex;

// Global theme manager instance - wrapped in Mutex for thread-safe updates
static GLOBAL_THEME_MANAGER: OnceCell<Mutex<ThemeManager>> = OnceCell::new();

/// Orchestrates the theme pipeline: load, derive, compile, cache, apply.
///
/// One theme-change request runs to completion before the next begins;
/// the surrounding mutex serializes callers, and nothing in the pipeline
/// blocks on network or disk beyond the initial theme read.
pub struct ThemeManager {
    loader: ThemeLoader,
    cache: StyleCache,
    applier: Applier,
    monitor: ConflictMonitor,
    surface: Box<dyn HostSurface + Send>,
    registry: Box<dyn SourceRegistry + Send>,
    reporter: ErrorReporter,
    current: Option<ThemeDefinition>,
}

impl ThemeManager {
    pub fn new(
        surface: Box<dyn HostSurface + Send>,
        registry: Box<dyn SourceRegistry + Send>,
    ) -> Self {
        let conflicts = config::conflicts_snapshot();
        Self {
            loader: ThemeLoader::new(),
            cache: StyleCache::new(),
            applier: Applier::new(),
            monitor: ConflictMonitor::new(conflicts.scan_interval()),
            surface,
            registry,
            reporter: ErrorReporter::new(),
            current: None,
        }
    }

    /// Manager with an explicit loader (hosts and tests pick the
    /// themes directory).
    pub fn with_loader(
        loader: ThemeLoader,
        surface: Box<dyn HostSurface + Send>,
        registry: Box<dyn SourceRegistry + Send>,
    ) -> Self {
        let conflicts = config::conflicts_snapshot();
        Self {
            loader,
            cache: StyleCache::new(),
            applier: Applier::new(),
            monitor: ConflictMonitor::new(conflicts.scan_interval()),
            surface,
            registry,
            reporter: ErrorReporter::new(),
            current: None,
        }
    }

    /// Initialize the global theme manager - call this once at host startup
    pub fn init_global(
        surface: Box<dyn HostSurface + Send>,
        registry: Box<dyn SourceRegistry + Send>,
    ) -> AppResult<()> {
        let mut manager = Self::new(surface, registry);

        // Apply the configured startup theme. A broken theme is a
        // warning, not an initialization failure: the host keeps its
        // previous appearance.
        let theming = config::theming_snapshot();
        if let Err(e) = manager.switch_theme(theming.current_theme()) {
            manager
                .reporter
                .report_warning(&e, "Theme", "startup_apply");
        }

        GLOBAL_THEME_MANAGER
            .set(Mutex::new(manager))
            .map_err(|_| AppError::Config("Theme manager already initialized".to_string()))?;

        log::info!("Global theme manager initialized");
        Ok(())
    }

    /// Get the global theme manager instance
    pub fn global() -> &'static Mutex<ThemeManager> {
        GLOBAL_THEME_MANAGER
            .get()
            .expect("Theme manager not initialized. Call ThemeManager::init_global() first.")
    }

    /// Currently loaded theme, if any.
    pub fn current(&self) -> Option<&ThemeDefinition> {
        self.current.as_ref()
    }

    /// Read-only view of the host surface, for diagnostics.
    pub fn surface(&self) -> &dyn HostSurface {
        self.surface.as_ref()
    }

    /// Switch to a new theme by id and apply it to every enabled context.
    pub fn switch_theme(&mut self, theme_id: &str) -> AppResult<ApplyReport> {
        log::info!("Switching to theme: {theme_id}");
        let definition = self.loader.load_theme(theme_id)?;

        // Identity change invalidates every cached sheet.
        let identity_changed = self
            .current
            .as_ref()
            .map(|current| current.name != definition.name)
            .unwrap_or(true);
        if identity_changed {
            self.cache.clear();
        }

        self.current = Some(definition);
        let report = self.apply_current()?;

        // Theme changes are also an explicit conflict-scan trigger.
        self.monitor.scan(self.registry.as_ref());

        log::info!("Successfully switched to theme: {theme_id}");
        Ok(report)
    }

    /// Re-apply the current theme (profile open, content render, retry
    /// after a partial failure).
    pub fn apply_current(&mut self) -> AppResult<ApplyReport> {
        let theming = config::theming_snapshot();
        let definition = self
            .current
            .clone()
            .ok_or_else(|| AppError::Apply("no theme loaded".to_string()))?;

        let mut payloads = BTreeMap::new();
        if theming.apply_to_shell() {
            payloads.insert(
                Context::Shell,
                self.build_payload(&definition, Context::Shell, &theming),
            );
        }
        if theming.apply_to_document_surface() {
            payloads.insert(
                Context::DocumentSurface,
                self.build_payload(&definition, Context::DocumentSurface, &theming),
            );
        }
        if theming.use_title_bar_theming() {
            payloads.insert(
                Context::TitleBar,
                self.build_payload(&definition, Context::TitleBar, &theming),
            );
        }

        if payloads.is_empty() {
            log::debug!("All surfaces disabled in configuration, nothing to apply");
            return Ok(ApplyReport::default());
        }

        let report = self.applier.apply(self.surface.as_mut(), &payloads);
        for failure in report.failures() {
            self.reporter
                .report_warning(&failure.clone().into(), "Theme", "apply_context");
        }
        Ok(report)
    }

    fn build_payload(
        &mut self,
        definition: &ThemeDefinition,
        context: Context,
        theming: &ThemingConfig,
    ) -> ContextPayload {
        let background = definition.background();
        let foreground = definition.foreground();
        let button = definition.color_or_default("button.background");
        let highlight = definition.color_or_default("editor.selectionBackground");

        let palette = match context {
            Context::TitleBar => {
                let frame = derive_title_bar_color(background, button, definition.kind);
                PaletteSpec {
                    window: frame,
                    window_text: contrasting_foreground(frame),
                    button,
                    button_text: contrasting_foreground(button),
                    highlight,
                    highlight_text: foreground,
                }
            }
            _ => PaletteSpec {
                window: background,
                window_text: foreground,
                button,
                button_text: contrasting_foreground(button),
                highlight,
                highlight_text: foreground,
            },
        };

        ContextPayload {
            palette,
            style: self.cache.get_or_compile(definition, context),
            override_text: theming.custom_style_override().to_string(),
            native_dark: (context == Context::TitleBar)
                .then(|| definition.kind == Kind::Dark),
        }
    }

    /// Tear down: restore the pre-theming appearance and drop all state.
    pub fn disable(&mut self) -> RestoreReport {
        log::info!("Disabling theming, restoring prior appearance");
        let report = self.applier.restore(self.surface.as_mut());
        self.cache.clear();
        self.current = None;
        report
    }

    /// Themes available to switch to.
    pub fn discover_themes(&self) -> AppResult<Vec<ThemeListing>> {
        self.loader.discover_themes()
    }

    /// Timer hook for the periodic conflict scan.
    pub fn poll_conflicts(&mut self, now: DateTime<Utc>) -> bool {
        self.monitor.poll(self.registry.as_ref(), now)
    }

    pub fn conflicts(&self) -> &[ConflictRecord] {
        self.monitor.records()
    }

    /// Apply an explicit user decision to a detected conflict.
    pub fn resolve_conflict(&mut self, source_id: &str, decision: Resolution) -> AppResult<()> {
        self.monitor
            .resolve(source_id, decision, self.registry.as_mut())
    }

    /// Probe into the style cache, used by tests and diagnostics.
    pub fn compile_count(&self) -> u64 {
        self.cache.compile_count()
    }

    /// Subscribe the global manager to host events.
    ///
    /// Handlers run on the host's event timeline and go through the
    /// global mutex, so an in-flight switch always finishes before the
    /// next event is processed.
    pub fn attach_global(bus: &mut dyn EventBus) -> Vec<SubscriptionId> {
        let mut ids = Vec::new();

        ids.push(bus.subscribe(
            EventKind::ThemeChanged,
            Box::new(|event| {
                if let Event::ThemeChanged { theme_id } = event {
                    Self::with_global("theme_changed", |manager| {
                        manager.switch_theme(theme_id).map(|_| ())
                    });
                }
            }),
        ));

        for kind in [EventKind::ProfileOpened, EventKind::ContentWillRender] {
            ids.push(bus.subscribe(
                kind,
                Box::new(|_event| {
                    Self::with_global("reapply", |manager| manager.apply_current().map(|_| ()));
                }),
            ));
        }

        ids
    }

    /// Remove previously attached global subscriptions.
    pub fn detach_global(bus: &mut dyn EventBus, ids: &[SubscriptionId]) {
        for &id in ids {
            bus.unsubscribe(id);
        }
    }

    fn with_global(operation: &str, f: impl FnOnce(&mut ThemeManager) -> AppResult<()>) {
        let Some(mutex) = GLOBAL_THEME_MANAGER.get() else {
            log::warn!("Theme manager not initialized, ignoring {operation}");
            return;
        };
        match mutex.lock() {
            Ok(mut manager) => {
                if let Err(e) = f(&mut manager) {
                    manager.reporter.report_warning(&e, "Theme", operation);
                }
            }
            Err(e) => {
                log::error!("Failed to acquire theme manager lock during {operation}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::InMemorySurface;
    use crate::error::AppResult;
    use serde_json::json;
    use std::fs;

    struct EmptyRegistry;

    impl SourceRegistry for EmptyRegistry {
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

    fn manager_with_themes(themes: &[(&str, serde_json::Value)]) -> ThemeManager {
        // Keep the directory alive for the whole test process.
        let dir = tempfile::tempdir().unwrap().keep();
        for (id, theme) in themes {
            fs::write(
                dir.join(format!("{id}.json")),
                serde_json::to_string(theme).unwrap(),
            )
            .unwrap();
        }
        let loader = ThemeLoader::with_directory(dir);
        ThemeManager::with_loader(
            loader,
            Box::new(InMemorySurface::new()),
            Box::new(EmptyRegistry),
        )
    }

    #[test]
    fn test_switch_theme_applies_enabled_contexts() {
        let mut manager = manager_with_themes(&[(
            "dark_test",
            json!({
                "name": "Dark Test",
                "colors": { "editor.background": "#1e1e1e" }
            }),
        )]);

        let report = manager.switch_theme("dark_test").unwrap();
        // Default config: shell and document surface on, title bar off.
        assert!(report.succeeded(Context::Shell));
        assert!(report.succeeded(Context::DocumentSurface));
        assert!(!report.outcomes.contains_key(&Context::TitleBar));
        assert_eq!(manager.current().unwrap().name, "Dark Test");
    }

    #[test]
    fn test_switch_to_unknown_theme_fails_cleanly() {
        let mut manager = manager_with_themes(&[]);
        assert!(manager.switch_theme("missing").is_err());
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_reapply_hits_cache() {
        let mut manager = manager_with_themes(&[(
            "dark_test",
            json!({
                "name": "Dark Test",
                "colors": { "editor.background": "#1e1e1e" }
            }),
        )]);

        manager.switch_theme("dark_test").unwrap();
        let compiles_after_first = manager.compile_count();

        manager.apply_current().unwrap();
        assert_eq!(manager.compile_count(), compiles_after_first);
    }

    #[test]
    fn test_identity_change_clears_cache() {
        let mut manager = manager_with_themes(&[
            (
                "first",
                json!({ "name": "First", "colors": { "editor.background": "#111111" } }),
            ),
            (
                "second",
                json!({ "name": "Second", "colors": { "editor.background": "#222222" } }),
            ),
        ]);

        manager.switch_theme("first").unwrap();
        let after_first = manager.compile_count();
        manager.switch_theme("second").unwrap();
        // The cleared cache forces fresh compiles for the new identity.
        assert!(manager.compile_count() > after_first);
    }

    #[test]
    fn test_disable_restores_and_forgets() {
        let mut manager = manager_with_themes(&[(
            "dark_test",
            json!({ "name": "Dark Test", "colors": { "editor.background": "#1e1e1e" } }),
        )]);

        manager.switch_theme("dark_test").unwrap();
        let report = manager.disable();
        assert!(report.failures.is_empty());
        assert!(manager.current().is_none());
    }
}
