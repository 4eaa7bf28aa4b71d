//! Live record of what is currently rendered and what preceded it.

use crate::apply::surface::PaletteSpec;
use crate::compile::CompiledStyle;
use crate::theme::types::Context;
use std::collections::BTreeMap;

/// Pre-theming appearance of one context, captured before the first
/// mutation. Fields are `None` when the corresponding getter failed or
/// does not apply (the native flag outside the title bar).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSnapshot {
    pub palette: Option<PaletteSpec>,
    pub style_text: Option<String>,
    pub native_dark: Option<bool>,
}

/// The currently-applied visual configuration.
///
/// One live instance per engine, mutated only by the applier under the
/// single-threaded discipline; a host that introduces worker threads
/// must wrap it in its own mutual exclusion.
#[derive(Debug, Default)]
pub struct AppliedState {
    active: BTreeMap<Context, CompiledStyle>,
    snapshots: BTreeMap<Context, SurfaceSnapshot>,
}

impl AppliedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-theming snapshot for `context`.
    ///
    /// The first-apply snapshot is authoritative: once a snapshot
    /// exists, later captures are ignored so re-applies cannot
    /// overwrite the original appearance.
    pub fn record_snapshot(&mut self, context: Context, snapshot: SurfaceSnapshot) {
        self.snapshots.entry(context).or_insert(snapshot);
    }

    pub fn has_snapshot(&self, context: Context) -> bool {
        self.snapshots.contains_key(&context)
    }

    pub fn snapshot(&self, context: Context) -> Option<&SurfaceSnapshot> {
        self.snapshots.get(&context)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = (Context, &SurfaceSnapshot)> {
        self.snapshots.iter().map(|(context, snap)| (*context, snap))
    }

    pub fn set_active(&mut self, context: Context, style: CompiledStyle) {
        self.active.insert(context, style);
    }

    pub fn active(&self, context: Context) -> Option<&CompiledStyle> {
        self.active.get(&context)
    }

    pub fn is_applied(&self) -> bool {
        !self.active.is_empty()
    }

    /// Tear down after a restore: forget both the active styles and the
    /// snapshots, so the next apply captures fresh ones.
    pub fn clear(&mut self) {
        self.active.clear();
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::types::Color;

    fn palette(window: Color) -> PaletteSpec {
        PaletteSpec {
            window,
            window_text: Color::rgb(0, 0, 0),
            button: Color::rgb(1, 1, 1),
            button_text: Color::rgb(2, 2, 2),
            highlight: Color::rgb(3, 3, 3),
            highlight_text: Color::rgb(4, 4, 4),
        }
    }

    #[test]
    fn test_first_snapshot_is_authoritative() {
        let mut state = AppliedState::new();

        let original = SurfaceSnapshot {
            palette: Some(palette(Color::rgb(0xec, 0xec, 0xec))),
            style_text: Some(String::new()),
            native_dark: None,
        };
        state.record_snapshot(Context::Shell, original.clone());

        // A later capture (taken after theming already mutated the
        // surface) must not replace the original.
        state.record_snapshot(
            Context::Shell,
            SurfaceSnapshot {
                palette: Some(palette(Color::rgb(0x1e, 0x1e, 0x1e))),
                style_text: Some("QWidget {}".to_string()),
                native_dark: None,
            },
        );

        assert_eq!(state.snapshot(Context::Shell), Some(&original));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = AppliedState::new();
        state.record_snapshot(Context::TitleBar, SurfaceSnapshot::default());
        assert!(state.has_snapshot(Context::TitleBar));
        assert!(!state.is_applied());

        state.clear();
        assert!(!state.has_snapshot(Context::TitleBar));
    }
}
