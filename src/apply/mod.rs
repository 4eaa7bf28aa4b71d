//! Pushing compiled styles onto the host surface.
//!
//! Each context is satisfied by the first mechanism that succeeds, in a
//! fixed order: structured palette update, then raw style text. The
//! native dark flag of the title bar is the exception: native chrome is
//! not reachable through style text, so the flag is applied additively
//! on top of whichever mechanism won (and serves as a last fallback when
//! both failed).

pub mod state;
pub mod surface;

pub use state::{AppliedState, SurfaceSnapshot};
pub use surface::{HostSurface, InMemorySurface, PaletteSpec, SurfaceError};

use crate::compile::CompiledStyle;
use crate::error::AppError;
use crate::theme::types::Context;
use std::collections::BTreeMap;
use std::fmt;

/// One application mechanism, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    PaletteUpdate,
    StyleText,
    NativeFlag,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mechanism::PaletteUpdate => write!(f, "palette update"),
            Mechanism::StyleText => write!(f, "style text"),
            Mechanism::NativeFlag => write!(f, "native flag"),
        }
    }
}

/// Every mechanism failed for one context.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyError {
    pub context: Context,
    pub attempts: Vec<(Mechanism, String)>,
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all mechanisms failed for {}:", self.context)?;
        for (mechanism, reason) in &self.attempts {
            write!(f, " [{mechanism}: {reason}]")?;
        }
        Ok(())
    }
}

impl From<ApplyError> for AppError {
    fn from(error: ApplyError) -> Self {
        AppError::Apply(error.to_string())
    }
}

/// Everything the applier needs for one context.
#[derive(Debug, Clone)]
pub struct ContextPayload {
    pub palette: PaletteSpec,
    pub style: CompiledStyle,
    /// Raw style text appended after the compiled output (the
    /// configured custom override). Never cached.
    pub override_text: String,
    /// Desired native dark flag; `Some` only for the title bar when
    /// title-bar theming is enabled.
    pub native_dark: Option<bool>,
}

impl ContextPayload {
    fn effective_text(&self) -> String {
        if self.override_text.is_empty() {
            self.style.text.clone()
        } else {
            format!("{}\n{}", self.style.text, self.override_text)
        }
    }
}

/// Per-context outcomes of one apply cycle.
///
/// A failed context never blocks the others; callers can retry the
/// failed context alone.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: BTreeMap<Context, Result<Mechanism, ApplyError>>,
}

impl ApplyReport {
    pub fn succeeded(&self, context: Context) -> bool {
        matches!(self.outcomes.get(&context), Some(Ok(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ApplyError> {
        self.outcomes.values().filter_map(|o| o.as_ref().err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.values().all(Result::is_ok)
    }
}

/// Per-context outcomes of a restore pass. Restore is best-effort:
/// failures are reported, never propagated.
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: Vec<Context>,
    pub failures: Vec<(Context, String)>,
}

/// Applies compiled styles through the host surface, recording prior
/// state for reversal. Holds no UI logic beyond mechanism selection and
/// snapshot bookkeeping.
#[derive(Default)]
pub struct Applier {
    state: AppliedState,
}

impl Applier {
    pub fn new() -> Self {
        Self {
            state: AppliedState::new(),
        }
    }

    pub fn state(&self) -> &AppliedState {
        &self.state
    }

    /// Apply the given payloads, one context at a time.
    pub fn apply(
        &mut self,
        surface: &mut dyn HostSurface,
        payloads: &BTreeMap<Context, ContextPayload>,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (&context, payload) in payloads {
            self.capture_snapshot(surface, context);
            let outcome = self.apply_context(surface, context, payload);
            match &outcome {
                Ok(mechanism) => {
                    log::info!("Applied {} via {mechanism}", context);
                    self.state.set_active(context, payload.style.clone());
                }
                Err(e) => log::error!("{e}"),
            }
            report.outcomes.insert(context, outcome);
        }

        report
    }

    /// Capture the pre-theming appearance exactly once per context.
    fn capture_snapshot(&mut self, surface: &dyn HostSurface, context: Context) {
        if self.state.has_snapshot(context) {
            return;
        }

        let palette = match surface.palette(context) {
            Ok(palette) => Some(palette),
            Err(e) => {
                log::warn!("Snapshot: no palette for {context}: {e}");
                None
            }
        };
        let style_text = match surface.style_text(context) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Snapshot: no style text for {context}: {e}");
                None
            }
        };
        let native_dark = if context == Context::TitleBar {
            match surface.native_dark() {
                Ok(flag) => Some(flag),
                Err(e) => {
                    log::warn!("Snapshot: no native flag: {e}");
                    None
                }
            }
        } else {
            None
        };

        self.state.record_snapshot(
            context,
            SurfaceSnapshot {
                palette,
                style_text,
                native_dark,
            },
        );
    }

    fn apply_context(
        &mut self,
        surface: &mut dyn HostSurface,
        context: Context,
        payload: &ContextPayload,
    ) -> Result<Mechanism, ApplyError> {
        let mut attempts = Vec::new();
        let mut applied = None;

        match surface.set_palette(context, &payload.palette) {
            Ok(()) => applied = Some(Mechanism::PaletteUpdate),
            Err(e) => attempts.push((Mechanism::PaletteUpdate, e.to_string())),
        }

        if applied.is_none() {
            match surface.set_style_text(context, &payload.effective_text()) {
                Ok(()) => applied = Some(Mechanism::StyleText),
                Err(e) => attempts.push((Mechanism::StyleText, e.to_string())),
            }
        }

        match (applied, payload.native_dark) {
            // Additive on top of a successful mechanism.
            (Some(_), Some(flag)) => {
                if let Err(e) = surface.set_native_dark(flag) {
                    log::warn!("Native flag not applied for {context}: {e}");
                }
            }
            // Last fallback when both base mechanisms failed.
            (None, Some(flag)) => match surface.set_native_dark(flag) {
                Ok(()) => applied = Some(Mechanism::NativeFlag),
                Err(e) => attempts.push((Mechanism::NativeFlag, e.to_string())),
            },
            (_, None) => {}
        }

        applied.ok_or(ApplyError { context, attempts })
    }

    /// Reapply the original snapshots and clear the live state.
    ///
    /// Always targets the first-apply snapshot, regardless of what was
    /// applied since; must succeed as far as possible even when
    /// individual restores fail.
    pub fn restore(&mut self, surface: &mut dyn HostSurface) -> RestoreReport {
        let mut report = RestoreReport::default();

        let snapshots: Vec<(Context, SurfaceSnapshot)> = self
            .state
            .snapshots()
            .map(|(context, snap)| (context, snap.clone()))
            .collect();

        for (context, snapshot) in snapshots {
            let mut failed = false;

            if let Some(palette) = &snapshot.palette {
                if let Err(e) = surface.set_palette(context, palette) {
                    report.failures.push((context, e.to_string()));
                    failed = true;
                }
            }
            if let Some(text) = &snapshot.style_text {
                if let Err(e) = surface.set_style_text(context, text) {
                    report.failures.push((context, e.to_string()));
                    failed = true;
                }
            }
            if let Some(flag) = snapshot.native_dark {
                if let Err(e) = surface.set_native_dark(flag) {
                    report.failures.push((context, e.to_string()));
                    failed = true;
                }
            }

            if !failed {
                report.restored.push(context);
            }
        }

        if report.failures.is_empty() {
            log::info!("Restored pre-theming appearance");
        } else {
            for (context, reason) in &report.failures {
                log::error!("Restore failed for {context}: {reason}");
            }
        }

        self.state.clear();
        report
    }
}
