//! Detection of competing style sources.
//!
//! Detection is identity-based: the monitor checks a maintained list of
//! known-conflicting source identifiers against what the host reports
//! as installed, never inspecting foreign style content. Disabling a
//! competing source is only ever done with an explicit consent decision
//! from the caller.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Severity of a known conflict, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Moderate,
}

/// A style source known to fight for visual control of the same
/// surfaces. Identified by a stable external id.
#[derive(Debug, Clone, Copy)]
pub struct KnownConflict {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub priority: u8,
}

/// Registry of known-conflicting sources, ordered by priority.
pub const KNOWN_CONFLICTS: &[KnownConflict] = &[
    KnownConflict {
        id: "374005964",
        name: "The KING of Button Add-ons",
        severity: Severity::Critical,
        priority: 1,
    },
    KnownConflict {
        id: "594329229",
        name: "Colorful Tags (+ Hierarchical Tags)",
        severity: Severity::High,
        priority: 2,
    },
    KnownConflict {
        id: "1771074083",
        name: "Review Heatmap",
        severity: Severity::Moderate,
        priority: 3,
    },
    KnownConflict {
        id: "952691989",
        name: "AnKing Note Types (Easy Customization)",
        severity: Severity::Moderate,
        priority: 4,
    },
];

/// Explicit user decision about a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep both; live with the visual fighting.
    Ignored,
    /// The user was asked and declined any action.
    UserDeclined,
    /// The user consented to disabling the competing source.
    Disabled,
}

/// One detected conflict, resolved only by explicit user decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictRecord {
    pub source_id: String,
    pub name: String,
    pub severity: Severity,
    pub detected_at: DateTime<Utc>,
    pub resolution: Option<Resolution>,
}

/// Monitor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Scanning,
    Clean,
    ConflictFound,
}

/// What the host knows about other installed style sources.
///
/// The engine only ever reads identity and enablement, and flips
/// enablement off after explicit consent.
pub trait SourceRegistry {
    fn installed_sources(&self) -> Vec<String>;
    fn is_enabled(&self, id: &str) -> bool;
    fn set_enabled(&mut self, id: &str, enabled: bool) -> AppResult<()>;
}

/// Periodic and event-driven conflict scanning.
///
/// Scheduled on the host's single-threaded event timeline: the host
/// calls [`ConflictMonitor::poll`] from its timer and
/// [`ConflictMonitor::scan`] on theme-change events. No worker threads.
pub struct ConflictMonitor {
    state: MonitorState,
    records: Vec<ConflictRecord>,
    scan_interval: Duration,
    last_scan: Option<DateTime<Utc>>,
}

impl ConflictMonitor {
    pub fn new(scan_interval: Duration) -> Self {
        Self {
            state: MonitorState::Idle,
            records: Vec::new(),
            scan_interval,
            last_scan: None,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn records(&self) -> &[ConflictRecord] {
        &self.records
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ConflictRecord> {
        self.records.iter().filter(|r| r.resolution.is_none())
    }

    /// Run a scan if the configured interval has elapsed.
    pub fn poll(&mut self, registry: &dyn SourceRegistry, now: DateTime<Utc>) -> bool {
        let due = match self.last_scan {
            None => true,
            Some(last) => {
                let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
                elapsed >= self.scan_interval
            }
        };

        if due {
            self.scan_at(registry, now);
        }
        due
    }

    /// Scan now (explicit theme-change trigger).
    pub fn scan(&mut self, registry: &dyn SourceRegistry) -> &[ConflictRecord] {
        self.scan_at(registry, Utc::now())
    }

    fn scan_at(&mut self, registry: &dyn SourceRegistry, now: DateTime<Utc>) -> &[ConflictRecord] {
        self.state = MonitorState::Scanning;
        self.last_scan = Some(now);

        let installed = registry.installed_sources();
        log::debug!("Conflict scan over {} installed sources", installed.len());

        let mut detected: Vec<&KnownConflict> = KNOWN_CONFLICTS
            .iter()
            .filter(|known| installed.iter().any(|id| id == known.id))
            .filter(|known| registry.is_enabled(known.id))
            .collect();
        detected.sort_by_key(|known| known.priority);

        for known in detected {
            let already_recorded = self.records.iter().any(|r| r.source_id == known.id);
            if already_recorded {
                continue;
            }

            log::warn!(
                "Conflicting style source detected: {} ({:?})",
                known.name,
                known.severity
            );
            self.records.push(ConflictRecord {
                source_id: known.id.to_string(),
                name: known.name.to_string(),
                severity: known.severity,
                detected_at: now,
                resolution: None,
            });
        }

        self.state = if self.unresolved().next().is_some() {
            MonitorState::ConflictFound
        } else {
            MonitorState::Clean
        };

        &self.records
    }

    /// Apply an explicit user decision to a detected conflict.
    ///
    /// `Resolution::Disabled` is the only mutating action and requires
    /// that exact consent value; the monitor never disables another
    /// component on its own.
    pub fn resolve(
        &mut self,
        source_id: &str,
        decision: Resolution,
        registry: &mut dyn SourceRegistry,
    ) -> AppResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.source_id == source_id && r.resolution.is_none())
            .ok_or_else(|| {
                AppError::Apply(format!("no unresolved conflict for source '{source_id}'"))
            })?;

        if decision == Resolution::Disabled {
            registry.set_enabled(source_id, false)?;
            log::info!("Disabled conflicting source {} with consent", record.name);
        } else {
            log::info!("Conflict with {} resolved as {decision:?}", record.name);
        }
        record.resolution = Some(decision);

        if self.unresolved().next().is_none() {
            self.state = MonitorState::Idle;
        }
        Ok(())
    }
}
