//! # Theme System Module
//!
//! Ingestion and application of editor theme definitions. This module
//! owns the typed theme model, the color-space transforms that derive
//! secondary colors from it, and the manager that drives the whole
//! pipeline: load → validate → derive → compile → cache → apply.
//!
//! ## Architecture
//!
//! - **[`ThemeManager`]** - global orchestration and runtime switching
//! - **[`ThemeLoader`]** - lenient loading from raw theme documents and
//!   filesystem discovery
//! - **[`types`]** - the validated in-memory theme model
//! - **[`color`]** - pure RGB/HSV transforms and accent derivation
//! - **Theme Validation** - id, path and definition validators
//!
//! ## Basic Usage
//!
//! ```no_run
//! use veneer::apply::InMemorySurface;
//! use veneer::theme::ThemeManager;
//! # struct NoSources;
//! # impl veneer::conflict::SourceRegistry for NoSources {
//! #     fn installed_sources(&self) -> Vec<String> { Vec::new() }
//! #     fn is_enabled(&self, _: &str) -> bool { false }
//! #     fn set_enabled(&mut self, _: &str, _: bool) -> veneer::error::AppResult<()> { Ok(()) }
//! # }
//!
//! // Initialize at host startup with the host's surface adapter.
//! ThemeManager::init_global(Box::new(InMemorySurface::new()), Box::new(NoSources))?;
//!
//! // Switch themes at runtime.
//! {
//!     let mut manager = ThemeManager::global().lock().unwrap();
//!     manager.switch_theme("one_dark_pro")?;
//! }
//! # Ok::<(), veneer::error::AppError>(())
//! ```
//!
//! ## Error Handling and Fallbacks
//!
//! The theme system degrades gracefully: missing color keys fall back
//! to the defaulting table, broken theme files are skipped during
//! discovery, and a failed switch leaves the previous appearance in
//! place. Nothing in this module is fatal to the host.
//!
//! ## Theme File Structure
//!
//! Themes are JSON documents named `<id>.json` in the themes directory:
//! an object with a `name`, a `colors` mapping of dotted keys to hex
//! strings, and an ordered `tokenColors` list of scope/style pairs.

pub mod color;
pub mod loader;
pub mod manager;
pub mod types;
pub mod validation;

pub use loader::{ThemeListing, ThemeLoader};
pub use manager::ThemeManager;
pub use types::{Color, Context, Kind, ThemeDefinition, TokenRule, TokenStyle};
