//! Host surface abstraction the applier targets.
//!
//! The engine never touches the host's widgets directly; everything
//! goes through this trait, which also makes the applier fully
//! testable with the in-memory implementation below.

use crate::theme::types::{Color, Context};

/// Failure talking to the host surface.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SurfaceError {
    /// The surface does not offer this mechanism for this context
    /// (e.g. no structured palette on the document surface).
    #[error("{mechanism} is not supported for {context}")]
    Unsupported {
        context: Context,
        mechanism: &'static str,
    },
    /// The mechanism exists but the host rejected the update.
    #[error("surface update failed: {0}")]
    Failed(String),
}

/// Structured color set for the palette mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSpec {
    pub window: Color,
    pub window_text: Color,
    pub button: Color,
    pub button_text: Color,
    pub highlight: Color,
    pub highlight_text: Color,
}

/// Surface operations, one getter/setter pair per mechanism.
///
/// The getters exist to populate restoration snapshots before the first
/// mutation; the native dark flag only applies to the title bar.
pub trait HostSurface {
    fn palette(&self, context: Context) -> Result<PaletteSpec, SurfaceError>;
    fn set_palette(&mut self, context: Context, palette: &PaletteSpec)
    -> Result<(), SurfaceError>;

    fn style_text(&self, context: Context) -> Result<String, SurfaceError>;
    fn set_style_text(&mut self, context: Context, text: &str) -> Result<(), SurfaceError>;

    fn native_dark(&self) -> Result<bool, SurfaceError>;
    fn set_native_dark(&mut self, enabled: bool) -> Result<(), SurfaceError>;
}

/// In-memory host surface.
///
/// Stands in for a real windowing toolkit in tests and headless hosts;
/// individual mechanisms can be switched off per context to exercise
/// the applier's fallback ordering.
#[derive(Debug, Clone)]
pub struct InMemorySurface {
    palettes: std::collections::BTreeMap<Context, PaletteSpec>,
    style_texts: std::collections::BTreeMap<Context, String>,
    native_dark: bool,
    palette_disabled: std::collections::BTreeSet<Context>,
    style_text_disabled: std::collections::BTreeSet<Context>,
    native_flag_supported: bool,
}

impl InMemorySurface {
    pub fn new() -> Self {
        let default_palette = PaletteSpec {
            window: Color::rgb(0xec, 0xec, 0xec),
            window_text: Color::rgb(0x00, 0x00, 0x00),
            button: Color::rgb(0xe1, 0xe1, 0xe1),
            button_text: Color::rgb(0x00, 0x00, 0x00),
            highlight: Color::rgb(0x30, 0x8c, 0xc6),
            highlight_text: Color::rgb(0xff, 0xff, 0xff),
        };

        let mut palettes = std::collections::BTreeMap::new();
        let mut style_texts = std::collections::BTreeMap::new();
        for context in Context::ALL {
            palettes.insert(context, default_palette.clone());
            style_texts.insert(context, String::new());
        }

        Self {
            palettes,
            style_texts,
            native_dark: false,
            palette_disabled: std::collections::BTreeSet::new(),
            style_text_disabled: std::collections::BTreeSet::new(),
            native_flag_supported: true,
        }
    }

    /// Make the palette mechanism fail for `context`.
    pub fn disable_palette(&mut self, context: Context) {
        self.palette_disabled.insert(context);
    }

    /// Make the style-text mechanism fail for `context`.
    pub fn disable_style_text(&mut self, context: Context) {
        self.style_text_disabled.insert(context);
    }

    /// Drop native dark-flag support entirely.
    pub fn disable_native_flag(&mut self) {
        self.native_flag_supported = false;
    }
}

impl Default for InMemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSurface for InMemorySurface {
    fn palette(&self, context: Context) -> Result<PaletteSpec, SurfaceError> {
        self.palettes
            .get(&context)
            .cloned()
            .ok_or_else(|| SurfaceError::Unsupported {
                context,
                mechanism: "palette",
            })
    }

    fn set_palette(
        &mut self,
        context: Context,
        palette: &PaletteSpec,
    ) -> Result<(), SurfaceError> {
        if self.palette_disabled.contains(&context) {
            return Err(SurfaceError::Unsupported {
                context,
                mechanism: "palette",
            });
        }
        self.palettes.insert(context, palette.clone());
        Ok(())
    }

    fn style_text(&self, context: Context) -> Result<String, SurfaceError> {
        self.style_texts
            .get(&context)
            .cloned()
            .ok_or_else(|| SurfaceError::Unsupported {
                context,
                mechanism: "style-text",
            })
    }

    fn set_style_text(&mut self, context: Context, text: &str) -> Result<(), SurfaceError> {
        if self.style_text_disabled.contains(&context) {
            return Err(SurfaceError::Unsupported {
                context,
                mechanism: "style-text",
            });
        }
        self.style_texts.insert(context, text.to_string());
        Ok(())
    }

    fn native_dark(&self) -> Result<bool, SurfaceError> {
        if !self.native_flag_supported {
            return Err(SurfaceError::Unsupported {
                context: Context::TitleBar,
                mechanism: "native-dark",
            });
        }
        Ok(self.native_dark)
    }

    fn set_native_dark(&mut self, enabled: bool) -> Result<(), SurfaceError> {
        if !self.native_flag_supported {
            return Err(SurfaceError::Unsupported {
                context: Context::TitleBar,
                mechanism: "native-dark",
            });
        }
        self.native_dark = enabled;
        Ok(())
    }
}
