//! Pure color-space transforms.
//!
//! Everything here is stateless and deterministic: identical inputs
//! always produce identical outputs, which the style cache and the
//! reproducibility tests rely on.

use crate::theme::types::{Color, Kind};

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Perceptual luminance of a color, in `[0, 1]`.
///
/// Uses the Rec. 601 weighting (0.299 R + 0.587 G + 0.114 B), the same
/// rule the theme classifier and the contrast picker share.
pub fn luminance(color: Color) -> f64 {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Convert a color to HSV. Alpha is not part of the transform.
pub fn to_hsv(color: Color) -> Hsv {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        (((g - b) / delta).rem_euclid(6.0)) / 6.0
    } else if max == g {
        (((b - r) / delta) + 2.0) / 6.0
    } else {
        (((r - g) / delta) + 4.0) / 6.0
    };

    Hsv { h, s, v }
}

/// Convert HSV back to an opaque color.
pub fn to_rgb(hsv: Hsv) -> Color {
    let h = hsv.h.rem_euclid(1.0) * 6.0;
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Color::rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Derive the window-frame accent from a theme's editor background.
///
/// Dark themes get a slightly lighter, desaturated frame; light themes a
/// slightly darker one. The value caps (0.30 dark, 0.70 light) keep the
/// derived color on its side of the perceptual boundary no matter how
/// extreme the source background is. Hue is preserved so the frame stays
/// visually tied to the background.
///
/// `accent` (typically the button background) is accepted as an input
/// for future blending but the current fixed policy derives from the
/// background alone.
pub fn derive_title_bar_color(background: Color, accent: Color, kind: Kind) -> Color {
    let _ = accent; // reserved input, see above
    let hsv = to_hsv(background);

    let (s, v) = match kind {
        Kind::Dark | Kind::Unknown => ((hsv.s * 0.7), (hsv.v + 0.08).min(0.30)),
        Kind::Light => ((hsv.s * 0.8), (hsv.v - 0.05).max(0.70)),
    };

    to_rgb(Hsv { h: hsv.h, s, v })
}

/// Foreground that contrasts with `background`, chosen by the same
/// luminance rule as theme classification.
pub fn contrasting_foreground(background: Color) -> Color {
    match Kind::classify(background) {
        Kind::Dark | Kind::Unknown => Color::rgb(0xff, 0xff, 0xff),
        Kind::Light => Color::rgb(0x1e, 0x1e, 0x1e),
    }
}
