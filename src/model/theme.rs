//! Theme palette resolved from the OS light/dark preference.
//!
//! The snapshot is taken once when the popup is constructed and is not
//! refreshed while the process runs; a theme change mid-run shows up after
//! a restart. Known limitation, kept as-is.

use super::constants::FONT_FALLBACK;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized components for rendering backends that take floats.
    pub fn to_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Colors and font family the popup renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSnapshot {
    pub background: Rgb,
    pub foreground: Rgb,
    pub border: Rgb,
    pub font_family: String,
}

impl ThemeSnapshot {
    /// Palette for the given OS preference, with the font family the
    /// platform layer detected.
    pub fn resolve(light: bool, font_family: impl Into<String>) -> Self {
        let (background, foreground, border) = if light {
            (
                Rgb::new(245, 245, 245),
                Rgb::new(12, 12, 12),
                Rgb::new(210, 210, 210),
            )
        } else {
            (
                Rgb::new(32, 32, 32),
                Rgb::new(234, 234, 234),
                Rgb::new(58, 58, 58),
            )
        };
        Self {
            background,
            foreground,
            border,
            font_family: font_family.into(),
        }
    }

    /// Whether this is the light palette (light palettes have a light
    /// background).
    pub fn is_light(&self) -> bool {
        self.background.r >= 128
    }
}

impl Default for ThemeSnapshot {
    fn default() -> Self {
        Self::resolve(true, FONT_FALLBACK)
    }
}
