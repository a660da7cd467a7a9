//! RGBA colour type shared by the geometry builder, the compositor's clear
//! step and the configuration file.
//!
//! Stored as four `f32` values in the range 0.0 – 1.0.  In TOML a colour is
//! written as a plain four-element array:
//!
//! ```toml
//! color = [0.7, 0.7, 0.7, 1.0]
//! ```

use serde::{Deserialize, Serialize};

/// RGBA colour, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    // ── Constructors ────────────────────────────────────────────────────────

    /// Opaque colour from red, green, blue components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Colour from all four components.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    // ── Conversions ─────────────────────────────────────────────────────────

    /// Returns `[r, g, b, a]`, the per-vertex layout used by the triangle
    /// program.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `true` when every channel lies in `[0, 1]`.
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Convert to a `wgpu::Color` for use as a clear value.
    #[cfg(feature = "gpu")]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    // ── Palette ─────────────────────────────────────────────────────────────

    pub const WHITE:      Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK:      Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED:        Self = Self::rgb(1.0, 0.0, 0.0);

    pub const GRAY:       Self = Self::rgb(0.5, 0.5, 0.5);
    pub const SILVER:     Self = Self::rgb(0.7, 0.7, 0.7);
    pub const PEARL:      Self = Self::rgb(0.9, 0.9, 0.9);

    /// Interactive-mode background.
    pub const DIM_TEAL:   Self = Self::rgb(0.0, 0.2, 0.2);
}

impl From<[f32; 4]> for Color {
    fn from(a: [f32; 4]) -> Self {
        Self::rgba(a[0], a[1], a[2], a[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_from_toml_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: Color,
        }
        let w: Wrapper = toml::from_str("color = [0.5, 0.25, 0.0, 1.0]").unwrap();
        assert_eq!(w.color, Color::rgba(0.5, 0.25, 0.0, 1.0));
    }

    #[test]
    fn normalization_check() {
        assert!(Color::DIM_TEAL.is_normalized());
        assert!(!Color::rgba(1.5, 0.0, 0.0, 1.0).is_normalized());
    }
}
