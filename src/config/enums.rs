//! Configuration enum types.

use crate::draw::Color;
use serde::{Deserialize, Serialize};

/// Color specification - either a palette name or byte components.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "navy"
///
/// # Custom RGB color (0-255 per component, fully opaque)
/// default_color = [255, 128, 0]
///
/// # Custom RGBA color
/// background = [255, 255, 255, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name such as `black`, `sky_blue` or `forest-green`
    Name(String),
    /// RGB color as [red, green, blue]
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha]
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Resolves the color, returning `None` for unknown names.
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => Color::from_name(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::rgb(*r, *g, *b)),
            ColorSpec::Rgba([r, g, b, a]) => Some(Color::new(*r, *g, *b, *a)),
        }
    }

    /// Converts to a [`Color`].
    ///
    /// Unknown names resolve to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        self.resolve().unwrap_or_else(|| {
            log::warn!("Unknown color '{:?}', using {}", self, fallback);
            fallback
        })
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        match color.name() {
            Some(name) => ColorSpec::Name(name.to_string()),
            None if color.a == 255 => ColorSpec::Rgb([color.r, color.g, color.b]),
            None => ColorSpec::Rgba([color.r, color.g, color.b, color.a]),
        }
    }
}
