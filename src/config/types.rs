//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::StrokeStyle;
use serde::{Deserialize, Serialize};

/// Surface settings used when a script does not size the canvas itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Surface width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Surface height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Initial surface color, also painted by `clear`
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Cursor pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Maximum number of live cursors (valid range: 1 - 1024)
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,

    /// Color of newly created cursors
    #[serde(default = "default_cursor_color")]
    pub default_color: ColorSpec,

    /// Thickness of newly created cursors in pixels (valid range: 1 - 100)
    #[serde(default = "default_thickness")]
    pub default_thickness: u32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            pool_capacity: default_pool_capacity(),
            default_color: default_cursor_color(),
            default_thickness: default_thickness(),
        }
    }
}

/// Rasterization settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// `precise` (default) or `legacy` thick lines and outlines
    #[serde(default)]
    pub stroke_style: StrokeStyle,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_pool_capacity() -> usize {
    crate::cursor::DEFAULT_CAPACITY
}

fn default_cursor_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_thickness() -> u32 {
    1
}
