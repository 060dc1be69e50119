//! Configuration file support for drawpp.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawpp/config.toml`. Settings include the default canvas,
//! cursor pool limits and defaults, and the stroke rasterization style.
//!
//! If no config file exists, built-in defaults are used: an 800x600 white canvas and
//! ten black, 1-pixel cursors.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, CursorConfig, RenderConfig};

use crate::cursor::EngineOptions;
use crate::draw::{Color, MAX_DIMENSION};
use crate::draw::color::{BLACK, WHITE};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 600
/// background = "white"
///
/// [cursor]
/// pool_capacity = 10
/// default_color = "black"
/// default_thickness = 1
///
/// [render]
/// stroke_style = "precise"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default surface size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Cursor pool capacity and new-cursor defaults
    #[serde(default)]
    pub cursor: CursorConfig,

    /// Rasterization options
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to their
    /// default for unknown color names) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 16384
    /// - `cursor.pool_capacity`: 1 - 1024
    /// - `cursor.default_thickness`: 1 - 100
    fn validate_and_clamp(&mut self) {
        if !(1..=MAX_DIMENSION).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-{MAX_DIMENSION} range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_DIMENSION);
        }

        if !(1..=MAX_DIMENSION).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-{MAX_DIMENSION} range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_DIMENSION);
        }

        if !(1..=1024).contains(&self.cursor.pool_capacity) {
            log::warn!(
                "Invalid pool_capacity {}, clamping to 1-1024 range",
                self.cursor.pool_capacity
            );
            self.cursor.pool_capacity = self.cursor.pool_capacity.clamp(1, 1024);
        }

        if !(1..=100).contains(&self.cursor.default_thickness) {
            log::warn!(
                "Invalid default_thickness {}, clamping to 1-100 range",
                self.cursor.default_thickness
            );
            self.cursor.default_thickness = self.cursor.default_thickness.clamp(1, 100);
        }

        if self.canvas.background.resolve().is_none() {
            log::warn!(
                "Unknown canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = WHITE.into();
        }

        if self.cursor.default_color.resolve().is_none() {
            log::warn!(
                "Unknown cursor default_color {:?}, falling back to black",
                self.cursor.default_color
            );
            self.cursor.default_color = BLACK.into();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/drawpp/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawpp");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Canvas background as a resolved color.
    pub fn background(&self) -> Color {
        self.canvas.background.to_color_or(WHITE)
    }

    /// Builds cursor engine settings from this configuration.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            capacity: self.cursor.pool_capacity,
            default_color: self.cursor.default_color.to_color_or(BLACK),
            default_thickness: self.cursor.default_thickness,
            stroke_style: self.render.stroke_style,
            background: self.background(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::StrokeStyle;
    use crate::draw::color::NAVY;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn defaults_without_config_file() {
        let options = Config::default().engine_options();
        assert_eq!(options.capacity, 10);
        assert_eq!(options.default_color, BLACK);
        assert_eq!(options.default_thickness, 1);
        assert_eq!(options.stroke_style, StrokeStyle::Precise);
        assert_eq!(options.background, WHITE);
    }

    #[test]
    fn load_from_reads_partial_files() {
        let (_temp, path) = write_config(
            r#"
            [cursor]
            default_color = "navy"

            [render]
            stroke_style = "legacy"
            "#,
        );
        let config = Config::load_from(&path).unwrap();
        let options = config.engine_options();
        assert_eq!(options.default_color, NAVY);
        assert_eq!(options.stroke_style, StrokeStyle::Legacy);
        assert_eq!(config.canvas.width, 800);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let (_temp, path) = write_config(
            r#"
            [canvas]
            width = 0
            height = 99999
            background = "no-such-color"

            [cursor]
            pool_capacity = 5000
            default_thickness = 0
            "#,
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 16384);
        assert_eq!(config.cursor.pool_capacity, 1024);
        assert_eq!(config.cursor.default_thickness, 1);
        assert_eq!(config.background(), WHITE);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let (_temp, path) = write_config("[canvas\nwidth = ");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn unknown_stroke_style_is_rejected() {
        let (_temp, path) = write_config("[render]\nstroke_style = \"fancy\"\n");
        assert!(Config::load_from(&path).is_err());
    }
}
