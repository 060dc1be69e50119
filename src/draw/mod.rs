//! Rendering primitives: colors, the render target capability and shape rasterization.
//!
//! This module defines the drawing layer the cursor engine delegates to:
//! - [`Color`]: RGBA color representation with the named palette
//! - [`RenderTarget`]: pixel operations a surface must provide, with [`PixelBuffer`]
//!   as the in-memory implementation
//! - [`Rasterizer`]: line, rectangle, circle, triangle and ellipse drawing
//! - PNG export of a [`PixelBuffer`] through cairo

pub mod color;
pub mod export;
pub mod raster;
pub mod target;

// Re-export commonly used types at module level
pub use color::Color;
pub use export::{ExportError, encode_png, write_png};
pub use raster::{Pen, Rasterizer, StrokeStyle};
pub use target::{MAX_DIMENSION, PixelBuffer, RenderTarget};

pub use color::{BLACK, BLUE, GREEN, RED, TRANSPARENT, WHITE, YELLOW};
