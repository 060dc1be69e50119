//! Cursor engine: a bounded pool of turtle-graphics pens.
//!
//! Cursors live in a fixed-capacity [`CursorPool`] and are addressed through
//! generational [`CursorHandle`]s. [`CursorEngine`] exposes turtle-style motion
//! (move along the heading, rotate in degrees), attribute updates and drawing
//! commands that are resolved against the cursor's position and heading before
//! being handed to the [`Rasterizer`](crate::draw::Rasterizer).
//!
//! # Example
//!
//! ```
//! use drawpp::cursor::CursorEngine;
//! use drawpp::draw::{PixelBuffer, RED};
//!
//! let mut engine = CursorEngine::default();
//! let mut surface = PixelBuffer::new(200, 200);
//!
//! let pen = engine.create_cursor(100.0, 100.0).unwrap();
//! engine.set_color(pen, RED);
//! engine.rotate(pen, 90.0);
//! engine.draw_line(&mut surface, pen, 50.0);
//!
//! assert_eq!(surface.pixel(100, 150), Some(RED));
//! ```

mod engine;
mod error;
mod pool;

pub use engine::{CursorEngine, EngineOptions, direction, normalize_heading};
pub use error::CursorError;
pub use pool::{Cursor, CursorDefaults, CursorHandle, CursorPool, DEFAULT_CAPACITY};
