//! Turtle-style drawing engine.
//!
//! Named cursors carry a position, heading, color, thickness and visibility;
//! drawing commands are interpreted relative to a cursor and rasterized onto a
//! [`draw::RenderTarget`]. The [`script`] module drives the engine from a small
//! line-oriented language, and [`draw::export`] writes finished surfaces as PNG.

pub mod config;
pub mod cursor;
pub mod draw;
pub mod script;

pub use config::Config;
pub use cursor::{CursorEngine, CursorHandle, EngineOptions};
