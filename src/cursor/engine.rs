//! Turtle-style motion and cursor-relative drawing.

use super::error::CursorError;
use super::pool::{Cursor, CursorDefaults, CursorHandle, CursorPool, DEFAULT_CAPACITY};
use crate::draw::color::{BLACK, WHITE};
use crate::draw::{Color, Pen, Rasterizer, RenderTarget, StrokeStyle};
use log::{debug, info, warn};

/// Settings the engine is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Number of cursor slots
    pub capacity: usize,
    /// Color given to new cursors
    pub default_color: Color,
    /// Thickness given to new cursors
    pub default_thickness: u32,
    /// Thick-line and outline rasterization
    pub stroke_style: StrokeStyle,
    /// Color painted by [`CursorEngine::clear_area`]
    pub background: Color,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_color: BLACK,
            default_thickness: 1,
            stroke_style: StrokeStyle::default(),
            background: WHITE,
        }
    }
}

/// Owns the cursor pool and translates cursor commands into shapes.
///
/// Motion and attribute methods return `true` when the command was applied and
/// `false` when the handle no longer refers to a live cursor. Drawing methods
/// additionally return `false` for hidden cursors: visibility only suppresses
/// rendering, hidden cursors keep moving and rotating.
#[derive(Debug, Clone)]
pub struct CursorEngine {
    pool: CursorPool,
    stroke_style: StrokeStyle,
    background: Color,
}

impl Default for CursorEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl CursorEngine {
    pub fn new(options: EngineOptions) -> Self {
        let defaults = CursorDefaults {
            color: options.default_color,
            thickness: options.default_thickness,
        };
        Self {
            pool: CursorPool::with_defaults(options.capacity, defaults),
            stroke_style: options.stroke_style,
            background: options.background,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.stroke_style = style;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Returns the live cursor behind `handle`.
    pub fn cursor(&self, handle: CursorHandle) -> Option<&Cursor> {
        self.pool.get(handle)
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Creates a cursor at `(x, y)` heading 0° with the default attributes.
    pub fn create_cursor(&mut self, x: f64, y: f64) -> Result<CursorHandle, CursorError> {
        match self.pool.create(x, y) {
            Ok(handle) => {
                debug!("Created cursor {} at ({x:.2}, {y:.2})", handle.index());
                Ok(handle)
            }
            Err(err) => {
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Deactivates every cursor. Outstanding handles become no-ops.
    pub fn deactivate_all(&mut self) -> usize {
        let released = self.pool.deactivate_all();
        debug!("Deactivated {released} cursor(s)");
        released
    }

    /// Logs and returns the position of a live cursor.
    pub fn report_position(&self, handle: CursorHandle) -> Option<(f64, f64)> {
        let cursor = self.pool.get(handle)?;
        info!("Cursor {}: {}", handle.index(), cursor);
        Some(cursor.position())
    }

    // ------------------------------------------------------------------------
    // Motion and attributes
    // ------------------------------------------------------------------------

    /// Advances the cursor by `distance` along its heading (negative moves backward).
    pub fn move_cursor(&mut self, handle: CursorHandle, distance: f64) -> bool {
        if !distance.is_finite() {
            warn!("Ignoring non-finite move distance {distance}");
            return false;
        }
        let Some(cursor) = self.live_mut(handle, "move") else {
            return false;
        };
        let (dx, dy) = direction(cursor.heading);
        cursor.x += distance * dx;
        cursor.y += distance * dy;
        true
    }

    /// Adds `delta` degrees to the heading, keeping it in `[0, 360)`.
    pub fn rotate(&mut self, handle: CursorHandle, delta: f64) -> bool {
        if !delta.is_finite() {
            warn!("Ignoring non-finite rotation {delta}");
            return false;
        }
        let Some(cursor) = self.live_mut(handle, "rotate") else {
            return false;
        };
        cursor.heading = normalize_heading(cursor.heading + delta);
        true
    }

    pub fn set_color(&mut self, handle: CursorHandle, color: Color) -> bool {
        let Some(cursor) = self.live_mut(handle, "set_color") else {
            return false;
        };
        cursor.color = color;
        true
    }

    pub fn set_visibility(&mut self, handle: CursorHandle, visible: bool) -> bool {
        let Some(cursor) = self.live_mut(handle, "set_visibility") else {
            return false;
        };
        cursor.visible = visible;
        true
    }

    /// Sets the stroke width. Non-positive values are rejected and leave the
    /// cursor unchanged.
    pub fn set_thickness(&mut self, handle: CursorHandle, thickness: i64) -> Result<bool, CursorError> {
        let thickness = u32::try_from(thickness)
            .ok()
            .filter(|t| *t > 0)
            .ok_or(CursorError::InvalidThickness(thickness))?;
        let Some(cursor) = self.live_mut(handle, "set_thickness") else {
            return Ok(false);
        };
        cursor.thickness = thickness;
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Draws a line of `length` from the cursor position along its heading.
    pub fn draw_line<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        handle: CursorHandle,
        length: f64,
    ) -> bool {
        let Some(cursor) = self.drawable(handle, "draw_line") else {
            return false;
        };
        let (x2, y2) = offset(cursor.x, cursor.y, cursor.heading, length);
        self.rasterizer(target)
            .line(cursor.x, cursor.y, x2, y2, pen(cursor));
        true
    }

    /// Draws a `width`×`height` rectangle whose top-left corner is the cursor.
    pub fn draw_rectangle<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        handle: CursorHandle,
        width: f64,
        height: f64,
        filled: bool,
    ) -> bool {
        let Some(cursor) = self.drawable(handle, "draw_rectangle") else {
            return false;
        };
        self.rasterizer(target)
            .rectangle(cursor.x, cursor.y, width, height, filled, pen(cursor));
        true
    }

    /// Draws a circle centered on the cursor.
    pub fn draw_circle<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        handle: CursorHandle,
        radius: f64,
        filled: bool,
    ) -> bool {
        let Some(cursor) = self.drawable(handle, "draw_circle") else {
            return false;
        };
        self.rasterizer(target)
            .circle(cursor.x, cursor.y, radius, filled, pen(cursor));
        true
    }

    /// Draws a triangle with one vertex on the cursor, one `base` ahead along
    /// the heading and one `height` away at a right angle to it.
    pub fn draw_triangle<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        handle: CursorHandle,
        base: f64,
        height: f64,
        filled: bool,
    ) -> bool {
        let Some(cursor) = self.drawable(handle, "draw_triangle") else {
            return false;
        };
        let vertices = triangle_vertices(cursor, base, height);
        self.rasterizer(target).triangle(vertices, filled, pen(cursor));
        true
    }

    /// Draws an ellipse centered on the cursor.
    pub fn draw_ellipse<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        handle: CursorHandle,
        radius_x: f64,
        radius_y: f64,
        filled: bool,
    ) -> bool {
        let Some(cursor) = self.drawable(handle, "draw_ellipse") else {
            return false;
        };
        self.rasterizer(target)
            .ellipse(cursor.x, cursor.y, radius_x, radius_y, filled, pen(cursor));
        true
    }

    /// Paints a rectangle of the target with the background color.
    pub fn clear_area<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        self.rasterizer(target)
            .clear_area(x, y, width, height, self.background);
    }

    fn rasterizer<'t, T: RenderTarget + ?Sized>(&self, target: &'t mut T) -> Rasterizer<'t, T> {
        Rasterizer::new(target, self.stroke_style)
    }

    fn live_mut(&mut self, handle: CursorHandle, op: &str) -> Option<&mut Cursor> {
        let cursor = self.pool.get_mut(handle);
        if cursor.is_none() {
            debug!("Ignoring {op} on inactive cursor {}", handle.index());
        }
        cursor
    }

    fn drawable(&self, handle: CursorHandle, op: &str) -> Option<&Cursor> {
        match self.pool.get(handle) {
            Some(cursor) if cursor.visible => Some(cursor),
            Some(_) => {
                debug!("Skipping {op} for hidden cursor {}", handle.index());
                None
            }
            None => {
                debug!("Ignoring {op} on inactive cursor {}", handle.index());
                None
            }
        }
    }
}

fn pen(cursor: &Cursor) -> Pen {
    Pen::new(cursor.color, cursor.thickness)
}

/// Folds any finite angle into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Unit vector for a heading in degrees.
pub fn direction(heading: f64) -> (f64, f64) {
    let radians = heading.to_radians();
    (radians.cos(), radians.sin())
}

fn offset(x: f64, y: f64, heading: f64, distance: f64) -> (f64, f64) {
    let (dx, dy) = direction(heading);
    (x + distance * dx, y + distance * dy)
}

fn triangle_vertices(cursor: &Cursor, base: f64, height: f64) -> [(f64, f64); 3] {
    [
        (cursor.x, cursor.y),
        offset(cursor.x, cursor.y, cursor.heading, base),
        offset(cursor.x, cursor.y, cursor.heading + 90.0, height),
    ]
}
