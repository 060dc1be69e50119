//! Render target capability and an in-memory pixel surface.
//!
//! The rasterizer only ever talks to a [`RenderTarget`]; it never creates,
//! presents or disposes of one. [`PixelBuffer`] is the software surface used by
//! the CLI and the tests.

use super::color::{Color, TRANSPARENT};

/// Largest surface side, in pixels, accepted from scripts, config and the CLI.
pub const MAX_DIMENSION: u32 = 16_384;

/// Primitive pixel operations a drawing surface must provide.
///
/// All coordinates are integer surface pixels. Implementations silently discard
/// writes that fall outside the surface.
pub trait RenderTarget {
    /// Sets the color used by subsequent drawing calls.
    fn set_draw_color(&mut self, color: Color);

    /// Plots a single pixel.
    fn draw_point(&mut self, x: i32, y: i32);

    /// Draws a 1-pixel line including both end points.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Fills a `w`×`h` box whose top-left corner is `(x, y)`.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draws the 1-pixel border of a `w`×`h` box.
    fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32);
}

/// Software RGBA surface stored row-major.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    draw_color: Color,
}

impl PixelBuffer {
    /// Creates a surface filled with [`TRANSPARENT`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, TRANSPARENT)
    }

    /// Creates a surface filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
            draw_color: Color::rgb(0, 0, 0),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reads back a pixel, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// The full pixel buffer, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Overwrites every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Number of pixels currently holding exactly `color`.
    pub fn count_color(&self, color: Color) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }

    /// Coordinates of every pixel holding exactly `color`, row-major.
    pub fn coordinates_of(&self, color: Color) -> Vec<(i32, i32)> {
        let width = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == color)
            .map(|(idx, _)| ((idx % width) as i32, (idx / width) as i32))
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn put(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = self.draw_color;
        }
    }

    /// Horizontal run on row `y`, clipped to the surface.
    fn span(&mut self, x1: i64, x2: i64, y: i64) {
        if y < 0 || y >= i64::from(self.height) {
            return;
        }
        let start = x1.min(x2).max(0);
        let end = x1.max(x2).min(i64::from(self.width) - 1);
        for x in start..=end {
            self.put(x as i32, y as i32);
        }
    }

    /// Vertical run in column `x`, clipped to the surface.
    fn column(&mut self, x: i64, y1: i64, y2: i64) {
        if x < 0 || x >= i64::from(self.width) {
            return;
        }
        let start = y1.min(y2).max(0);
        let end = y1.max(y2).min(i64::from(self.height) - 1);
        for y in start..=end {
            self.put(x as i32, y as i32);
        }
    }
}

impl RenderTarget for PixelBuffer {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.put(x, y);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if y1 == y2 {
            self.span(x1.into(), x2.into(), y1.into());
            return;
        }
        if x1 == x2 {
            self.column(x1.into(), y1.into(), y2.into());
            return;
        }

        // Bresenham, all octants
        let dx = (x2 as i64 - x1 as i64).abs();
        let dy = -(y2 as i64 - y1 as i64).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.put(x, y);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y) = (i64::from(x), i64::from(y));
        let right = x + i64::from(w) - 1;
        let top = y.max(0);
        let bottom = (y + i64::from(h)).min(i64::from(self.height));
        for row in top..bottom {
            self.span(x, right, row);
        }
    }

    fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y) = (i64::from(x), i64::from(y));
        let right = x + i64::from(w) - 1;
        let bottom = y + i64::from(h) - 1;
        self.span(x, right, y);
        self.span(x, right, bottom);
        self.column(x, y, bottom);
        self.column(right, y, bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};

    #[test]
    fn out_of_bounds_writes_are_discarded() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.set_draw_color(RED);
        buffer.draw_point(-1, 0);
        buffer.draw_point(4, 4);
        buffer.draw_line(-10, 2, 10, 2);
        assert_eq!(buffer.count_color(RED), 4);
        assert_eq!(buffer.pixel(4, 0), None);
    }

    #[test]
    fn diagonal_line_includes_both_end_points() {
        let mut buffer = PixelBuffer::new(8, 8);
        buffer.set_draw_color(RED);
        buffer.draw_line(6, 6, 1, 1);
        let drawn = buffer.coordinates_of(RED);
        assert_eq!(drawn, (1..=6).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn steep_line_is_continuous() {
        let mut buffer = PixelBuffer::new(10, 10);
        buffer.set_draw_color(RED);
        buffer.draw_line(2, 0, 4, 9);
        for y in 0..10 {
            assert!(
                (0..10).any(|x| buffer.pixel(x, y) == Some(RED)),
                "row {y} should be covered"
            );
        }
    }

    #[test]
    fn fill_and_outline_cover_expected_pixels() {
        let mut buffer = PixelBuffer::with_background(10, 10, WHITE);
        buffer.set_draw_color(RED);
        buffer.fill_rect(1, 1, 3, 2);
        assert_eq!(buffer.count_color(RED), 6);

        buffer.clear(WHITE);
        buffer.draw_rect_outline(0, 0, 4, 3);
        // 4 + 4 top/bottom, plus one interior row on each side
        assert_eq!(buffer.count_color(RED), 10);
        assert_eq!(buffer.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn extreme_coordinates_clip_without_overflow() {
        let mut buffer = PixelBuffer::new(6, 6);
        buffer.set_draw_color(RED);
        buffer.fill_rect(i32::MAX - 1, 0, i32::MAX, 3);
        buffer.fill_rect(0, i32::MAX, 3, i32::MAX);
        buffer.draw_rect_outline(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        buffer.draw_line(2, i32::MIN, 2, i32::MAX);
        // only the column crosses the surface
        assert_eq!(buffer.coordinates_of(RED), (0..6).map(|y| (2, y)).collect::<Vec<_>>());

        buffer.clear(WHITE);
        buffer.fill_rect(-5, 4, i32::MAX, i32::MAX);
        assert_eq!(buffer.count_color(RED), 12);
    }

    #[test]
    fn degenerate_rects_draw_nothing() {
        let mut buffer = PixelBuffer::new(5, 5);
        buffer.set_draw_color(RED);
        buffer.fill_rect(1, 1, 0, 3);
        buffer.draw_rect_outline(1, 1, 3, -2);
        assert_eq!(buffer.count_color(RED), 0);
    }
}
