//! Shape rasterization onto a [`RenderTarget`].
//!
//! Every shape is converted into points, 1-pixel lines and rectangles on the
//! injected target. Floating-point coordinates are truncated toward zero where
//! they become pixels and clamped to `±`[`COORD_LIMIT`]; stroke widths are
//! clamped to `1..=`[`MAX_STROKE_WIDTH`]. Within those bounds every offset fits
//! in `i32`, so arbitrarily distant finite input lands off-surface instead of
//! overflowing. Degenerate input (zero radius, zero-length line, collinear
//! triangle) draws nothing or a single point; the rasterizer never fails.

use super::color::Color;
use super::target::RenderTarget;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Angular step, in radians, between samples of a [`StrokeStyle::Legacy`] outline.
pub const ANGULAR_STEP: f64 = 0.01;

/// Largest pixel coordinate or extent handed to the target, in either direction.
pub const COORD_LIMIT: i32 = 1 << 20;

/// Widest stroke the rasterizer will expand, in pixels.
pub const MAX_STROKE_WIDTH: i32 = 1024;

/// How thick lines and circle/ellipse outlines are expanded into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    /// Reproduces the classic DrawPP renderer: thick lines are
    /// stacked vertically (only correct for near-horizontal strokes) and
    /// outlines are sampled every [`ANGULAR_STEP`] radians, which leaves gaps
    /// on large rings.
    Legacy,
    /// Thick lines are stacked along the minor axis (x for steep lines, y
    /// otherwise) with the copy count scaled by `length / major extent`, so the
    /// stroke is about `thickness` pixels wide measured across its direction.
    /// Outlines use the midpoint circle/ellipse algorithms.
    #[default]
    Precise,
}

/// Color and stroke width applied to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Color,
    pub thickness: u32,
}

impl Pen {
    pub fn new(color: Color, thickness: u32) -> Self {
        Self { color, thickness }
    }

    fn width(&self) -> i32 {
        self.thickness.clamp(1, MAX_STROKE_WIDTH as u32) as i32
    }
}

/// Draws shapes onto a borrowed render target.
pub struct Rasterizer<'a, T: RenderTarget + ?Sized> {
    target: &'a mut T,
    style: StrokeStyle,
}

impl<'a, T: RenderTarget + ?Sized> Rasterizer<'a, T> {
    pub fn new(target: &'a mut T, style: StrokeStyle) -> Self {
        Self { target, style }
    }

    /// Draws a line from `(x1, y1)` to `(x2, y2)` as parallel 1-pixel lines.
    ///
    /// Legacy offsets copies by `-⌊t/2⌋..=⌊t/2⌋` along y; Precise stacks
    /// `round(t · length / major)` copies along the minor axis.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen) {
        self.target.set_draw_color(pen.color);
        self.stroke_segment(px(x1), px(y1), px(x2), px(y2), pen.width());
    }

    /// Draws an axis-aligned rectangle with its top-left corner at `(x, y)`.
    ///
    /// Outlines grow outward: border `i` is inset by `-i` on every side.
    pub fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, pen: Pen) {
        let ((x, w), (y, h)) = (px_extent(x, w), px_extent(y, h));
        self.target.set_draw_color(pen.color);

        if filled {
            self.target.fill_rect(x, y, w, h);
            return;
        }

        for i in 0..pen.width() {
            self.target
                .draw_rect_outline(x - i, y - i, w.saturating_add(2 * i), h.saturating_add(2 * i));
        }
    }

    /// Draws a circle centered on `(cx, cy)`. Non-positive radii draw nothing.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, filled: bool, pen: Pen) {
        let (cx, cy, r) = (px(cx), px(cy), px(radius));
        if r <= 0 {
            return;
        }
        self.target.set_draw_color(pen.color);

        if filled {
            let r2 = r as i64 * r as i64;
            for dx in -r..=r {
                let hy = ((r2 - dx as i64 * dx as i64) as f64).sqrt() as i32;
                self.target.draw_line(cx + dx, cy - hy, cx + dx, cy + hy);
            }
            return;
        }

        for ring in 0..pen.width() {
            let radius = r.saturating_add(ring);
            match self.style {
                StrokeStyle::Legacy => self.sampled_ring(cx, cy, radius, radius),
                StrokeStyle::Precise => self.midpoint_circle(cx, cy, radius),
            }
        }
    }

    /// Draws the triangle with the given vertices.
    ///
    /// Filled triangles use a scanline fill where each edge covers the
    /// half-open row range `[min(ya, yb), max(ya, yb))`; horizontal edges
    /// contribute no intersection and are covered by their neighbours' spans.
    pub fn triangle(&mut self, vertices: [(f64, f64); 3], filled: bool, pen: Pen) {
        let [a, b, c] = vertices.map(|(x, y)| (px(x), px(y)));
        self.target.set_draw_color(pen.color);

        if !filled {
            let width = pen.width();
            self.stroke_segment(a.0, a.1, b.0, b.1, width);
            self.stroke_segment(b.0, b.1, c.0, c.1, width);
            self.stroke_segment(c.0, c.1, a.0, a.1, width);
            return;
        }

        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        for y in min_y..=max_y {
            if let Some((x_start, x_end)) = scanline_span([a, b, c], y) {
                self.target.draw_line(x_start, y, x_end, y);
            }
        }
    }

    /// Draws an ellipse centered on `(cx, cy)` with radii `rx` and `ry`.
    /// Non-positive radii draw nothing.
    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, filled: bool, pen: Pen) {
        let (cx, cy, rx, ry) = (px(cx), px(cy), px(rx), px(ry));
        if rx <= 0 || ry <= 0 {
            return;
        }
        self.target.set_draw_color(pen.color);

        if filled {
            let rx2 = rx as f64 * rx as f64;
            for dx in -rx..=rx {
                let h = ry as f64 * (1.0 - (dx as f64 * dx as f64) / rx2).sqrt();
                let (top, bottom) = (px(cy as f64 - h), px(cy as f64 + h));
                self.target.draw_line(cx + dx, top, cx + dx, bottom);
            }
            return;
        }

        for ring in 0..pen.width() {
            let (rx, ry) = (rx.saturating_add(ring), ry.saturating_add(ring));
            match self.style {
                StrokeStyle::Legacy => self.sampled_ring(cx, cy, rx, ry),
                StrokeStyle::Precise => self.midpoint_ellipse(cx, cy, rx, ry),
            }
        }
    }

    /// Fills a rectangle with `background`, erasing whatever was drawn there.
    pub fn clear_area(&mut self, x: f64, y: f64, w: f64, h: f64, background: Color) {
        let ((x, w), (y, h)) = (px_extent(x, w), px_extent(y, h));
        self.target.set_draw_color(background);
        self.target.fill_rect(x, y, w, h);
    }

    fn stroke_segment(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32) {
        let half = width / 2;
        match self.style {
            StrokeStyle::Legacy => {
                for i in -half..=half {
                    self.target.draw_line(x1, y1 + i, x2, y2 + i);
                }
            }
            StrokeStyle::Precise => {
                let (dx, dy) = (f64::from(x2 - x1), f64::from(y2 - y1));
                let x_major = dx.abs() >= dy.abs();
                let major = dx.abs().max(dy.abs());
                // Minor-axis copies sit 1/cos(θ) apart across the stroke.
                let scale = if major > 0.0 { dx.hypot(dy) / major } else { 1.0 };
                let copies = ((f64::from(width) * scale).round() as i32).max(1);
                let first = -(copies / 2);
                for i in first..first + copies {
                    let (ox, oy) = if x_major { (0, i) } else { (i, 0) };
                    self.target.draw_line(x1 + ox, y1 + oy, x2 + ox, y2 + oy);
                }
            }
        }
    }

    fn sampled_ring(&mut self, cx: i32, cy: i32, rx: i32, ry: i32) {
        let samples = (TAU / ANGULAR_STEP).ceil() as usize;
        for step in 0..samples {
            let angle = step as f64 * ANGULAR_STEP;
            let x = cx + px(rx as f64 * angle.cos());
            let y = cy + px(ry as f64 * angle.sin());
            self.target.draw_point(x, y);
        }
    }

    fn midpoint_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        let (mut x, mut y) = (radius, 0);
        let mut d = 1 - radius as i64;
        while x >= y {
            self.plot_octants(cx, cy, x, y);
            y += 1;
            if d < 0 {
                d += 2 * y as i64 + 1;
            } else {
                x -= 1;
                d += 2 * (y as i64 - x as i64) + 1;
            }
        }
    }

    fn midpoint_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32) {
        // Decision variables are scaled by 4 to stay in integers; i128 keeps
        // rx²·ry² exact up to COORD_LIMIT radii.
        let rx2 = i128::from(rx) * i128::from(rx);
        let ry2 = i128::from(ry) * i128::from(ry);
        let (mut x, mut y) = (0i128, i128::from(ry));
        let mut dx = 0i128;
        let mut dy = 2 * rx2 * y;

        let mut p = 4 * ry2 - 4 * rx2 * i128::from(ry) + rx2;
        while dx < dy {
            self.plot_quadrants(cx, cy, x as i32, y as i32);
            x += 1;
            dx += 2 * ry2;
            if p < 0 {
                p += 4 * (dx + ry2);
            } else {
                y -= 1;
                dy -= 2 * rx2;
                p += 4 * (dx - dy + ry2);
            }
        }

        let mut p = ry2 * (2 * x + 1) * (2 * x + 1) + 4 * rx2 * (y - 1) * (y - 1) - 4 * rx2 * ry2;
        while y >= 0 {
            self.plot_quadrants(cx, cy, x as i32, y as i32);
            y -= 1;
            dy -= 2 * rx2;
            if p > 0 {
                p += 4 * (rx2 - dy);
            } else {
                x += 1;
                dx += 2 * ry2;
                p += 4 * (dx - dy + rx2);
            }
        }
    }

    fn plot_octants(&mut self, cx: i32, cy: i32, x: i32, y: i32) {
        self.plot_quadrants(cx, cy, x, y);
        self.plot_quadrants(cx, cy, y, x);
    }

    fn plot_quadrants(&mut self, cx: i32, cy: i32, x: i32, y: i32) {
        self.target.draw_point(cx + x, cy + y);
        self.target.draw_point(cx - x, cy + y);
        self.target.draw_point(cx + x, cy - y);
        self.target.draw_point(cx - x, cy - y);
    }
}

/// Truncates a surface coordinate to its pixel, clamped to `±COORD_LIMIT`.
fn px(value: f64) -> i32 {
    let limit = f64::from(COORD_LIMIT);
    // NaN saturates to 0 in the cast.
    value.clamp(-limit, limit) as i32
}

/// Pixel origin and size of a box edge, clamping both corners rather than the
/// size so clamped boxes keep their far edge off-surface.
fn px_extent(origin: f64, size: f64) -> (i32, i32) {
    let start = px(origin);
    let end = px(origin.trunc() + size.trunc());
    (start, end - start)
}

/// Computes the horizontal span of a triangle on row `y`, if the row crosses it.
pub(crate) fn scanline_span(vertices: [(i32, i32); 3], y: i32) -> Option<(i32, i32)> {
    let mut intersections = [0.0f64; 2];
    let mut count = 0;

    for i in 0..3 {
        let (xa, ya) = vertices[i];
        let (xb, yb) = vertices[(i + 1) % 3];
        let crosses = (ya <= y && yb > y) || (yb <= y && ya > y);
        if crosses && count < 2 {
            intersections[count] =
                xa as f64 + (y - ya) as f64 * (xb - xa) as f64 / (yb - ya) as f64;
            count += 1;
        }
    }

    if count < 2 {
        return None;
    }
    let start = intersections[0].min(intersections[1]);
    let end = intersections[0].max(intersections[1]);
    Some((px(start), px(end)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED, TRANSPARENT};
    use crate::draw::target::PixelBuffer;

    fn canvas() -> PixelBuffer {
        PixelBuffer::new(200, 200)
    }

    fn red(thickness: u32) -> Pen {
        Pen::new(RED, thickness)
    }

    #[test]
    fn scanline_through_right_triangle_covers_zero_to_five() {
        let span = scanline_span([(0, 0), (10, 0), (0, 10)], 5);
        assert_eq!(span, Some((0, 5)));
    }

    #[test]
    fn scanline_skips_horizontal_edges_and_bottom_row() {
        let vertices = [(0, 0), (10, 0), (0, 10)];
        // top row is crossed by the two slanted edges only
        assert_eq!(scanline_span(vertices, 0), Some((0, 10)));
        // the half-open test excludes the lowest vertex row
        assert_eq!(scanline_span(vertices, 10), None);
        assert_eq!(scanline_span(vertices, 11), None);
    }

    #[test]
    fn filled_triangle_draws_one_span_per_row() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).triangle(
            [(50.0, 50.0), (60.0, 50.0), (50.0, 60.0)],
            true,
            red(1),
        );
        let row: Vec<i32> = (0..200)
            .filter(|x| buffer.pixel(*x, 55) == Some(RED))
            .collect();
        assert_eq!(row, (50..=55).collect::<Vec<_>>());
    }

    #[test]
    fn collinear_triangle_draws_nothing_when_filled() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).triangle(
            [(10.0, 10.0), (20.0, 10.0), (30.0, 10.0)],
            true,
            red(1),
        );
        assert_eq!(buffer.count_color(RED), 0);
    }

    #[test]
    fn filled_circle_stays_inside_radius() {
        let mut buffer = canvas();
        let r = 20;
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).circle(100.0, 100.0, r as f64, true, red(1));

        let drawn = buffer.coordinates_of(RED);
        for (x, y) in &drawn {
            let (dx, dy) = (x - 100, y - 100);
            assert!(dx * dx + dy * dy <= r * r, "({x}, {y}) lies outside the circle");
        }
        // area is close to πr² (chord fill truncates toward the center)
        let area = std::f64::consts::PI * (r * r) as f64;
        assert!((drawn.len() as f64) > area * 0.9 && (drawn.len() as f64) <= area * 1.1);
    }

    #[test]
    fn zero_and_negative_radii_are_noops() {
        let mut buffer = canvas();
        let mut raster = Rasterizer::new(&mut buffer, StrokeStyle::Legacy);
        raster.circle(50.0, 50.0, 0.0, true, red(1));
        raster.circle(50.0, 50.0, -4.0, false, red(3));
        raster.ellipse(50.0, 50.0, 0.0, 10.0, true, red(1));
        raster.ellipse(50.0, 50.0, 10.0, -1.0, false, red(1));
        assert_eq!(buffer.count_color(TRANSPARENT), 200 * 200);
    }

    #[test]
    fn legacy_thick_line_stacks_vertically() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Legacy).line(10.0, 10.0, 10.0, 20.0, red(3));
        // a vertical stroke only grows in length, not width
        let columns: std::collections::BTreeSet<i32> =
            buffer.coordinates_of(RED).iter().map(|(x, _)| *x).collect();
        assert_eq!(columns.into_iter().collect::<Vec<_>>(), vec![10]);
        assert_eq!(buffer.pixel(10, 9), Some(RED));
        assert_eq!(buffer.pixel(10, 21), Some(RED));
    }

    #[test]
    fn precise_thick_line_widens_across_direction() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).line(10.0, 10.0, 10.0, 20.0, red(3));
        for x in 9..=11 {
            assert_eq!(buffer.pixel(x, 15), Some(RED), "column {x}");
        }
        assert_eq!(buffer.pixel(10, 9), Some(TRANSPARENT));
        assert_eq!(buffer.pixel(10, 21), Some(TRANSPARENT));
    }

    #[test]
    fn precise_thick_diagonal_scales_copies_with_slope() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).line(10.0, 10.0, 40.0, 40.0, red(3));
        // round(3·√2) = 4 disjoint copies of a 31-pixel diagonal, offsets -2..=1
        assert_eq!(buffer.count_color(RED), 4 * 31);
        for y_offset in -2..=1 {
            assert_eq!(buffer.pixel(25, 25 + y_offset), Some(RED), "copy {y_offset}");
        }
        assert_eq!(buffer.pixel(25, 27), Some(TRANSPARENT));
        assert_eq!(buffer.pixel(25, 22), Some(TRANSPARENT));
    }

    #[test]
    fn precise_width_across_stroke_matches_thickness() {
        // a 45° stroke of thickness 5 gets round(5·√2) = 7 copies,
        // 7/√2 ≈ 4.95 pixels wide along the normal
        let mut diagonal = canvas();
        Rasterizer::new(&mut diagonal, StrokeStyle::Precise).line(20.0, 20.0, 120.0, 120.0, red(5));
        let column: Vec<i32> = (0..200)
            .filter(|y| diagonal.pixel(70, *y) == Some(RED))
            .collect();
        assert_eq!(column, (67..=73).collect::<Vec<_>>());

        // axis-aligned strokes keep exactly t copies for odd t
        let mut vertical = canvas();
        Rasterizer::new(&mut vertical, StrokeStyle::Precise).line(50.0, 10.0, 50.0, 30.0, red(5));
        assert_eq!(vertical.count_color(RED), 5 * 21);
    }

    #[test]
    fn far_off_surface_shapes_do_not_overflow() {
        let mut buffer = canvas();
        let mut raster = Rasterizer::new(&mut buffer, StrokeStyle::Precise);
        raster.circle(2_147_483_600.0, 5.0, 100.0, true, red(1));
        raster.circle(1e12, 1e12, 10.0, false, red(3));
        raster.rectangle(0.0, 2e9, 5.0, 2e9, true, red(1));
        raster.rectangle(-3e9, -3e9, 4e9, 4e9, false, red(u32::MAX));
        raster.ellipse(-1e15, 50.0, 30.0, 20.0, true, red(1));
        raster.ellipse(1e15, 1e15, 1e9, 1e9, false, red(1));
        raster.triangle([(-3e9, -10.0), (3e9, -10.0), (0.0, -3e9)], false, red(4));
        raster.clear_area(1e10, 1e10, 1e10, 1e10, BLUE);
        let mut legacy = Rasterizer::new(&mut buffer, StrokeStyle::Legacy);
        legacy.line(0.0, 2_147_483_647.0, 5.0, 2_147_483_647.0, red(3));
        legacy.circle(-1e300, 0.0, 10.0, false, red(1));
        assert_eq!(buffer.count_color(TRANSPARENT), 200 * 200);
    }

    #[test]
    fn clamping_keeps_partially_visible_shapes() {
        let mut buffer = canvas();
        // a huge filled rectangle starting on-surface still covers the rest of it
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).rectangle(
            150.0, 150.0, 1e12, 1e12, true, red(1),
        );
        assert_eq!(buffer.count_color(RED), 50 * 50);
    }

    #[test]
    fn both_styles_agree_on_horizontal_lines() {
        let mut legacy = canvas();
        let mut precise = canvas();
        Rasterizer::new(&mut legacy, StrokeStyle::Legacy).line(5.0, 50.0, 80.0, 50.0, red(5));
        Rasterizer::new(&mut precise, StrokeStyle::Precise).line(5.0, 50.0, 80.0, 50.0, red(5));
        assert_eq!(legacy.coordinates_of(RED), precise.coordinates_of(RED));
        assert_eq!(legacy.count_color(RED), 76 * 5);
    }

    #[test]
    fn zero_length_line_draws_single_point() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).line(7.9, 7.2, 7.0, 7.0, red(1));
        assert_eq!(buffer.coordinates_of(RED), vec![(7, 7)]);
    }

    #[test]
    fn outlined_rectangle_grows_outward_with_thickness() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).rectangle(
            20.0, 20.0, 10.0, 10.0, false, red(2),
        );
        assert_eq!(buffer.pixel(20, 20), Some(RED));
        assert_eq!(buffer.pixel(19, 19), Some(RED));
        assert_eq!(buffer.pixel(30, 30), Some(RED));
        assert_eq!(buffer.pixel(21, 21), Some(TRANSPARENT));
        assert_eq!(buffer.pixel(18, 18), Some(TRANSPARENT));
    }

    #[test]
    fn filled_rectangle_ignores_thickness() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Legacy).rectangle(
            0.0, 0.0, 4.0, 3.0, true, red(9),
        );
        assert_eq!(buffer.count_color(RED), 12);
    }

    #[test]
    fn legacy_outline_leaves_gaps_on_large_rings() {
        let mut buffer = PixelBuffer::new(1000, 1000);
        Rasterizer::new(&mut buffer, StrokeStyle::Legacy).circle(500.0, 500.0, 400.0, false, red(1));
        // 629 samples cannot cover a ring of ~2500 pixels
        assert!(buffer.count_color(RED) <= 629);
    }

    #[test]
    fn midpoint_outline_is_connected() {
        let mut buffer = PixelBuffer::new(1000, 1000);
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).circle(500.0, 500.0, 400.0, false, red(1));

        let drawn = buffer.coordinates_of(RED);
        assert!(drawn.len() > 2000);
        for (x, y) in &drawn {
            let dist = (((x - 500).pow(2) + (y - 500).pow(2)) as f64).sqrt();
            assert!((dist - 400.0).abs() < 1.0);
            let has_neighbour = (-1..=1)
                .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
                .filter(|d| *d != (0, 0))
                .any(|(dx, dy)| buffer.pixel(x + dx, y + dy) == Some(RED));
            assert!(has_neighbour, "isolated pixel at ({x}, {y})");
        }
    }

    #[test]
    fn thick_circle_outline_draws_concentric_rings() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).circle(100.0, 100.0, 10.0, false, red(3));
        for r in 10..=12 {
            assert_eq!(buffer.pixel(100 + r, 100), Some(RED), "ring {r}");
        }
        assert_eq!(buffer.pixel(113, 100), Some(TRANSPARENT));
        assert_eq!(buffer.pixel(109, 100), Some(TRANSPARENT));
    }

    #[test]
    fn filled_ellipse_respects_both_radii() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).ellipse(
            100.0, 100.0, 30.0, 10.0, true, Pen::new(BLUE, 1),
        );
        assert_eq!(buffer.pixel(70, 100), Some(BLUE));
        assert_eq!(buffer.pixel(130, 100), Some(BLUE));
        assert_eq!(buffer.pixel(100, 90), Some(BLUE));
        assert_eq!(buffer.pixel(100, 110), Some(BLUE));
        assert_eq!(buffer.pixel(100, 111), Some(TRANSPARENT));
        assert_eq!(buffer.pixel(131, 100), Some(TRANSPARENT));
    }

    #[test]
    fn midpoint_ellipse_outline_hits_axis_extremes() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Precise).ellipse(
            100.0, 100.0, 40.0, 20.0, false, red(1),
        );
        for (x, y) in [(140, 100), (60, 100), (100, 120), (100, 80)] {
            assert_eq!(buffer.pixel(x, y), Some(RED), "({x}, {y})");
        }
        assert_eq!(buffer.pixel(100, 100), Some(TRANSPARENT));
    }

    #[test]
    fn sampled_ellipse_outline_truncates_toward_center() {
        let mut buffer = canvas();
        Rasterizer::new(&mut buffer, StrokeStyle::Legacy).ellipse(
            100.0, 100.0, 40.0, 20.0, false, red(1),
        );
        // angle 0 is sampled exactly; the other extremes fall one pixel short
        assert_eq!(buffer.pixel(140, 100), Some(RED));
        assert_eq!(buffer.pixel(100, 119), Some(RED));
        assert_eq!(buffer.pixel(100, 120), Some(TRANSPARENT));
    }

    #[test]
    fn clear_area_paints_background() {
        let mut buffer = canvas();
        let mut raster = Rasterizer::new(&mut buffer, StrokeStyle::Precise);
        raster.rectangle(0.0, 0.0, 10.0, 10.0, true, red(1));
        raster.clear_area(0.0, 0.0, 5.0, 10.0, BLUE);
        assert_eq!(buffer.count_color(RED), 50);
        assert_eq!(buffer.count_color(BLUE), 50);
    }
}
