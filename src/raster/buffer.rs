use std::f64::consts::PI;

use super::{Color, ResizeMode};
use crate::error::RasterError;

// ============================================================================
// Utility Functions
// ============================================================================

/// Write a packed R,G,B,A pixel into a 4-byte slot
#[inline]
fn write_pixel(dest: &mut [u8], color: Color) {
    dest.copy_from_slice(&color.to_bytes());
}

/// Read a 4-byte slot back into a Color
#[inline]
fn read_pixel(src: &[u8]) -> Color {
    Color::from([src[0], src[1], src[2], src[3]])
}

// ============================================================================
// RasterBuffer
// ============================================================================

/// RGBA8888 raster, row-major, channels stored R,G,B,A in memory order.
///
/// Every drawing call mutates the buffer in place. Views produced by
/// `subimage` and `resize` are independent copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterBuffer {
    /// Create a zero-filled (transparent black) buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap raw RGBA bytes. Returns None if the length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() == width as usize * height as usize * 4 {
            Some(Self {
                pixels: data,
                width,
                height,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    #[inline]
    fn row_stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Validate a half-open rectangle [x1, x2) x [y1, y2) against the buffer
    pub(crate) fn check_rect(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), RasterError> {
        if x1 >= x2 || y1 >= y2 {
            return Err(RasterError::InvalidGeometry("rectangle is empty or inverted"));
        }
        if x1 < 0 || y1 < 0 || x2 as i64 > self.width as i64 || y2 as i64 > self.height as i64 {
            return Err(RasterError::OutOfBounds {
                x1,
                y1,
                x2,
                y2,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Pixel Access
    // ========================================================================

    /// Read a pixel. Returns None if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(read_pixel(&self.pixels[idx..idx + 4]))
        } else {
            None
        }
    }

    /// Write a pixel with straight-alpha "over" compositing.
    ///
    /// Out-of-bounds writes are ignored. Colors with `a < 255` are blended
    /// against the current pixel using `a / 255` as the weight; channels are
    /// wrapped to 8 bits on store.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        let slot = &mut self.pixels[idx..idx + 4];
        let color = if color.is_opaque() {
            color
        } else {
            color.scale(read_pixel(slot), color.a as f64 / 255.0)
        };
        write_pixel(slot, color);
    }

    /// Overwrite a pixel without blending (bounds checked)
    #[inline]
    pub(crate) fn put(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = self.pixel_index(x, y);
            write_pixel(&mut self.pixels[idx..idx + 4], color);
        }
    }

    /// Fill the whole buffer through `set`, so translucent colors blend
    pub fn fill(&mut self, color: Color) {
        let (w, h) = (self.width as i32, self.height as i32);
        // Never inverted for a buffer's own extent
        let _ = self.draw_rect(0, 0, w, h, color, true, 0);
    }

    // ========================================================================
    // Sub-image / Compositing
    // ========================================================================

    /// Copy out [x1, x2) x [y1, y2). None if the rectangle is inverted or leaves the buffer.
    pub fn subimage(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<RasterBuffer> {
        self.check_rect(x1, y1, x2, y2).ok()?;

        let mut out = RasterBuffer::new((x2 - x1) as u32, (y2 - y1) as u32);
        let row_bytes = out.row_stride();
        for (row, y) in (y1..y2).enumerate() {
            let src = self.pixel_index(x1 as u32, y as u32);
            let dst = row * row_bytes;
            out.pixels[dst..dst + row_bytes].copy_from_slice(&self.pixels[src..src + row_bytes]);
        }
        Some(out)
    }

    /// Composite `src` onto [x1, x2) x [y1, y2), resizing it with `mode` first if
    /// its dimensions differ. Every pixel goes through `set`, so alpha blends.
    pub fn draw_image(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        src: &RasterBuffer,
        mode: ResizeMode,
    ) -> Result<(), RasterError> {
        self.check_rect(x1, y1, x2, y2)?;

        let (w, h) = ((x2 - x1) as u32, (y2 - y1) as u32);
        let resized;
        let src = if src.width != w || src.height != h {
            resized = src.resize(w, h, mode);
            &resized
        } else {
            src
        };

        for y in y1..y2 {
            for x in x1..x2 {
                if let Some(color) = src.get(x - x1, y - y1) {
                    self.set(x, y, color);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a single-color line. See `draw_line`.
    pub fn draw_line_solid(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: u32,
        color: Color,
    ) {
        self.draw_line(x1, y1, x2, y2, width, color, color);
    }

    /// Draw a line with optional width and a color gradient.
    ///
    /// Endpoints are clamped into the buffer, then x and y are each sorted
    /// ascending on their own. A line that is not monotonic in both axes is
    /// therefore mirrored: (0, 10)-(10, 0) draws as (0, 0)-(10, 10).
    ///
    /// The cursor advances in unit steps from the low corner and paints
    /// `color1.scale(color2, progress)`, so the low corner gets `color2` and the
    /// high corner `color1`. When the whole line was reversed by sorting the
    /// colors are swapped with it.
    ///
    /// With `width > 0`, each step also paints `2 * width` pixels along both
    /// perpendicular directions (counting the center), moving half a pixel at a
    /// time until the pixel coordinate changes.
    pub fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: u32,
        color1: Color,
        color2: Color,
    ) {
        if self.is_empty() {
            return;
        }
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let clamp = |v: f64, max: f64| {
            if v < 0.0 {
                0.0
            } else if v > max {
                max
            } else {
                v
            }
        };
        let (x1, y1) = (clamp(x1, max_x), clamp(y1, max_y));
        let (x2, y2) = (clamp(x2, max_x), clamp(y2, max_y));

        let swap_x = x2 < x1;
        let swap_y = y2 < y1;
        let (x1, x2) = if swap_x { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if swap_y { (y2, y1) } else { (y1, y2) };

        // Reversed as a whole (not mirrored): keep the gradient attached to its endpoints
        let reversed = (swap_x || x1 == x2) && (swap_y || y1 == y2) && (swap_x || swap_y);
        let (color1, color2) = if reversed {
            (color2, color1)
        } else {
            (color1, color2)
        };

        let len = ((x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1)).sqrt();
        let (dx, dy) = if len > 0.0 {
            ((x2 - x1) / len, (y2 - y1) / len)
        } else {
            (1.0, 0.0)
        };
        // Half-unit perpendicular
        let sdx = -dy / 2.0;
        let sdy = dx / 2.0;
        let steps = width as usize * 2;

        let mut x = x1;
        let mut y = y1;
        while x <= x2 && y <= y2 {
            let progress = if len > 0.0 {
                ((x - x1) * (x - x1) + (y - y1) * (y - y1)).sqrt() / len
            } else {
                0.0
            };
            let color = color1.scale(color2, progress);
            self.set(x.floor() as i32, y.floor() as i32, color);

            if steps > 0 {
                self.paint_perpendicular(x, y, sdx, sdy, steps, color);
                self.paint_perpendicular(x, y, -sdx, -sdy, steps, color);
            }

            x += dx;
            y += dy;
        }
    }

    /// Paint `count` distinct pixels from (x, y) outward along (sdx, sdy)
    fn paint_perpendicular(
        &mut self,
        x: f64,
        y: f64,
        sdx: f64,
        sdy: f64,
        count: usize,
        color: Color,
    ) {
        let mut sx = x;
        let mut sy = y;
        for _ in 0..count {
            let px = sx.floor();
            let py = sy.floor();
            self.set(px as i32, py as i32, color);
            // Near 45 degrees a half step may land in the same pixel
            while sx.floor() == px && sy.floor() == py {
                sx += sdx;
                sy += sdy;
            }
        }
    }

    // ========================================================================
    // Rectangles & Circles
    // ========================================================================

    /// Draw a rectangle. Filled mode covers [x1, x2) x [y1, y2); outline mode
    /// draws the four edges through (x2, y2) with `draw_line`.
    pub fn draw_rect(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        fill: bool,
        line_width: u32,
    ) -> Result<(), RasterError> {
        if x2 < x1 || y2 < y1 {
            return Err(RasterError::InvalidGeometry("rectangle is inverted"));
        }

        if fill {
            // Clip to the buffer; set() would ignore the rest anyway
            let sx = x1.max(0);
            let sy = y1.max(0);
            let ex = x2.min(self.width as i32);
            let ey = y2.min(self.height as i32);
            for y in sy..ey {
                for x in sx..ex {
                    self.set(x, y, color);
                }
            }
        } else {
            let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
            self.draw_line_solid(x1, y1, x1, y2, line_width, color);
            self.draw_line_solid(x1, y2, x2, y2, line_width, color);
            self.draw_line_solid(x2, y2, x2, y1, line_width, color);
            self.draw_line_solid(x2, y1, x1, y1, line_width, color);
        }
        Ok(())
    }

    /// Draw a circle. Filled mode paints every pixel within `radius` of the
    /// center; outline mode joins `floor(2 * pi * r) + 1` circumference points
    /// with `draw_line`.
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
        fill: bool,
        line_width: u32,
    ) -> Result<(), RasterError> {
        if radius <= 0 {
            return Err(RasterError::InvalidGeometry("circle radius must be positive"));
        }

        if fill {
            // Bounding square in i64 so huge radii clip instead of overflowing
            let (cx, cy, radius) = (cx as i64, cy as i64, radius as i64);
            let r = radius as f64;
            let sx = (cx - radius).max(0);
            let sy = (cy - radius).max(0);
            let ex = (cx + radius).min(self.width as i64 - 1);
            let ey = (cy + radius).min(self.height as i64 - 1);
            for y in sy..=ey {
                for x in sx..=ex {
                    let dx = (x - cx) as f64;
                    let dy = (y - cy) as f64;
                    if (dx * dx + dy * dy).sqrt() <= r {
                        self.set(x as i32, y as i32, color);
                    }
                }
            }
        } else {
            let (x, y, r) = (cx as f64, cy as f64, radius as f64);
            let circumference = 2.0 * PI * r;
            let mut lx = x + r;
            let mut ly = y;
            for i in 1..=(circumference.floor() as u64 + 1) {
                let angle = i as f64 / circumference * 2.0 * PI;
                let px = x + angle.cos() * r;
                let py = y + angle.sin() * r;
                self.draw_line_solid(lx, ly, px, py, line_width, color);
                lx = px;
                ly = py;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(buf: &RasterBuffer, color: Color) -> usize {
        buf.as_bytes()
            .chunks_exact(4)
            .filter(|p| *p == color.to_bytes())
            .count()
    }

    fn painted(buf: &RasterBuffer) -> Vec<(i32, i32, Color)> {
        let mut out = Vec::new();
        for y in 0..buf.height() as i32 {
            for x in 0..buf.width() as i32 {
                let c = buf.get(x, y).unwrap();
                if c != Color::TRANSPARENT {
                    out.push((x, y, c));
                }
            }
        }
        out
    }

    #[test]
    fn test_new_is_transparent() {
        let buf = RasterBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 24);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RasterBuffer::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(RasterBuffer::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let buf = RasterBuffer::new(4, 4);
        assert_eq!(buf.get(-1, 0), None);
        assert_eq!(buf.get(0, -1), None);
        assert_eq!(buf.get(4, 0), None);
        assert_eq!(buf.get(0, 4), None);
        assert_eq!(buf.get(3, 3), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_set_stores_rgba_memory_order() {
        let mut buf = RasterBuffer::new(2, 1);
        buf.set(1, 0, Color::new(1, 2, 3, 255));
        assert_eq!(&buf.as_bytes()[4..8], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_set_out_of_bounds_is_noop() {
        let mut buf = RasterBuffer::new(2, 2);
        let before = buf.clone();
        buf.set(-1, 0, Color::RED);
        buf.set(2, 0, Color::new(9, 9, 9, 10));
        assert_eq!(buf, before);
    }

    #[test]
    fn test_set_opaque_overwrites() {
        let mut buf = RasterBuffer::new(1, 1);
        buf.set(0, 0, Color::new(10, 20, 30, 40));
        buf.set(0, 0, Color::new(200, 100, 50, 255));
        assert_eq!(buf.get(0, 0), Some(Color::new(200, 100, 50, 255)));
    }

    #[test]
    fn test_set_transparent_keeps_background() {
        let mut buf = RasterBuffer::new(1, 1);
        buf.set(0, 0, Color::new(12, 34, 56, 255));
        buf.set(0, 0, Color::new(255, 255, 255, 0));
        assert_eq!(buf.get(0, 0), Some(Color::new(12, 34, 56, 255)));
    }

    #[test]
    fn test_set_blends_half_alpha() {
        let mut buf = RasterBuffer::new(1, 1);
        buf.set(0, 0, Color::WHITE);
        buf.set(0, 0, Color::new(0, 0, 0, 51)); // t = 0.2
        // 255 + (0 - 255) * 0.2 = 204, alpha 255 + (51 - 255) * 0.2 = 214.2
        assert_eq!(buf.get(0, 0), Some(Color::new(204, 204, 204, 214)));
    }

    #[test]
    fn test_set_wraps_channels() {
        let mut buf = RasterBuffer::new(1, 1);
        buf.set(0, 0, Color::new(256 + 7, 0, 0, 255));
        assert_eq!(buf.get(0, 0), Some(Color::new(7, 0, 0, 255)));
    }

    #[test]
    fn test_fill() {
        let mut buf = RasterBuffer::new(5, 3);
        buf.fill(Color::WHITE);
        assert_eq!(count(&buf, Color::WHITE), 15);
    }

    #[test]
    fn test_filled_rect_scenario() {
        let mut buf = RasterBuffer::new(100, 100);
        buf.fill(Color::WHITE);
        buf.draw_rect(10, 10, 20, 20, Color::RED, true, 0).unwrap();

        assert_eq!(count(&buf, Color::RED), 100);
        assert_eq!(count(&buf, Color::WHITE), 100 * 100 - 100);
        for y in 0..100 {
            for x in 0..100 {
                let inside = (10..20).contains(&x) && (10..20).contains(&y);
                let expected = if inside { Color::RED } else { Color::WHITE };
                assert_eq!(buf.get(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_rect_inverted_rejected() {
        let mut buf = RasterBuffer::new(10, 10);
        let err = buf.draw_rect(5, 5, 2, 8, Color::RED, true, 0);
        assert!(matches!(err, Err(RasterError::InvalidGeometry(_))));
        assert_eq!(count(&buf, Color::RED), 0);
    }

    #[test]
    fn test_rect_outline_is_closed_and_hollow() {
        let mut buf = RasterBuffer::new(20, 20);
        buf.draw_rect(2, 3, 12, 9, Color::RED, false, 0).unwrap();
        for x in 2..=12 {
            assert_eq!(buf.get(x, 3), Some(Color::RED));
            assert_eq!(buf.get(x, 9), Some(Color::RED));
        }
        for y in 3..=9 {
            assert_eq!(buf.get(2, y), Some(Color::RED));
            assert_eq!(buf.get(12, y), Some(Color::RED));
        }
        assert_eq!(buf.get(7, 6), Some(Color::TRANSPARENT));
        assert_eq!(count(&buf, Color::RED), 2 * 11 + 2 * 5);
    }

    #[test]
    fn test_subimage_bounds() {
        let buf = RasterBuffer::new(10, 10);
        assert!(buf.subimage(0, 0, 10, 10).is_some());
        assert!(buf.subimage(-1, 0, 5, 5).is_none());
        assert!(buf.subimage(0, 0, 11, 5).is_none());
        assert!(buf.subimage(5, 5, 5, 8).is_none());
        assert!(buf.subimage(6, 5, 4, 8).is_none());
    }

    #[test]
    fn test_subimage_copies_region() {
        let mut buf = RasterBuffer::new(4, 4);
        buf.set(1, 2, Color::RED);
        buf.set(2, 2, Color::BLUE);
        let sub = buf.subimage(1, 1, 3, 3).unwrap();
        assert_eq!((sub.width(), sub.height()), (2, 2));
        assert_eq!(sub.get(0, 1), Some(Color::RED));
        assert_eq!(sub.get(1, 1), Some(Color::BLUE));
        assert_eq!(sub.get(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_subimage_is_independent_copy() {
        let mut buf = RasterBuffer::new(4, 4);
        let sub = buf.subimage(0, 0, 2, 2).unwrap();
        buf.set(0, 0, Color::RED);
        assert_eq!(sub.get(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_subimage_draw_image_round_trip() {
        let mut buf = RasterBuffer::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                buf.put(x, y, Color::new(x as i32 * 13, y as i32 * 7, 99, (x * y) as i32 % 256));
            }
        }
        let original = buf.clone();
        let sub = buf.subimage(3, 4, 11, 13).unwrap();
        buf.draw_image(3, 4, 11, 13, &sub, ResizeMode::TransparentFill)
            .unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn test_draw_image_rejects_bad_rect() {
        let mut buf = RasterBuffer::new(8, 8);
        let src = RasterBuffer::new(2, 2);
        assert!(matches!(
            buf.draw_image(7, 7, 9, 9, &src, ResizeMode::ScaleDirect),
            Err(RasterError::OutOfBounds { .. })
        ));
        assert!(matches!(
            buf.draw_image(4, 4, 2, 6, &src, ResizeMode::ScaleDirect),
            Err(RasterError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_draw_image_resizes_source() {
        let mut src = RasterBuffer::new(1, 1);
        src.set(0, 0, Color::GREEN);
        let mut buf = RasterBuffer::new(6, 6);
        buf.draw_image(1, 1, 4, 4, &src, ResizeMode::ScaleDirect)
            .unwrap();
        assert_eq!(count(&buf, Color::GREEN), 9);
        assert_eq!(buf.get(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(buf.get(3, 3), Some(Color::GREEN));
    }

    #[test]
    fn test_draw_image_blends_alpha() {
        let mut src = RasterBuffer::new(2, 1);
        src.set(0, 0, Color::new(255, 0, 0, 0));
        src.put(1, 0, Color::new(0, 0, 255, 255));
        let mut buf = RasterBuffer::new(2, 1);
        buf.fill(Color::WHITE);
        buf.draw_image(0, 0, 2, 1, &src, ResizeMode::TransparentFill)
            .unwrap();
        assert_eq!(buf.get(0, 0), Some(Color::WHITE));
        assert_eq!(buf.get(1, 0), Some(Color::BLUE));
    }

    #[test]
    fn test_horizontal_line_inclusive() {
        let mut buf = RasterBuffer::new(20, 5);
        buf.draw_line_solid(3.0, 2.0, 9.0, 2.0, 0, Color::RED);
        assert_eq!(count(&buf, Color::RED), 7);
        for x in 3..=9 {
            assert_eq!(buf.get(x, 2), Some(Color::RED));
        }
    }

    #[test]
    fn test_vertical_line_on_left_edge() {
        let mut buf = RasterBuffer::new(5, 10);
        buf.draw_line_solid(0.0, 1.0, 0.0, 8.0, 0, Color::RED);
        assert_eq!(count(&buf, Color::RED), 8);
    }

    #[test]
    fn test_line_clamps_instead_of_rejecting() {
        let mut buf = RasterBuffer::new(10, 10);
        buf.draw_line_solid(-50.0, 4.0, 500.0, 4.0, 0, Color::RED);
        assert_eq!(count(&buf, Color::RED), 10);
    }

    #[test]
    fn test_zero_length_line_paints_start_color() {
        let mut buf = RasterBuffer::new(4, 4);
        buf.draw_line(2.0, 2.0, 2.0, 2.0, 0, Color::RED, Color::BLUE);
        assert_eq!(painted(&buf), vec![(2, 2, Color::BLUE)]);
    }

    #[test]
    fn test_line_gradient_runs_from_color2_to_color1() {
        let mut buf = RasterBuffer::new(11, 1);
        let (red, blue) = (Color::new(200, 0, 0, 255), Color::new(0, 0, 100, 255));
        buf.draw_line(0.0, 0.0, 10.0, 0.0, 0, red, blue);
        assert_eq!(buf.get(0, 0), Some(Color::new(0, 0, 100, 255)));
        assert_eq!(buf.get(5, 0), Some(Color::new(100, 0, 50, 255)));
        assert_eq!(buf.get(10, 0), Some(Color::new(200, 0, 0, 255)));
    }

    #[test]
    fn test_line_direction_symmetry_for_monotonic_lines() {
        let c1 = Color::new(250, 10, 0, 255);
        let c2 = Color::new(0, 40, 220, 255);
        let lines = [
            (2.0, 3.0, 25.0, 17.0),
            (4.0, 4.0, 4.0, 20.0),
            (1.0, 9.0, 28.0, 9.0),
        ];
        for &(x1, y1, x2, y2) in &lines {
            for width in [0, 2] {
                let mut a = RasterBuffer::new(32, 32);
                let mut b = RasterBuffer::new(32, 32);
                a.draw_line(x1, y1, x2, y2, width, c1, c2);
                b.draw_line(x2, y2, x1, y1, width, c2, c1);
                assert_eq!(a, b, "line ({}, {})-({}, {}) width {}", x1, y1, x2, y2, width);
            }
        }
    }

    #[test]
    fn test_line_non_monotonic_is_mirrored() {
        let mut anti = RasterBuffer::new(12, 12);
        let mut diag = RasterBuffer::new(12, 12);
        anti.draw_line_solid(0.0, 10.0, 10.0, 0.0, 0, Color::RED);
        diag.draw_line_solid(0.0, 0.0, 10.0, 10.0, 0, Color::RED);
        assert_eq!(anti, diag);
        assert_eq!(anti.get(0, 0), Some(Color::RED));
        assert_eq!(anti.get(0, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_wide_horizontal_line() {
        let mut buf = RasterBuffer::new(20, 20);
        buf.draw_line_solid(5.0, 10.0, 8.0, 10.0, 1, Color::RED);
        // width 1 paints 2 pixels each way including the center: rows 9..=11
        for x in 5..=8 {
            for y in 9..=11 {
                assert_eq!(buf.get(x, y), Some(Color::RED), "pixel ({}, {})", x, y);
            }
        }
        assert_eq!(count(&buf, Color::RED), 4 * 3);
    }

    #[test]
    fn test_wide_diagonal_line_has_no_holes() {
        let mut buf = RasterBuffer::new(40, 40);
        buf.draw_line_solid(5.0, 5.0, 30.0, 30.0, 2, Color::RED);
        for i in 8..28 {
            assert_eq!(buf.get(i, i), Some(Color::RED));
            assert_eq!(buf.get(i + 1, i), Some(Color::RED));
            assert_eq!(buf.get(i, i + 1), Some(Color::RED));
        }
    }

    #[test]
    fn test_filled_circle() {
        let mut buf = RasterBuffer::new(21, 21);
        buf.draw_circle(10, 10, 5, Color::RED, true, 0).unwrap();
        assert_eq!(buf.get(10, 10), Some(Color::RED));
        assert_eq!(buf.get(15, 10), Some(Color::RED));
        assert_eq!(buf.get(10, 5), Some(Color::RED));
        assert_eq!(buf.get(14, 14), Some(Color::TRANSPARENT));
        assert_eq!(buf.get(16, 10), Some(Color::TRANSPARENT));

        let mut expected = 0;
        for y in -5i32..=5 {
            for x in -5i32..=5 {
                if x * x + y * y <= 25 {
                    expected += 1;
                }
            }
        }
        assert_eq!(count(&buf, Color::RED), expected);
    }

    #[test]
    fn test_filled_circle_clipped() {
        let mut buf = RasterBuffer::new(10, 10);
        buf.draw_circle(0, 0, 3, Color::RED, true, 0).unwrap();
        assert_eq!(buf.get(0, 0), Some(Color::RED));
        assert_eq!(buf.get(3, 0), Some(Color::RED));
        assert_eq!(buf.get(3, 3), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_circle_outline_stays_on_ring() {
        let mut buf = RasterBuffer::new(30, 30);
        buf.draw_circle(15, 15, 8, Color::RED, false, 0).unwrap();
        let ring = painted(&buf);
        assert!(ring.len() > 30);
        for (x, y, c) in ring {
            assert_eq!(c, Color::RED);
            let d = (((x - 15) * (x - 15) + (y - 15) * (y - 15)) as f64).sqrt();
            assert!(d > 6.0 && d < 9.5, "pixel ({}, {}) at distance {}", x, y, d);
        }
        assert_eq!(buf.get(15, 15), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_filled_circle_huge_radius_clips() {
        let mut buf = RasterBuffer::new(10, 10);
        buf.draw_circle(5, 5, i32::MAX, Color::RED, true, 0).unwrap();
        assert_eq!(count(&buf, Color::RED), 100);

        let mut far = RasterBuffer::new(10, 10);
        far.draw_circle(i32::MIN, i32::MAX, i32::MAX, Color::RED, true, 0)
            .unwrap();
        assert_eq!(count(&far, Color::RED), 0);
    }

    #[test]
    fn test_circle_rejects_non_positive_radius() {
        let mut buf = RasterBuffer::new(10, 10);
        assert!(buf.draw_circle(5, 5, 0, Color::RED, true, 0).is_err());
        assert!(buf.draw_circle(5, 5, -2, Color::RED, false, 1).is_err());
        assert_eq!(count(&buf, Color::RED), 0);
    }
}
