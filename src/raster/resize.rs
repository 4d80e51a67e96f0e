//! Resampling
//!
//! Three modes: crop-or-pad, nearest neighbour and a 3x3 inverse-distance filter.

use serde::{Deserialize, Serialize};

use super::{Color, RasterBuffer};

/// How `resize` (and `draw_image`) maps a source onto new dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Copy the overlapping top-left rectangle, pad with transparent black
    #[default]
    TransparentFill,
    /// Nearest neighbour across the full target grid
    ScaleDirect,
    /// Inverse-distance weighted average of the 3x3 source neighbourhood
    ScaleBilinear,
}

impl RasterBuffer {
    /// Produce a new `width` x `height` buffer from this one.
    ///
    /// Scaling modes stretch to fill the whole target; the source aspect ratio
    /// is not preserved.
    pub fn resize(&self, width: u32, height: u32, mode: ResizeMode) -> RasterBuffer {
        log::debug!(
            "resize {}x{} -> {}x{} ({:?})",
            self.width(),
            self.height(),
            width,
            height,
            mode
        );

        let mut out = RasterBuffer::new(width, height);
        if out.is_empty() || self.is_empty() {
            return out;
        }

        match mode {
            ResizeMode::TransparentFill => self.copy_overlap(&mut out),
            ResizeMode::ScaleDirect => self.scale_direct(&mut out),
            ResizeMode::ScaleBilinear => self.scale_weighted(&mut out),
        }
        out
    }

    fn copy_overlap(&self, out: &mut RasterBuffer) {
        let rows = self.height().min(out.height()) as usize;
        let row_bytes = self.width().min(out.width()) as usize * 4;
        let src_stride = self.width() as usize * 4;
        let dst_stride = out.width() as usize * 4;

        let src = self.as_bytes();
        let dst = out.as_bytes_mut();
        for row in 0..rows {
            let s = row * src_stride;
            let d = row * dst_stride;
            dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
        }
    }

    fn scale_direct(&self, out: &mut RasterBuffer) {
        let (sw, sh) = (self.width() as u64, self.height() as u64);
        let (dw, dh) = (out.width() as u64, out.height() as u64);

        for y in 0..dh {
            let sy = (y * sh / dh) as i32;
            for x in 0..dw {
                let sx = (x * sw / dw) as i32;
                if let Some(color) = self.get(sx, sy) {
                    out.put(x as u32, y as u32, color);
                }
            }
        }
    }

    fn scale_weighted(&self, out: &mut RasterBuffer) {
        let x_ratio = self.width() as f64 / out.width() as f64;
        let y_ratio = self.height() as f64 / out.height() as f64;

        for y in 0..out.height() {
            let sy = y as f64 * y_ratio;
            for x in 0..out.width() {
                let sx = x as f64 * x_ratio;
                out.put(x, y, self.weighted_sample(sx, sy));
            }
        }
    }

    /// Average the 3x3 neighbourhood around (sx, sy), weighting each texel by
    /// the inverse of a quarter of its center's distance. A texel centered
    /// exactly on the sample gets weight 1.
    fn weighted_sample(&self, sx: f64, sy: f64) -> Color {
        let cx = sx.floor() as i32;
        let cy = sy.floor() as i32;
        let (mut r, mut g, mut b, mut a, mut total) = (0.0, 0.0, 0.0, 0.0, 0.0);

        for xi in cx - 1..=cx + 1 {
            for yi in cy - 1..=cy + 1 {
                let Some(p) = self.get(xi, yi) else {
                    continue;
                };
                let ddx = sx - (xi as f64 + 0.5);
                let ddy = sy - (yi as f64 + 0.5);
                let d = (ddx * ddx + ddy * ddy).sqrt() / 4.0;
                let weight = if d == 0.0 { 1.0 } else { 1.0 / d };
                r += p.r as f64 * weight;
                g += p.g as f64 * weight;
                b += p.b as f64 * weight;
                a += p.a as f64 * weight;
                total += weight;
            }
        }

        if total == 0.0 {
            return Color::TRANSPARENT;
        }
        // Round the mean so flat regions survive the division exactly
        Color::from_f64(
            (r / total).round(),
            (g / total).round(),
            (b / total).round(),
            (a / total).round(),
        )
    }
}
