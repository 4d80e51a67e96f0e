//! Text rendering
//!
//! Glyph bitmaps come from a `Font`; placement and multi-line layout happen
//! here on top of `RasterBuffer::draw_image`.

mod outline_font;
pub mod rasterizer;

use serde::{Deserialize, Serialize};

pub use outline_font::OutlineFont;

use crate::error::FontError;
use crate::raster::{Color, RasterBuffer, ResizeMode};

/// A rasterized glyph: pre-colored RGBA bitmap plus horizontal advance
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Pen movement after this glyph, in pixels
    pub advance: f32,
    pub image: RasterBuffer,
}

impl Glyph {
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Typeface collaborator.
///
/// `rasterize_glyph` returns a bitmap whose pixels are
/// `color.scale(Color::TRANSPARENT, coverage / 255)`.
pub trait Font {
    /// Size in points
    fn size(&self) -> f32;

    fn set_size(&mut self, size: f32);

    fn rasterize_glyph(&self, ch: char, color: Color) -> Result<Glyph, FontError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// `x` is where the first glyph starts
    #[default]
    Left,
    /// `x` is where the last glyph's advance ends
    Right,
}

impl RasterBuffer {
    /// Draw `text` starting at `x` with its first baseline at `y`.
    pub fn draw_string_left(
        &mut self,
        x: i32,
        y: i32,
        font: &dyn Font,
        text: &str,
        color: Color,
    ) -> Result<(), FontError> {
        self.draw_string(x, y, font, text, color, TextAlign::Left)
    }

    /// Draw `text` ending at `x` with its first baseline at `y`.
    pub fn draw_string_right(
        &mut self,
        x: i32,
        y: i32,
        font: &dyn Font,
        text: &str,
        color: Color,
    ) -> Result<(), FontError> {
        self.draw_string(x, y, font, text, color, TextAlign::Right)
    }

    /// Draw possibly multi-line text.
    ///
    /// Lines split on `\n`. Each following baseline sits below the previous
    /// one by the tallest glyph of that line plus half the font size. Glyphs
    /// that would land outside the buffer are skipped; glyph failures abort.
    pub fn draw_string(
        &mut self,
        x: i32,
        y: i32,
        font: &dyn Font,
        text: &str,
        color: Color,
        align: TextAlign,
    ) -> Result<(), FontError> {
        let mut offset = 0.0f32;
        for line in text.split('\n') {
            let baseline = y + offset.floor() as i32;
            let tallest = match align {
                TextAlign::Left => self.draw_text_line_left(x, baseline, font, line, color)?,
                TextAlign::Right => self.draw_text_line_right(x, baseline, font, line, color)?,
            };
            offset += tallest as f32 + font.size() / 2.0;
        }
        Ok(())
    }

    fn draw_text_line_left(
        &mut self,
        x: i32,
        baseline: i32,
        font: &dyn Font,
        line: &str,
        color: Color,
    ) -> Result<u32, FontError> {
        let mut cursor = x as f32;
        let mut tallest = 0;
        for ch in line.chars() {
            let glyph = font.rasterize_glyph(ch, color)?;
            self.place_glyph(cursor.floor() as i32, baseline, ch, &glyph);
            cursor += glyph.advance;
            tallest = tallest.max(glyph.height());
        }
        Ok(tallest)
    }

    fn draw_text_line_right(
        &mut self,
        x: i32,
        baseline: i32,
        font: &dyn Font,
        line: &str,
        color: Color,
    ) -> Result<u32, FontError> {
        let mut cursor = x as f32;
        let mut tallest = 0;
        for ch in line.chars().rev() {
            let glyph = font.rasterize_glyph(ch, color)?;
            cursor -= glyph.advance;
            self.place_glyph(cursor.floor() as i32, baseline, ch, &glyph);
            tallest = tallest.max(glyph.height());
        }
        Ok(tallest)
    }

    /// Composite a glyph with its bottom edge on `baseline`
    fn place_glyph(&mut self, x: i32, baseline: i32, ch: char, glyph: &Glyph) {
        let (w, h) = (glyph.width() as i32, glyph.height() as i32);
        let placed = self.draw_image(
            x,
            baseline - h,
            x + w,
            baseline,
            &glyph.image,
            ResizeMode::TransparentFill,
        );
        if let Err(err) = placed {
            log::trace!("glyph {:?} skipped: {}", ch, err);
        }
    }
}
