use serde::{Deserialize, Serialize};

/// RGBA color with unbounded integer channels.
///
/// Channels are nominally 0-255 but interpolation may push them out of range;
/// they are only reduced to 8 bits (by wrapping) when packed into a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0, 255);
    pub const BLUE: Color = Color::new(0, 0, 255, 255);

    pub const fn new(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build from fractional channels, truncating toward zero
    #[inline]
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(r as i32, g as i32, b as i32, a as i32)
    }

    /// Unpack a pixel stored as R,G,B,A in memory order (little-endian u32)
    #[inline]
    pub const fn from_packed(value: u32) -> Self {
        let [r, g, b, a] = value.to_le_bytes();
        Self::new(r as i32, g as i32, b as i32, a as i32)
    }

    /// Pack into a little-endian u32, wrapping each channel to its low 8 bits
    #[inline]
    pub const fn to_packed(self) -> u32 {
        u32::from_le_bytes(self.to_bytes())
    }

    /// Channel bytes in memory order, wrapped to 8 bits
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r as u8, self.g as u8, self.b as u8, self.a as u8]
    }

    /// Interpolate from `other` (t = 0) to `self` (t = 1).
    ///
    /// Used for straight-alpha compositing (`other` is the background) and for
    /// gradients. Written as `other + (self - other) * t` so equal endpoints come
    /// back unchanged for any `t`.
    #[inline]
    pub fn scale(self, other: Color, t: f64) -> Color {
        let lerp = |this: i32, other: i32| other as f64 + (this as f64 - other as f64) * t;
        Color::from_f64(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 255
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r as i32, g as i32, b as i32, a as i32)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r as i32, g as i32, b as i32, a as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_is_little_endian_rgba() {
        let c = Color::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_packed(), 0x4433_2211);
        assert_eq!(c.to_bytes(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(Color::from_packed(0x4433_2211), c);
    }

    #[test]
    fn test_pack_wraps_out_of_range_channels() {
        let c = Color::new(256, -1, 300, 511);
        assert_eq!(c.to_bytes(), [0, 255, 44, 255]);
    }

    #[test]
    fn test_scale_endpoints() {
        let fg = Color::new(200, 100, 50, 255);
        let bg = Color::new(10, 20, 30, 40);
        assert_eq!(fg.scale(bg, 1.0), fg);
        assert_eq!(fg.scale(bg, 0.0), bg);
    }

    #[test]
    fn test_scale_truncates_midpoint() {
        let c = Color::new(255, 0, 1, 255).scale(Color::new(0, 0, 0, 0), 0.5);
        assert_eq!(c, Color::new(127, 0, 0, 127));
    }

    #[test]
    fn test_scale_same_color_is_exact() {
        let c = Color::new(101, 57, 3, 77);
        for i in 0..=20 {
            assert_eq!(c.scale(c, i as f64 / 20.0), c);
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, r#"{"r":255,"g":0,"b":0,"a":255}"#);
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::RED);
    }
}
