//! Software RGBA raster engine.
//!
//! [`RasterBuffer`] owns a row-major RGBA8888 pixel store and carries every
//! drawing operation: alpha-blended pixel writes, lines with width and
//! gradient, rectangles, circles, polygon fill, resampling and compositing.
//! Image codecs and fonts plug in through the [`Codec`] and [`Font`] traits.

pub mod codec;
pub mod error;
pub mod raster;
pub mod scene;
pub mod text;

pub use codec::{Codec, ImageCodec, ImageFormat, DEFAULT_JPEG_QUALITY};
pub use error::{CodecError, FontError, RasterError, SceneError};
pub use raster::{Color, Point, RasterBuffer, ResizeMode};
pub use scene::{DrawCommand, Scene};
pub use text::{Font, Glyph, OutlineFont, TextAlign};
