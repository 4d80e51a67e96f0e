mod buffer;
mod color;
pub mod polygon;
mod resize;

pub use buffer::RasterBuffer;
pub use color::Color;
pub use polygon::Point;
pub use resize::ResizeMode;
