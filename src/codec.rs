//! PNG / JPEG encoding
//!
//! The raster core only sees the `Codec` trait; `ImageCodec` backs it with the
//! `image` crate.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::raster::RasterBuffer;

/// Quality used when a JPEG is encoded without an explicit setting
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless, keeps alpha
    Png,
    /// Lossy, alpha is discarded
    Jpeg,
}

impl ImageFormat {
    /// Guess the format from a file extension (`png`, `jpg`, `jpeg`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| CodecError::UnknownExtension(ext.to_string()))
    }

    fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Decoded RGBA pixels
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Converts between encoded image bytes and raw RGBA pixels
pub trait Codec {
    fn decode(&self, bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, CodecError>;

    /// `quality` only applies to lossy formats (1-100)
    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Vec<u8>, CodecError>;
}

/// `Codec` backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, CodecError> {
        let rgba = image::load_from_memory_with_format(bytes, format.to_image_format())?.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {:?} {}x{} ({} bytes)", format, width, height, bytes.len());
        Ok(DecodedImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Vec<u8>, CodecError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(CodecError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        let mut out = Vec::new();
        match format {
            ImageFormat::Png => {
                PngEncoder::new(&mut out).write_image(
                    rgba,
                    width,
                    height,
                    ExtendedColorType::Rgba8,
                )?;
            },
            ImageFormat::Jpeg => {
                let rgb: Vec<u8> = rgba
                    .chunks_exact(4)
                    .flat_map(|p| [p[0], p[1], p[2]])
                    .collect();
                JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100)).write_image(
                    &rgb,
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )?;
            },
        }
        log::debug!("encoded {:?} {}x{} -> {} bytes", format, width, height, out.len());
        Ok(out)
    }
}

impl RasterBuffer {
    /// Decode PNG/JPEG bytes with the default codec
    pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<Self, CodecError> {
        Self::decode_with(&ImageCodec, bytes, format)
    }

    pub fn decode_with(
        codec: &impl Codec,
        bytes: &[u8],
        format: ImageFormat,
    ) -> Result<Self, CodecError> {
        let DecodedImage {
            width,
            height,
            rgba,
        } = codec.decode(bytes, format)?;
        let actual = rgba.len();
        RasterBuffer::from_rgba(width, height, rgba).ok_or(CodecError::SizeMismatch {
            width,
            height,
            expected: width as usize * height as usize * 4,
            actual,
        })
    }

    /// Encode with the default codec; JPEG uses `DEFAULT_JPEG_QUALITY`
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
        self.encode_with(&ImageCodec, format, DEFAULT_JPEG_QUALITY)
    }

    pub fn encode_with(
        &self,
        codec: &impl Codec,
        format: ImageFormat,
        quality: u8,
    ) -> Result<Vec<u8>, CodecError> {
        codec.encode(self.as_bytes(), self.width(), self.height(), format, quality)
    }
}
