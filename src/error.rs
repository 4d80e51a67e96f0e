//! Error types
//!
//! Out-of-range reads come back as `Option`. Everything a caller can act on
//! (rejected geometry, codec and font failures) is a typed error.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected drawing input. The buffer is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("rectangle ({x1}, {y1})-({x2}, {y2}) exceeds {width}x{height} buffer")]
    OutOfBounds {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: u32,
        height: u32,
    },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
}

/// Failure inside the image codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("pixel data holds {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("unrecognized image extension: {0:?}")]
    UnknownExtension(String),
}

/// Failure loading a typeface or rasterizing one of its glyphs.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font: {0}")]
    Parse(#[from] skrifa::raw::ReadError),
    /// `DrawError` is `Debug`-only
    #[error("failed to draw outline for {ch:?}: {error:?}")]
    Outline {
        ch: char,
        error: skrifa::outline::DrawError,
    },
    #[error("no installed font matches family {0:?}")]
    NotFound(String),
}

/// Failure loading, saving or rendering a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("scene draws text but no font was supplied")]
    MissingFont,
}
