use std::path::{Path, PathBuf};

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::string::StringId;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use super::rasterizer::EdgeCollector;
use super::{Font, Glyph};
use crate::error::FontError;
use crate::raster::{Color, RasterBuffer};

/// Glyphs are rendered as if for a 300 DPI device
const DPI: f32 = 300.0;

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// TrueType / OpenType font rendered from its outlines.
///
/// Holds the raw font data; for collections the first face is used.
#[derive(Debug, Clone)]
pub struct OutlineFont {
    data: Vec<u8>,
    size: f32,
}

impl OutlineFont {
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self, FontError> {
        // Fail at load time rather than on the first glyph
        FontRef::from_index(&data, 0)?;
        Ok(Self { data, size })
    }

    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded font {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data, size)
    }

    /// Find an installed font whose family name matches `family`
    /// (case-insensitive) in the platform font directories.
    pub fn from_system(family: &str, size: f32) -> Result<Self, FontError> {
        for path in font_files(&system_font_dirs()) {
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            let matches = FontRef::from_index(&data, 0)
                .ok()
                .and_then(|font| family_name(&font))
                .is_some_and(|name| name.eq_ignore_ascii_case(family));
            if matches {
                log::debug!("font family {:?} resolved to {}", family, path.display());
                return Self::from_bytes(data, size);
            }
        }
        Err(FontError::NotFound(family.to_string()))
    }

    /// Family name from the font's `name` table
    pub fn family(&self) -> Option<String> {
        FontRef::from_index(&self.data, 0)
            .ok()
            .and_then(|font| family_name(&font))
    }

    fn pixels_per_em(&self) -> f32 {
        self.size * DPI / 72.0
    }
}

impl Font for OutlineFont {
    fn size(&self) -> f32 {
        self.size
    }

    fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    fn rasterize_glyph(&self, ch: char, color: Color) -> Result<Glyph, FontError> {
        let font = FontRef::from_index(&self.data, 0)?;
        let size = Size::new(self.pixels_per_em());
        let location = LocationRef::default();

        let gid = font.charmap().map(ch).unwrap_or(GlyphId::NOTDEF);
        let advance = font
            .glyph_metrics(size, location)
            .advance_width(gid)
            .unwrap_or_default();

        let mut pen = EdgeCollector::new();
        if let Some(outline) = font.outline_glyphs().get(gid) {
            outline
                .draw(DrawSettings::unhinted(size, location), &mut pen)
                .map_err(|error| FontError::Outline { ch, error })?;
        }
        let coverage = pen.rasterize();
        log::trace!(
            "glyph {:?} (gid {}) {}x{} advance {}",
            ch,
            gid.to_u32(),
            coverage.width,
            coverage.height,
            advance
        );

        let mut image = RasterBuffer::new(coverage.width, coverage.height);
        for y in 0..coverage.height {
            for x in 0..coverage.width {
                let t = coverage.get(x, y) as f64 / 255.0;
                image.put(x, y, color.scale(Color::TRANSPARENT, t));
            }
        }

        Ok(Glyph { advance, image })
    }
}

fn family_name(font: &FontRef<'_>) -> Option<String> {
    font.localized_strings(StringId::FAMILY_NAME)
        .english_or_first()
        .map(|name| name.chars().collect())
}

fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(target_os = "windows") {
        let root = std::env::var_os("WINDIR")
            .map_or_else(|| PathBuf::from("C:\\Windows"), PathBuf::from);
        dirs.push(root.join("Fonts"));
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft").join("Windows").join("Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}

/// Every font file under `roots`, walked depth-first. Unreadable directories are skipped.
fn font_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut stack: Vec<PathBuf> = roots.to_vec();
    let mut found = Vec::new();
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_font_file(&path) {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
}
