//! Scenes: a serializable list of drawing commands replayed onto a fresh buffer

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::ImageFormat;
use crate::error::{RasterError, SceneError};
use crate::raster::{Color, Point, RasterBuffer, ResizeMode};
use crate::text::{Font, TextAlign};

/// One drawing call, tagged by `"op"` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Fill {
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        #[serde(default)]
        width: u32,
        color: Color,
        /// Color at the start of the gradient; solid when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color2: Option<Color>,
    },
    Rect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        #[serde(default)]
        fill: bool,
        #[serde(default)]
        line_width: u32,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
        #[serde(default)]
        fill: bool,
        #[serde(default)]
        line_width: u32,
    },
    /// Vertices are sorted around their centroid before drawing
    Polygon {
        points: Vec<Point>,
        color: Color,
        #[serde(default)]
        fill: bool,
        #[serde(default)]
        line_width: u32,
    },
    /// Outline joined in the given vertex order
    PolygonOutline {
        points: Vec<Point>,
        color: Color,
        #[serde(default)]
        line_width: u32,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
        #[serde(default)]
        align: TextAlign,
    },
    /// Composite a PNG/JPEG file, resolved against the assets directory
    Image {
        path: PathBuf,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        #[serde(default)]
        mode: ResizeMode,
    },
}

impl DrawCommand {
    /// JSON tag of this command
    pub fn op(&self) -> &'static str {
        match self {
            Self::Fill { .. } => "fill",
            Self::Line { .. } => "line",
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::PolygonOutline { .. } => "polygon_outline",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
        }
    }
}

/// A canvas size, optional background and the commands drawn onto it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: None,
            commands: Vec::new(),
        }
    }

    /// 100x100 white canvas with two red lines of text
    pub fn demo() -> Self {
        let mut scene = Self::new("demo", 100, 100);
        scene.background = Some(Color::WHITE);
        scene.push(DrawCommand::Text {
            x: 10,
            y: 40,
            text: "test\ntest".to_string(),
            color: Color::RED,
            align: TextAlign::Left,
        });
        scene
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// True if any command needs a font to render
    pub fn needs_font(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { .. }))
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Replay every command in order onto a new buffer.
    ///
    /// Commands with rejected geometry are logged and skipped. Missing files,
    /// undecodable images and glyph failures abort the render.
    pub fn render(
        &self,
        font: Option<&dyn Font>,
        assets: &Path,
    ) -> Result<RasterBuffer, SceneError> {
        log::debug!(
            "rendering scene {:?} ({}x{}, {} commands)",
            self.name,
            self.width,
            self.height,
            self.commands.len()
        );

        let mut buf = RasterBuffer::new(self.width, self.height);
        if let Some(background) = self.background {
            buf.fill(background);
        }

        for (index, command) in self.commands.iter().enumerate() {
            let drawn: Result<(), RasterError> = match command {
                DrawCommand::Fill { color } => {
                    buf.fill(*color);
                    Ok(())
                },
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                    color2,
                } => {
                    let start = color2.unwrap_or(*color);
                    buf.draw_line(from.0, from.1, to.0, to.1, *width, *color, start);
                    Ok(())
                },
                DrawCommand::Rect {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    fill,
                    line_width,
                } => buf.draw_rect(*x1, *y1, *x2, *y2, *color, *fill, *line_width),
                DrawCommand::Circle {
                    cx,
                    cy,
                    radius,
                    color,
                    fill,
                    line_width,
                } => buf.draw_circle(*cx, *cy, *radius, *color, *fill, *line_width),
                DrawCommand::Polygon {
                    points,
                    color,
                    fill,
                    line_width,
                } => buf.draw_polygon(points, *color, *fill, *line_width),
                DrawCommand::PolygonOutline {
                    points,
                    color,
                    line_width,
                } => buf.draw_polygon_unsorted(points, *color, *line_width),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    color,
                    align,
                } => {
                    let font = font.ok_or(SceneError::MissingFont)?;
                    buf.draw_string(*x, *y, font, text, *color, *align)?;
                    Ok(())
                },
                DrawCommand::Image {
                    path,
                    x1,
                    y1,
                    x2,
                    y2,
                    mode,
                } => {
                    let image = load_image(&assets.join(path))?;
                    buf.draw_image(*x1, *y1, *x2, *y2, &image, *mode)
                },
            };

            if let Err(err) = drawn {
                log::warn!(
                    "scene {:?}: command {} ({}) skipped: {}",
                    self.name,
                    index,
                    command.op(),
                    err
                );
            }
        }
        Ok(buf)
    }
}

fn load_image(path: &Path) -> Result<RasterBuffer, SceneError> {
    let format = ImageFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RasterBuffer::decode(&bytes, format)?)
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled", 0, 0)
    }
}
