//! Glyph coverage rasterizer
//!
//! Outlines arrive through skrifa's `OutlinePen` in pixel units with y up.
//! They are flattened into straight edges (y flipped to raster orientation)
//! and each pixel is sampled on a 4x4 grid with the nonzero winding rule.

use skrifa::outline::OutlinePen;

/// Samples per pixel along each axis
const SUBSAMPLES: u32 = 4;
/// Line segments per quadratic curve
const QUAD_STEPS: u32 = 8;
/// Cubic subdivision depth (2^depth segments)
const CUBIC_DEPTH: u32 = 3;

type Vec2 = (f32, f32);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    p0: Vec2,
    p1: Vec2,
}

#[inline]
fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// 8-bit coverage map cropped to the outline's pixel bounding box
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coverage {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl Coverage {
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.width + x) as usize]
    }
}

/// `OutlinePen` that flattens every contour into edges.
#[derive(Debug, Default)]
pub struct EdgeCollector {
    edges: Vec<Edge>,
    current: Vec2,
    start: Vec2,
}

impl EdgeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn push_edge(&mut self, to: Vec2) {
        if to != self.current {
            self.edges.push(Edge {
                p0: self.current,
                p1: to,
            });
        }
        self.current = to;
    }

    fn close_contour(&mut self) {
        if self.current != self.start {
            let start = self.start;
            self.push_edge(start);
        }
    }

    fn subdivide_cubic(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, depth: u32) {
        if depth >= CUBIC_DEPTH {
            self.push_edge(p3);
            return;
        }

        let p01 = lerp(p0, p1, 0.5);
        let p12 = lerp(p1, p2, 0.5);
        let p23 = lerp(p2, p3, 0.5);
        let p012 = lerp(p01, p12, 0.5);
        let p123 = lerp(p12, p23, 0.5);
        let mid = lerp(p012, p123, 0.5);

        self.subdivide_cubic(p0, p01, p012, mid, depth + 1);
        self.subdivide_cubic(mid, p123, p23, p3, depth + 1);
    }

    /// Rasterize the collected edges. An empty outline (e.g. a space) yields
    /// an empty map.
    pub fn rasterize(&self) -> Coverage {
        if self.edges.is_empty() {
            return Coverage::default();
        }

        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for e in &self.edges {
            for (x, y) in [e.p0, e.p1] {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        let left = min_x.floor() as i32;
        let top = min_y.floor() as i32;
        let width = (max_x.ceil() as i32 - left).max(0) as u32;
        let height = (max_y.ceil() as i32 - top).max(0) as u32;
        let mut hits = vec![0u32; width as usize * height as usize];

        let step = 1.0 / SUBSAMPLES as f32;
        let mut crossings: Vec<(f32, i32)> = Vec::new();

        for row in 0..height {
            for sub_y in 0..SUBSAMPLES {
                let sy = (top + row as i32) as f32 + (sub_y as f32 + 0.5) * step;

                crossings.clear();
                for e in &self.edges {
                    let (x0, y0) = e.p0;
                    let (x1, y1) = e.p1;
                    if (y0 <= sy) != (y1 <= sy) {
                        let t = (sy - y0) / (y1 - y0);
                        let dir = if y1 > y0 { 1 } else { -1 };
                        crossings.push((x0 + (x1 - x0) * t, dir));
                    }
                }
                if crossings.is_empty() {
                    continue;
                }

                for col in 0..width {
                    for sub_x in 0..SUBSAMPLES {
                        let sx = (left + col as i32) as f32 + (sub_x as f32 + 0.5) * step;
                        let winding: i32 = crossings
                            .iter()
                            .filter(|(x, _)| *x > sx)
                            .map(|(_, dir)| dir)
                            .sum();
                        if winding != 0 {
                            hits[(row * width + col) as usize] += 1;
                        }
                    }
                }
            }
        }

        let samples = SUBSAMPLES * SUBSAMPLES;
        let alpha = hits
            .into_iter()
            .map(|h| ((h * 255 + samples / 2) / samples) as u8)
            .collect();

        Coverage {
            width,
            height,
            alpha,
        }
    }
}

// Font units are y-up; raster rows grow downward.
impl OutlinePen for EdgeCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.close_contour();
        self.current = (x, -y);
        self.start = self.current;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push_edge((x, -y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let p0 = self.current;
        let c = (cx0, -cy0);
        let p = (x, -y);
        for i in 1..=QUAD_STEPS {
            let t = i as f32 / QUAD_STEPS as f32;
            let a = lerp(p0, c, t);
            let b = lerp(c, p, t);
            self.push_edge(lerp(a, b, t));
        }
        // Land exactly on the endpoint
        self.current = p;
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let p0 = self.current;
        self.subdivide_cubic(p0, (cx0, -cy0), (cx1, -cy1), (x, -y), 0);
        self.current = (x, -y);
    }

    fn close(&mut self) {
        self.close_contour();
    }
}
