//! Polygon outline and even-odd fill
//!
//! Vertices may arrive in any order; they are sorted by angle around their
//! centroid first so edges are walked with a consistent winding.

use std::cmp::Ordering;

use super::{Color, RasterBuffer};
use crate::error::RasterError;

/// Offset applied to the ray origin so it never passes exactly through a vertex
const RAY_EPSILON: f64 = 1e-4;

pub type Point = (f64, f64);

/// Mean of all vertices
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    Some((sx / n, sy / n))
}

/// Sort vertices by `atan2` angle around their centroid, ascending
pub fn sort_by_angle(points: &mut [Point]) {
    let Some((cx, cy)) = centroid(points) else {
        return;
    };
    points.sort_by(|a, b| {
        let angle_a = (a.1 - cy).atan2(a.0 - cx);
        let angle_b = (b.1 - cy).atan2(b.0 - cx);
        angle_a.total_cmp(&angle_b)
    });
}

/// Turn direction of p -> q -> r
fn orientation(p: Point, q: Point, r: Point) -> Ordering {
    let v = (q.1 - p.1) * (r.0 - q.0) - (q.0 - p.0) * (r.1 - q.1);
    v.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

/// Whether q lies inside the bounding box of p and r
fn within_box(p: Point, q: Point, r: Point) -> bool {
    q.0 <= p.0.max(r.0) && q.0 >= p.0.min(r.0) && q.1 <= p.1.max(r.1) && q.1 >= p.1.min(r.1)
}

/// Segment intersection test, including touching and collinear overlap
fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Ordering::Equal && within_box(p1, p2, q1))
        || (o2 == Ordering::Equal && within_box(p1, q2, q1))
        || (o3 == Ordering::Equal && within_box(p2, p1, q2))
        || (o4 == Ordering::Equal && within_box(p2, q1, q2))
}

/// Even-odd membership of (x, y) in the closed polygon `points`.
///
/// The ray runs from (x + eps, y + eps) to (ray_end, y). When an edge the ray
/// hits is collinear with (x, y) itself, the point is on that edge's line and
/// the answer is whether it lies within the edge's extent.
pub fn contains(points: &[Point], x: f64, y: f64, ray_end: f64) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let origin = (x + RAY_EPSILON, y + RAY_EPSILON);
    let end = (ray_end, y);
    let mut crossings = 0usize;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if !segments_intersect(a, b, origin, end) {
            continue;
        }
        if orientation(a, (x, y), b) == Ordering::Equal {
            return within_box(a, (x, y), b);
        }
        crossings += 1;
    }
    crossings % 2 == 1
}

impl RasterBuffer {
    /// Draw a polygon from unordered vertices.
    ///
    /// Vertices are sorted by angle around their centroid. Outline mode joins
    /// them with `draw_line`; fill mode paints every integer point of the
    /// bounding box that passes the even-odd ray test. Points on an edge count
    /// as inside when the ray detects them.
    pub fn draw_polygon(
        &mut self,
        points: &[Point],
        color: Color,
        fill: bool,
        line_width: u32,
    ) -> Result<(), RasterError> {
        if points.len() < 3 {
            return Err(RasterError::InvalidGeometry("polygon needs at least 3 points"));
        }

        let mut sorted = points.to_vec();
        sort_by_angle(&mut sorted);

        if fill {
            self.fill_polygon(&sorted, color);
            Ok(())
        } else {
            self.draw_polygon_unsorted(&sorted, color, line_width)
        }
    }

    /// Outline the vertices in the order given, closing last -> first
    pub fn draw_polygon_unsorted(
        &mut self,
        points: &[Point],
        color: Color,
        line_width: u32,
    ) -> Result<(), RasterError> {
        if points.len() < 3 {
            return Err(RasterError::InvalidGeometry("polygon needs at least 3 points"));
        }
        for (i, &(x1, y1)) in points.iter().enumerate() {
            let (x2, y2) = points[(i + 1) % points.len()];
            self.draw_line_solid(x1, y1, x2, y2, line_width, color);
        }
        Ok(())
    }

    fn fill_polygon(&mut self, sorted: &[Point], color: Color) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &(x, y) in sorted {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return;
        }

        // Integer points of the bounding box, clipped to the buffer
        let sx = (min_x.ceil() as i64).max(0);
        let sy = (min_y.ceil() as i64).max(0);
        let ex = (max_x.floor() as i64).min(self.width() as i64 - 1);
        let ey = (max_y.floor() as i64).min(self.height() as i64 - 1);

        // Past both the buffer and the polygon so edges beyond the right border still count
        let ray_end = (self.width() as f64).max(max_x) + 1.0;
        for y in sy..=ey {
            for x in sx..=ex {
                if contains(sorted, x as f64, y as f64, ray_end) {
                    self.set(x as i32, y as i32, color);
                }
            }
        }
    }
}
