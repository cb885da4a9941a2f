//! Contour extraction and the polygon geometry used by the zone decision.
//!
//! Boundaries are traced with `imageproc`'s Suzuki–Abe border following
//! (outer borders and holes, full hierarchy) and then chain-compressed: a run
//! of boundary steps in the same direction keeps only its end points, so a
//! filled rectangle comes back as its four corners.

use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use serde::Serialize;

/// Closed polygon in pixel coordinates; the last point connects to the first.
pub type Polygon = Vec<Point<i32>>;

/// Axis-aligned box enclosing a set of pixels, `width = max_x - min_x + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Smallest box containing every point, `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// The same box shifted by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Trace all foreground (non-zero) borders of `binary`, in the order the
/// raster scan discovers them, each chain-compressed.
#[must_use]
pub fn extract_contours(binary: &GrayImage) -> Vec<Polygon> {
    find_contours::<i32>(binary)
        .into_iter()
        .map(|c| compress_chain(&c.points))
        .collect()
}

/// Drop every boundary point whose incoming and outgoing steps point the
/// same way.
#[must_use]
pub fn compress_chain(points: &[Point<i32>]) -> Polygon {
    let mut points = points.to_vec();
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let n = points.len();
    if n <= 2 {
        return points;
    }
    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());
    let out: Polygon = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();
    if out.is_empty() {
        vec![points[0]]
    } else {
        out
    }
}

/// Douglas–Peucker simplification of a closed polygon with tolerance
/// `epsilon_frac × perimeter`.
///
/// The polygon is split at its first point and the point farthest from it,
/// and both open chains go through `approximate_polygon_dp`; a chain whose
/// end points coincide would collapse to a single point.
#[must_use]
pub fn approximate_polygon(points: &[Point<i32>], epsilon_frac: f64) -> Polygon {
    let n = points.len();
    let epsilon = epsilon_frac * arc_length(points, true);
    if n < 3 || epsilon.is_nan() || epsilon <= 0.0 {
        return points.to_vec();
    }

    let origin = points[0];
    let far = (1..n)
        .max_by_key(|&i| {
            let dx = i64::from(points[i].x - origin.x);
            let dy = i64::from(points[i].y - origin.y);
            dx * dx + dy * dy
        })
        .unwrap_or(0);
    if points[far] == origin {
        return vec![origin];
    }

    let mut back: Polygon = points[far..].to_vec();
    back.push(origin);
    let mut out = approximate_polygon_dp(&points[..=far], epsilon, false);
    let back = approximate_polygon_dp(&back, epsilon, false);
    // `out` ends with the far point and `back` runs from it back to the origin.
    out.extend_from_slice(&back[1..back.len() - 1]);
    out
}
