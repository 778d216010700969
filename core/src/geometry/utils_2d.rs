//! 2D geometry utilities for region operations.
//!
//! Pure functions over nalgebra points that are reused by the curve types,
//! the planar graph and the region measurement code.

use super::{Point2, Vector2, EPSILON};

// =============================================================================
// Vector Operations
// =============================================================================

/// 2D cross product (z-component of 3D cross product).
/// Positive if v2 is counter-clockwise from v1.
#[inline]
pub fn cross_2d(v1: &Vector2, v2: &Vector2) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// Angle of a direction vector measured counter-clockwise from +x, in (-PI, PI].
#[inline]
pub fn direction_angle(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Linear interpolation between two 2D points.
#[inline]
pub fn lerp(p1: &Point2, p2: &Point2, t: f64) -> Point2 {
    p1 + (p2 - p1) * t
}

/// Midpoint between two 2D points.
#[inline]
pub fn midpoint(p1: &Point2, p2: &Point2) -> Point2 {
    lerp(p1, p2, 0.5)
}

// =============================================================================
// Polygon Operations
// =============================================================================

/// Compute signed area of a polygon using the Shoelace formula.
/// Positive = CCW winding, Negative = CW winding.
/// The closing edge is implied; a repeated last point is harmless.
pub fn polygon_signed_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }
    area / 2.0
}

/// Compute absolute area of a polygon.
pub fn polygon_area(vertices: &[Point2]) -> f64 {
    polygon_signed_area(vertices).abs()
}

/// Compute centroid of a polygon.
pub fn polygon_centroid(vertices: &[Point2]) -> Point2 {
    let n = vertices.len();
    if n == 0 {
        return Point2::origin();
    }
    if n == 1 {
        return vertices[0];
    }
    if n == 2 {
        return midpoint(&vertices[0], &vertices[1]);
    }

    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let cross = vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
        signed_area += cross;
        cx += (vertices[i].x + vertices[j].x) * cross;
        cy += (vertices[i].y + vertices[j].y) * cross;
    }

    signed_area /= 2.0;

    if signed_area.abs() > EPSILON {
        cx /= 6.0 * signed_area;
        cy /= 6.0 * signed_area;
    } else {
        // Degenerate polygon: use average
        cx = vertices.iter().map(|p| p.x).sum::<f64>() / n as f64;
        cy = vertices.iter().map(|p| p.y).sum::<f64>() / n as f64;
    }

    Point2::new(cx, cy)
}

/// Winding number of a closed polygon around a point.
/// CCW loops contribute +1, CW loops -1.
pub fn winding_number(point: &Point2, polygon: &[Point2]) -> i32 {
    let n = polygon.len();
    if n < 3 {
        return 0;
    }

    let mut winding: i32 = 0;

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        if p1.y <= point.y {
            if p2.y > point.y {
                // Upward crossing
                let cross = (p2.x - p1.x) * (point.y - p1.y) - (p2.y - p1.y) * (point.x - p1.x);
                if cross > 0.0 {
                    winding += 1;
                }
            }
        } else if p2.y <= point.y {
            // Downward crossing
            let cross = (p2.x - p1.x) * (point.y - p1.y) - (p2.y - p1.y) * (point.x - p1.x);
            if cross < 0.0 {
                winding -= 1;
            }
        }
    }

    winding
}

/// Test if a point is inside a polygon using the winding number algorithm.
/// Works for both convex and concave polygons.
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    winding_number(point, polygon) != 0
}

/// Append `points` to `chain`, skipping a first point that repeats the chain's tail.
pub fn append_chain(chain: &mut Vec<Point2>, points: &[Point2], tolerance: f64) {
    let mut iter = points.iter();
    if let (Some(last), Some(first)) = (chain.last(), points.first()) {
        if super::within(last, first, tolerance) {
            iter.next();
        }
    }
    chain.extend(iter.copied());
}

// =============================================================================
// Tests
// =============================================================================
