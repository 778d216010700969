//! Elementary planar curve primitives.
//!
//! A closed set of curve kinds (line segment, elliptical arc, line string and
//! free-form B-spline) shared by region descriptions and the planar graph.
//! Primitives are immutable values handed around as [`CurvePrimitivePtr`]
//! so provenance can be reported by handle identity.

use crate::geometry::utils_2d::cross_2d;
use crate::geometry::{utils_2d, Aabb2, Point2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;
use thiserror::Error;

pub mod arc;
pub mod bspline;

pub use arc::EllipticalArc;
pub use bspline::BsplineCurve;


/// Shared handle to a curve primitive.
pub type CurvePrimitivePtr = Arc<CurvePrimitive>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("B-spline order must be at least 2, got {0}")]
    InvalidOrder(usize),
    #[error("B-spline of order {order} needs at least {order} poles, got {poles}")]
    TooFewPoles { order: usize, poles: usize },
    #[error("Expected {expected} knots, found {found}")]
    KnotCount { expected: usize, found: usize },
    #[error("Knot vector must be non-decreasing")]
    DecreasingKnots,
    #[error("Knot vector has an empty domain")]
    EmptyDomain,
    #[error("Interval {start}..{end} lies outside the knot domain")]
    IntervalOutsideDomain { start: f64, end: f64 },
}

/// Controls how curved primitives are approximated by chords.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeOptions {
    /// Largest angle (radians) one chord may span on an arc.
    pub max_arc_angle: f64,
    /// Chords per pole on a free-form curve.
    pub free_form_points_per_pole: usize,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            max_arc_angle: PI / 64.0,
            free_form_points_per_pole: 8,
        }
    }
}

/// A single planar curve piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurvePrimitive {
    LineSegment { start: Point2, end: Point2 },
    EllipticalArc(EllipticalArc),
    /// Polyline through at least two points.
    LineString { points: Vec<Point2> },
    FreeForm(BsplineCurve),
}

impl CurvePrimitive {
    pub fn line_segment(start: Point2, end: Point2) -> Self {
        CurvePrimitive::LineSegment { start, end }
    }

    pub fn line_string(points: Vec<Point2>) -> Self {
        CurvePrimitive::LineString { points }
    }

    pub fn into_ptr(self) -> CurvePrimitivePtr {
        Arc::new(self)
    }

    /// Short type label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CurvePrimitive::LineSegment { .. } => "line_segment",
            CurvePrimitive::EllipticalArc(_) => "elliptical_arc",
            CurvePrimitive::LineString { .. } => "line_string",
            CurvePrimitive::FreeForm(_) => "free_form",
        }
    }

    /// Arcs and free-form curves carry intrinsic shape; the rest are straight pieces.
    pub fn is_curved(&self) -> bool {
        matches!(self, CurvePrimitive::EllipticalArc(_) | CurvePrimitive::FreeForm(_))
    }

    /// First and last point, or `None` for an empty line string.
    pub fn endpoints(&self) -> Option<(Point2, Point2)> {
        match self {
            CurvePrimitive::LineSegment { start, end } => Some((*start, *end)),
            CurvePrimitive::EllipticalArc(arc) => Some((arc.start_point(), arc.end_point())),
            CurvePrimitive::LineString { points } => {
                Some((*points.first()?, *points.last()?))
            }
            CurvePrimitive::FreeForm(curve) => Some((curve.start_point(), curve.end_point())),
        }
    }

    pub fn start_point(&self) -> Option<Point2> {
        self.endpoints().map(|(s, _)| s)
    }

    pub fn end_point(&self) -> Option<Point2> {
        self.endpoints().map(|(_, e)| e)
    }

    /// Evaluate at a fraction in `[0, 1]`. Line strings are parameterized
    /// uniformly per segment.
    pub fn fraction_to_point(&self, fraction: f64) -> Option<Point2> {
        match self {
            CurvePrimitive::LineSegment { start, end } => Some(utils_2d::lerp(start, end, fraction)),
            CurvePrimitive::EllipticalArc(arc) => Some(arc.fraction_to_point(fraction)),
            CurvePrimitive::LineString { points } => polyline_point(points, fraction),
            CurvePrimitive::FreeForm(curve) => Some(curve.fraction_to_point(fraction)),
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            CurvePrimitive::LineSegment { start, end } => CurvePrimitive::LineSegment { start: *end, end: *start },
            CurvePrimitive::EllipticalArc(arc) => CurvePrimitive::EllipticalArc(arc.reversed()),
            CurvePrimitive::LineString { points } => {
                CurvePrimitive::LineString { points: points.iter().rev().copied().collect() }
            }
            CurvePrimitive::FreeForm(curve) => CurvePrimitive::FreeForm(curve.reversed()),
        }
    }

    /// Piece between two fractions; `f0 > f1` yields a reversed piece.
    pub fn partial(&self, f0: f64, f1: f64) -> Self {
        match self {
            CurvePrimitive::LineSegment { start, end } => CurvePrimitive::LineSegment {
                start: utils_2d::lerp(start, end, f0),
                end: utils_2d::lerp(start, end, f1),
            },
            CurvePrimitive::EllipticalArc(arc) => CurvePrimitive::EllipticalArc(arc.partial(f0, f1)),
            CurvePrimitive::LineString { points } => {
                CurvePrimitive::LineString { points: polyline_partial(points, f0, f1) }
            }
            CurvePrimitive::FreeForm(curve) => CurvePrimitive::FreeForm(curve.partial(f0, f1)),
        }
    }

    /// Chord approximation from start to end. Straight primitives return their own vertices.
    pub fn stroke(&self, options: &StrokeOptions) -> Vec<Point2> {
        match self {
            CurvePrimitive::LineSegment { start, end } => vec![*start, *end],
            CurvePrimitive::EllipticalArc(arc) => arc.stroke(options.max_arc_angle),
            CurvePrimitive::LineString { points } => points.clone(),
            CurvePrimitive::FreeForm(curve) => curve.stroke(options.free_form_points_per_pole),
        }
    }

    /// `0.5 * integral(x dy - y dx)` along the primitive. Summed over a closed
    /// loop this is the loop's signed area. Exact for straight pieces and arcs.
    pub fn area_contribution(&self, options: &StrokeOptions) -> f64 {
        match self {
            CurvePrimitive::EllipticalArc(arc) => arc.area_contribution(),
            other => chain_area_contribution(&other.stroke(options)),
        }
    }

    pub fn range(&self, options: &StrokeOptions) -> Aabb2 {
        Aabb2::from_points(&self.stroke(options))
    }
}

/// Open-chain version of the shoelace sum.
pub(crate) fn chain_area_contribution(points: &[Point2]) -> f64 {
    points
        .windows(2)
        .map(|w| cross_2d(&w[0].coords, &w[1].coords))
        .sum::<f64>()
        * 0.5
}

fn polyline_point(points: &[Point2], fraction: f64) -> Option<Point2> {
    match points.len() {
        0 => None,
        1 => Some(points[0]),
        n => {
            let u = fraction.clamp(0.0, 1.0) * (n - 1) as f64;
            let i = (u.floor() as usize).min(n - 2);
            Some(utils_2d::lerp(&points[i], &points[i + 1], u - i as f64))
        }
    }
}

fn polyline_partial(points: &[Point2], f0: f64, f1: f64) -> Vec<Point2> {
    if f0 > f1 {
        let mut forward = polyline_partial(points, f1, f0);
        forward.reverse();
        return forward;
    }
    let n = points.len();
    let (Some(first), Some(last)) = (polyline_point(points, f0), polyline_point(points, f1)) else {
        return Vec::new();
    };
    let scale = n.saturating_sub(1) as f64;
    let (u0, u1) = (f0.clamp(0.0, 1.0) * scale, f1.clamp(0.0, 1.0) * scale);

    let mut out = vec![first];
    for (i, p) in points.iter().enumerate() {
        let u = i as f64;
        if u > u0 && u < u1 {
            out.push(*p);
        }
    }
    out.push(last);
    out
}
