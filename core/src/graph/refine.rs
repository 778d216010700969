//! Newton refinement of chord crossings onto the true curves.
//!
//! Crossings are first found between stroked chords. When either side is
//! curved, the chord estimate sits up to one sagitta away from the real
//! crossing, so both parameters are polished until the two curves meet.

use crate::curves::CurvePrimitive;
use crate::geometry::utils_2d::{cross_2d, midpoint};
use crate::geometry::{Point2, Vector2};

const MAX_ITERATIONS: usize = 32;
/// Fraction step for central-difference tangents.
const DIFF_STEP: f64 = 1e-7;

/// One side of a crossing.
#[derive(Debug, Clone, Copy)]
pub(super) enum Track<'a> {
    /// Straight chord `start + u * (end - start)`, `u` in `[0, 1]`, mapped
    /// onto carrier parameters `[p0, p1]`.
    Segment { start: Point2, end: Point2, p0: f64, p1: f64 },
    /// Curve fraction `u`, kept inside `[lo, hi]`.
    Curve { curve: &'a CurvePrimitive, lo: f64, hi: f64 },
}

impl Track<'_> {
    /// Local coordinate for a chord hit at fraction `t` and carrier parameter `param`.
    pub(super) fn local(&self, param: f64, t: f64) -> f64 {
        match self {
            Track::Segment { .. } => t,
            Track::Curve { .. } => param,
        }
    }

    /// Carrier parameter of local coordinate `u`.
    pub(super) fn param(&self, u: f64) -> f64 {
        match *self {
            Track::Segment { p0, p1, .. } => p0 + u * (p1 - p0),
            Track::Curve { .. } => u,
        }
    }

    fn clamp(&self, u: f64) -> f64 {
        match *self {
            Track::Segment { .. } => u.clamp(0.0, 1.0),
            Track::Curve { lo, hi, .. } => u.clamp(lo, hi),
        }
    }

    fn point(&self, u: f64) -> Option<Point2> {
        match *self {
            Track::Segment { start, end, .. } => Some(start + (end - start) * u),
            Track::Curve { curve, .. } => curve.fraction_to_point(u),
        }
    }

    fn tangent(&self, u: f64) -> Option<Vector2> {
        match *self {
            Track::Segment { start, end, .. } => Some(end - start),
            Track::Curve { curve, lo, hi } => {
                let (u0, u1) = ((u - DIFF_STEP).max(lo), (u + DIFF_STEP).min(hi));
                if u1 <= u0 {
                    return None;
                }
                Some((curve.fraction_to_point(u1)? - curve.fraction_to_point(u0)?) / (u1 - u0))
            }
        }
    }
}

/// Solve `a(u) = b(v)` starting from the chord estimate.
///
/// Returns the refined local coordinates and the shared point, or `None`
/// when the tracks are tangent or the iteration does not get within
/// `tolerance`.
pub(super) fn refine_crossing(a: Track<'_>, u: f64, b: Track<'_>, v: f64, tolerance: f64) -> Option<(f64, f64, Point2)> {
    let (mut u, mut v) = (a.clamp(u), b.clamp(v));
    let mut pa = a.point(u)?;
    let mut pb = b.point(v)?;

    for _ in 0..MAX_ITERATIONS {
        let r = pa - pb;
        let scale = 1.0 + pa.coords.norm();
        if r.norm() <= 1e-14 * scale {
            break;
        }

        let da = a.tangent(u)?;
        let db = b.tangent(v)?;
        // da * du - db * dv = -r
        let det = -cross_2d(&da, &db);
        if det.abs() <= 1e-12 * da.norm() * db.norm() {
            return None;
        }
        let du = cross_2d(&r, &db) / det;
        let dv = -cross_2d(&da, &r) / det;

        let (nu, nv) = (a.clamp(u + du), b.clamp(v + dv));
        if nu == u && nv == v {
            break;
        }
        u = nu;
        v = nv;
        pa = a.point(u)?;
        pb = b.point(v)?;
    }

    if (pa - pb).norm() > tolerance {
        return None;
    }
    Some((u, v, midpoint(&pa, &pb)))
}
