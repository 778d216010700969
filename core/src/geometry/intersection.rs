//! 2D segment intersection for the planar graph merge.

use super::utils_2d::cross_2d;
use super::Point2;

/// How two line segments meet.
///
/// Parameters are fractions along each segment: `point = start + t * (end - start)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentHit {
    None,
    /// Single shared point (proper crossing, T-junction or touching ends).
    Point { point: Point2, ta: f64, tb: f64 },
    /// Collinear overlap between two shared points, ordered along the first segment.
    Overlap {
        first: (Point2, f64, f64),
        second: (Point2, f64, f64),
    },
}

/// Snap a fraction within `eps` of 0 or 1 onto the end, clamped to [0, 1].
fn snap_fraction(t: f64, eps: f64) -> f64 {
    if t <= eps {
        0.0
    } else if t >= 1.0 - eps {
        1.0
    } else {
        t
    }
}

/// Intersect segments a0-a1 and b0-b1 with an absolute distance tolerance.
///
/// Hits within `tolerance` of a segment end are snapped onto that end so the
/// reported point coincides exactly with the input endpoint.
pub fn segment_segment_intersection(
    a0: Point2, a1: Point2,
    b0: Point2, b1: Point2,
    tolerance: f64,
) -> SegmentHit {
    let da = a1 - a0;
    let db = b1 - b0;
    let la = da.norm();
    let lb = db.norm();

    if la <= tolerance || lb <= tolerance {
        return SegmentHit::None;
    }

    let eps_a = tolerance / la;
    let eps_b = tolerance / lb;

    // Perpendicular distances of b's ends from line a
    let off_b0 = cross_2d(&da, &(b0 - a0)) / la;
    let off_b1 = cross_2d(&da, &(b1 - a0)) / la;

    if off_b0.abs() <= tolerance && off_b1.abs() <= tolerance {
        return collinear_overlap(a0, a1, b0, b1, la, lb, eps_a, eps_b);
    }

    let denom = cross_2d(&da, &db);
    if denom.abs() < f64::EPSILON * la * lb {
        return SegmentHit::None; // Parallel
    }

    let w = b0 - a0;
    let ta = cross_2d(&w, &db) / denom;
    let tb = cross_2d(&w, &da) / denom;

    if ta < -eps_a || ta > 1.0 + eps_a || tb < -eps_b || tb > 1.0 + eps_b {
        return SegmentHit::None;
    }

    let ta = snap_fraction(ta, eps_a);
    let tb = snap_fraction(tb, eps_b);

    // Prefer exact input coordinates when the hit lands on an endpoint
    let point = if ta == 0.0 {
        a0
    } else if ta == 1.0 {
        a1
    } else if tb == 0.0 {
        b0
    } else if tb == 1.0 {
        b1
    } else {
        a0 + da * ta
    };

    SegmentHit::Point { point, ta, tb }
}

#[allow(clippy::too_many_arguments)]
fn collinear_overlap(
    a0: Point2, a1: Point2,
    b0: Point2, b1: Point2,
    la: f64, lb: f64,
    eps_a: f64, eps_b: f64,
) -> SegmentHit {
    let da = a1 - a0;
    let db = b1 - b0;
    let param_a = |p: &Point2| (p - a0).dot(&da) / (la * la);
    let param_b = |p: &Point2| (p - b0).dot(&db) / (lb * lb);

    // Candidate shared points: every endpoint that lies within the other segment
    let mut hits: Vec<(Point2, f64, f64)> = Vec::with_capacity(4);
    for (p, on_a) in [(a0, true), (a1, true), (b0, false), (b1, false)] {
        let ta = if on_a { if p == a0 { 0.0 } else { 1.0 } } else { param_a(&p) };
        let tb = if on_a { param_b(&p) } else if p == b0 { 0.0 } else { 1.0 };
        if ta >= -eps_a && ta <= 1.0 + eps_a && tb >= -eps_b && tb <= 1.0 + eps_b {
            hits.push((p, snap_fraction(ta, eps_a), snap_fraction(tb, eps_b)));
        }
    }

    if hits.is_empty() {
        return SegmentHit::None;
    }

    hits.sort_by(|x, y| x.1.total_cmp(&y.1));
    let first = hits[0];
    let second = hits[hits.len() - 1];

    if (second.1 - first.1) <= eps_a {
        SegmentHit::Point { point: first.0, ta: first.1, tb: first.2 }
    } else {
        SegmentHit::Overlap { first, second }
    }
}
