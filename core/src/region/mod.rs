//! Region structure shared by Boolean inputs and outputs.
//!
//! A region is a closed loop, a parity region (outer loop plus holes) or a
//! union of independent regions.

use crate::curves::{CurvePrimitive, CurvePrimitivePtr, EllipticalArc};
use crate::geometry::{within, Point2};
use serde::{Deserialize, Serialize};

pub mod measure;

#[cfg(test)]
mod tests_region;

/// Role of a loop inside its parent region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoundaryType {
    /// Not a boundary; ignored by area operations.
    Open,
    #[default]
    Outer,
    Inner,
}

/// Ordered primitives forming one boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveLoop {
    #[serde(default)]
    pub boundary: BoundaryType,
    pub primitives: Vec<CurvePrimitivePtr>,
}

impl CurveLoop {
    pub fn new(boundary: BoundaryType, primitives: Vec<CurvePrimitivePtr>) -> Self {
        Self { boundary, primitives }
    }

    pub fn outer(primitives: Vec<CurvePrimitivePtr>) -> Self {
        Self::new(BoundaryType::Outer, primitives)
    }

    /// Closed polygon as a single line string. The first point is repeated at the end if needed.
    pub fn polygon(points: &[Point2]) -> Self {
        let mut pts = points.to_vec();
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if points.len() > 1 && first != last {
                pts.push(*first);
            }
        }
        Self::outer(vec![CurvePrimitive::line_string(pts).into_ptr()])
    }

    /// Counter-clockwise axis-aligned rectangle.
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::polygon(&[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    /// Closed polygon with one line segment primitive per side.
    pub fn from_segments(points: &[Point2]) -> Self {
        let n = points.len();
        let primitives = (0..n)
            .map(|i| CurvePrimitive::line_segment(points[i], points[(i + 1) % n]).into_ptr())
            .collect();
        Self::outer(primitives)
    }

    pub fn circle(center: Point2, radius: f64) -> Self {
        Self::outer(vec![CurvePrimitive::EllipticalArc(EllipticalArc::circle(center, radius)).into_ptr()])
    }

    pub fn with_boundary(mut self, boundary: BoundaryType) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives chain end to start and the last one returns to the first.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        let ends: Option<Vec<(Point2, Point2)>> = self.primitives.iter().map(|p| p.endpoints()).collect();
        let Some(ends) = ends else {
            return false;
        };
        let (Some(first), Some(last)) = (ends.first(), ends.last()) else {
            return false;
        };
        ends.windows(2).all(|w| within(&w[0].1, &w[1].0, tolerance)) && within(&last.1, &first.0, tolerance)
    }
}

/// Outer loop followed by holes, with even-odd membership.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParityRegion {
    pub loops: Vec<CurveLoop>,
}

impl ParityRegion {
    pub fn new(loops: Vec<CurveLoop>) -> Self {
        Self { loops }
    }

    /// Outer loop plus holes, with boundary types set accordingly.
    pub fn with_holes(outer: CurveLoop, holes: Vec<CurveLoop>) -> Self {
        let mut loops = Vec::with_capacity(holes.len() + 1);
        loops.push(outer.with_boundary(BoundaryType::Outer));
        loops.extend(holes.into_iter().map(|h| h.with_boundary(BoundaryType::Inner)));
        Self { loops }
    }

    pub fn outer(&self) -> Option<&CurveLoop> {
        self.loops.first()
    }

    pub fn holes(&self) -> &[CurveLoop] {
        self.loops.get(1..).unwrap_or(&[])
    }
}

/// Independent sub-regions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnionRegion {
    pub children: Vec<Region>,
}

impl UnionRegion {
    pub fn new(children: Vec<Region>) -> Self {
        Self { children }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Region {
    Loop(CurveLoop),
    Parity(ParityRegion),
    Union(UnionRegion),
}

impl Region {
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Region::Loop(CurveLoop::rectangle(x0, y0, x1, y1))
    }

    pub fn polygon(points: &[Point2]) -> Self {
        Region::Loop(CurveLoop::polygon(points))
    }

    pub fn circle(center: Point2, radius: f64) -> Self {
        Region::Loop(CurveLoop::circle(center, radius))
    }

    pub fn as_loop(&self) -> Option<&CurveLoop> {
        match self {
            Region::Loop(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_parity(&self) -> Option<&ParityRegion> {
        match self {
            Region::Parity(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionRegion> {
        match self {
            Region::Union(u) => Some(u),
            _ => None,
        }
    }

    /// All loops in depth-first order.
    pub fn loops(&self) -> Vec<&CurveLoop> {
        let mut out = Vec::new();
        self.collect_loops(&mut out);
        out
    }

    fn collect_loops<'a>(&'a self, out: &mut Vec<&'a CurveLoop>) {
        match self {
            Region::Loop(l) => out.push(l),
            Region::Parity(p) => out.extend(p.loops.iter()),
            Region::Union(u) => {
                for child in &u.children {
                    child.collect_loops(out);
                }
            }
        }
    }

    /// All primitives of all loops.
    pub fn primitives(&self) -> impl Iterator<Item = &CurvePrimitivePtr> + '_ {
        self.loops().into_iter().flat_map(|l| l.primitives.iter())
    }
}

impl From<CurveLoop> for Region {
    fn from(l: CurveLoop) -> Self {
        Region::Loop(l)
    }
}

impl From<ParityRegion> for Region {
    fn from(p: ParityRegion) -> Self {
        Region::Parity(p)
    }
}

impl From<UnionRegion> for Region {
    fn from(u: UnionRegion) -> Self {
        Region::Union(u)
    }
}
