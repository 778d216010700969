//! Area, centroid and point membership for regions.
//!
//! Areas use the exact per-primitive contributions; centroids and point
//! tests work on the stroked boundary.

use super::{CurveLoop, ParityRegion, Region};
use crate::curves::StrokeOptions;
use crate::geometry::{utils_2d, Point2, Vector2};

impl CurveLoop {
    /// Concatenated stroke of every primitive, shared joints removed.
    pub fn stroke_points(&self, options: &StrokeOptions) -> Vec<Point2> {
        let mut chain = Vec::new();
        for primitive in &self.primitives {
            utils_2d::append_chain(&mut chain, &primitive.stroke(options), 0.0);
        }
        if chain.len() > 1 && chain.first() == chain.last() {
            chain.pop();
        }
        chain
    }

    /// Signed area; positive when the loop runs counter-clockwise.
    pub fn signed_area(&self, options: &StrokeOptions) -> f64 {
        self.primitives.iter().map(|p| p.area_contribution(options)).sum()
    }

    pub fn area_xy(&self, options: &StrokeOptions) -> f64 {
        self.signed_area(options).abs()
    }

    pub fn contains_point(&self, point: &Point2, options: &StrokeOptions) -> bool {
        utils_2d::point_in_polygon(point, &self.stroke_points(options))
    }

    /// Area centroid and absolute area.
    pub fn centroid_area_xy(&self, options: &StrokeOptions) -> Option<(Point2, f64)> {
        let pts = self.stroke_points(options);
        if pts.len() < 3 {
            return None;
        }
        Some((utils_2d::polygon_centroid(&pts), self.area_xy(options)))
    }
}

impl ParityRegion {
    /// Outer area minus hole areas.
    pub fn area_xy(&self, options: &StrokeOptions) -> f64 {
        let mut loops = self.loops.iter();
        let outer = loops.next().map_or(0.0, |l| l.area_xy(options));
        outer - loops.map(|l| l.area_xy(options)).sum::<f64>()
    }

    /// Even-odd test over all loops.
    pub fn contains_point(&self, point: &Point2, options: &StrokeOptions) -> bool {
        self.loops.iter().filter(|l| l.contains_point(point, options)).count() % 2 == 1
    }

    pub fn centroid_area_xy(&self, options: &StrokeOptions) -> Option<(Point2, f64)> {
        let mut loops = self.loops.iter();
        let (outer_c, outer_a) = loops.next()?.centroid_area_xy(options)?;
        let mut moment = outer_c.coords * outer_a;
        let mut area = outer_a;
        for hole in loops {
            if let Some((c, a)) = hole.centroid_area_xy(options) {
                moment -= c.coords * a;
                area -= a;
            }
        }
        if area.abs() < f64::EPSILON {
            return None;
        }
        Some((Point2::from(moment / area), area))
    }
}

impl Region {
    /// Enclosed area: loops by magnitude, parity regions minus holes, unions summed.
    pub fn area_xy(&self, options: &StrokeOptions) -> f64 {
        match self {
            Region::Loop(l) => l.area_xy(options),
            Region::Parity(p) => p.area_xy(options),
            Region::Union(u) => u.children.iter().map(|c| c.area_xy(options)).sum(),
        }
    }

    pub fn contains_point(&self, point: &Point2, options: &StrokeOptions) -> bool {
        match self {
            Region::Loop(l) => l.contains_point(point, options),
            Region::Parity(p) => p.contains_point(point, options),
            Region::Union(u) => u.children.iter().any(|c| c.contains_point(point, options)),
        }
    }

    /// Area-weighted centroid and total area.
    pub fn centroid_area_xy(&self, options: &StrokeOptions) -> Option<(Point2, f64)> {
        match self {
            Region::Loop(l) => l.centroid_area_xy(options),
            Region::Parity(p) => p.centroid_area_xy(options),
            Region::Union(u) => {
                let parts: Vec<(Point2, f64)> =
                    u.children.iter().filter_map(|c| c.centroid_area_xy(options)).collect();
                let area: f64 = parts.iter().map(|(_, a)| a).sum();
                if parts.is_empty() || area.abs() < f64::EPSILON {
                    return None;
                }
                let moment = parts
                    .iter()
                    .fold(Vector2::zeros(), |acc, (c, a)| acc + c.coords * *a);
                Some((Point2::from(moment / area), area))
            }
        }
    }
}
