use super::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in the xy plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Self {
        let mut range = Self::empty();
        for p in points {
            range.extend(p);
        }
        range
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn extend(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);

        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&self, other: &Aabb2) -> Aabb2 {
        let mut res = *self;
        res.min.x = res.min.x.min(other.min.x);
        res.min.y = res.min.y.min(other.min.y);

        res.max.x = res.max.x.max(other.max.x);
        res.max.y = res.max.y.max(other.max.y);
        res
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Aabb2 {
        Aabb2 {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x &&
        self.min.y <= other.max.y && other.min.y <= self.max.y
    }

    /// Length of the box diagonal; zero for an empty box.
    pub fn diagonal(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.max - self.min).norm()
    }
}
