use crate::geometry::utils_2d::cross_2d;
use crate::geometry::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Elliptical arc `center + vector0 * cos(theta) + vector90 * sin(theta)` for
/// `theta` in `start_angle .. start_angle + sweep_angle`.
///
/// The two vectors are conjugate semi-axes; a circle of radius `r` uses
/// `(r, 0)` and `(0, r)`. A negative sweep runs clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipticalArc {
    pub center: Point2,
    pub vector0: Vector2,
    pub vector90: Vector2,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl EllipticalArc {
    pub fn new(center: Point2, vector0: Vector2, vector90: Vector2, start_angle: f64, sweep_angle: f64) -> Self {
        Self { center, vector0, vector90, start_angle, sweep_angle }
    }

    /// Full counter-clockwise circle starting at angle zero.
    pub fn circle(center: Point2, radius: f64) -> Self {
        Self::circular_arc(center, radius, 0.0, TAU)
    }

    pub fn circular_arc(center: Point2, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self::new(
            center,
            Vector2::new(radius, 0.0),
            Vector2::new(0.0, radius),
            start_angle,
            sweep_angle,
        )
    }

    pub fn point_at_angle(&self, theta: f64) -> Point2 {
        self.center + self.vector0 * theta.cos() + self.vector90 * theta.sin()
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    pub fn fraction_to_angle(&self, fraction: f64) -> f64 {
        self.start_angle + fraction * self.sweep_angle
    }

    pub fn fraction_to_point(&self, fraction: f64) -> Point2 {
        self.point_at_angle(self.fraction_to_angle(fraction))
    }

    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.end_angle())
    }

    /// True when the sweep covers the whole ellipse.
    pub fn is_full_ellipse(&self) -> bool {
        (self.sweep_angle.abs() - TAU).abs() < 1e-12
    }

    pub fn reversed(&self) -> Self {
        Self {
            start_angle: self.end_angle(),
            sweep_angle: -self.sweep_angle,
            ..self.clone()
        }
    }

    /// Sub-arc between two fractions of this arc. `f0 > f1` gives a reversed piece.
    pub fn partial(&self, f0: f64, f1: f64) -> Self {
        Self {
            start_angle: self.fraction_to_angle(f0),
            sweep_angle: (f1 - f0) * self.sweep_angle,
            ..self.clone()
        }
    }

    /// Number of chords needed so no chord spans more than `max_angle`.
    pub fn chord_count(&self, max_angle: f64) -> usize {
        let max_angle = if max_angle > 0.0 { max_angle } else { TAU / 128.0 };
        ((self.sweep_angle.abs() / max_angle).ceil() as usize).max(2)
    }

    pub fn stroke(&self, max_angle: f64) -> Vec<Point2> {
        let n = self.chord_count(max_angle);
        (0..=n)
            .map(|i| self.fraction_to_point(i as f64 / n as f64))
            .collect()
    }

    /// Exact value of `0.5 * integral(x dy - y dx)` along the arc.
    pub fn area_contribution(&self) -> f64 {
        let (t0, t1) = (self.start_angle, self.end_angle());
        let c = self.center.coords;
        let a = self.vector0;
        let b = self.vector90;
        0.5 * (cross_2d(&a, &b) * (t1 - t0)
            + cross_2d(&c, &a) * (t1.cos() - t0.cos())
            + cross_2d(&c, &b) * (t1.sin() - t0.sin()))
    }
}
