use super::CurveError;
use crate::geometry::Point2;
use serde::{Deserialize, Serialize};

/// Non-rational B-spline over an active parameter interval.
///
/// `order` is degree + 1 and `knots.len() == poles.len() + order`. Fractions
/// map linearly onto `interval`, so a reversed or partial curve shares the
/// control data of its parent and only moves the interval ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BsplineData", into = "BsplineData")]
pub struct BsplineCurve {
    order: usize,
    poles: Vec<Point2>,
    knots: Vec<f64>,
    interval: (f64, f64),
}

#[derive(Serialize, Deserialize)]
struct BsplineData {
    order: usize,
    poles: Vec<Point2>,
    knots: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<(f64, f64)>,
}

impl TryFrom<BsplineData> for BsplineCurve {
    type Error = CurveError;

    fn try_from(data: BsplineData) -> Result<Self, Self::Error> {
        let mut curve = BsplineCurve::new(data.order, data.poles, data.knots)?;
        if let Some((u0, u1)) = data.interval {
            let (lo, hi) = curve.domain();
            let inside = |u: f64| u >= lo && u <= hi;
            if !inside(u0) || !inside(u1) {
                return Err(CurveError::IntervalOutsideDomain { start: u0, end: u1 });
            }
            curve.interval = (u0, u1);
        }
        Ok(curve)
    }
}

impl From<BsplineCurve> for BsplineData {
    fn from(curve: BsplineCurve) -> Self {
        Self {
            order: curve.order,
            poles: curve.poles,
            knots: curve.knots,
            interval: Some(curve.interval),
        }
    }
}

impl BsplineCurve {
    pub fn new(order: usize, poles: Vec<Point2>, knots: Vec<f64>) -> Result<Self, CurveError> {
        if order < 2 {
            return Err(CurveError::InvalidOrder(order));
        }
        if poles.len() < order {
            return Err(CurveError::TooFewPoles { order, poles: poles.len() });
        }
        if knots.len() != poles.len() + order {
            return Err(CurveError::KnotCount {
                expected: poles.len() + order,
                found: knots.len(),
            });
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(CurveError::DecreasingKnots);
        }
        let lo = knots[order - 1];
        let hi = knots[poles.len()];
        if hi <= lo {
            return Err(CurveError::EmptyDomain);
        }
        Ok(Self { order, poles, knots, interval: (lo, hi) })
    }

    /// Clamped uniform knot vector over `[0, 1]`.
    pub fn uniform(order: usize, poles: Vec<Point2>) -> Result<Self, CurveError> {
        if order < 2 {
            return Err(CurveError::InvalidOrder(order));
        }
        let n = poles.len();
        if n < order {
            return Err(CurveError::TooFewPoles { order, poles: n });
        }
        let spans = n - order + 1;
        let mut knots = Vec::with_capacity(n + order);
        knots.extend(std::iter::repeat(0.0).take(order));
        for i in 1..spans {
            knots.push(i as f64 / spans as f64);
        }
        knots.extend(std::iter::repeat(1.0).take(order));
        Self::new(order, poles, knots)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn poles(&self) -> &[Point2] {
        &self.poles
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn interval(&self) -> (f64, f64) {
        self.interval
    }

    /// Full parameter range supported by the knot vector.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[self.order - 1], self.knots[self.poles.len()])
    }

    fn find_span(&self, u: f64) -> usize {
        let p = self.order - 1;
        let n = self.poles.len();
        for s in (p..n).rev() {
            if self.knots[s] <= u && self.knots[s] < self.knots[s + 1] {
                return s;
            }
        }
        p
    }

    /// de Boor evaluation at knot parameter `u` (clamped to the domain).
    pub fn point_at_param(&self, u: f64) -> Point2 {
        let (lo, hi) = self.domain();
        let u = u.clamp(lo, hi);
        let p = self.order - 1;
        let span = self.find_span(u);

        let mut d: Vec<Point2> = (0..=p).map(|j| self.poles[j + span - p]).collect();
        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = j + span - p;
                let denom = self.knots[i + p + 1 - r] - self.knots[i];
                let alpha = if denom.abs() < f64::EPSILON { 0.0 } else { (u - self.knots[i]) / denom };
                d[j] = Point2::from(d[j - 1].coords * (1.0 - alpha) + d[j].coords * alpha);
            }
        }
        d[p]
    }

    pub fn fraction_to_param(&self, fraction: f64) -> f64 {
        let (u0, u1) = self.interval;
        u0 + fraction * (u1 - u0)
    }

    pub fn fraction_to_point(&self, fraction: f64) -> Point2 {
        self.point_at_param(self.fraction_to_param(fraction))
    }

    pub fn start_point(&self) -> Point2 {
        self.fraction_to_point(0.0)
    }

    pub fn end_point(&self) -> Point2 {
        self.fraction_to_point(1.0)
    }

    pub fn reversed(&self) -> Self {
        let (u0, u1) = self.interval;
        Self { interval: (u1, u0), ..self.clone() }
    }

    pub fn partial(&self, f0: f64, f1: f64) -> Self {
        Self {
            interval: (self.fraction_to_param(f0), self.fraction_to_param(f1)),
            ..self.clone()
        }
    }

    /// Share of the full domain covered by the active interval.
    fn interval_share(&self) -> f64 {
        let (lo, hi) = self.domain();
        let (u0, u1) = self.interval;
        ((u1 - u0).abs() / (hi - lo)).clamp(0.0, 1.0)
    }

    pub fn stroke(&self, points_per_pole: usize) -> Vec<Point2> {
        let full = self.poles.len() * points_per_pole.max(1);
        let n = ((full as f64 * self.interval_share()).ceil() as usize).max(2);
        (0..=n)
            .map(|i| self.fraction_to_point(i as f64 / n as f64))
            .collect()
    }
}
