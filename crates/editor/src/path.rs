//! Flight path model: ordered waypoints plus the smoothed curve derived
//! from them.
//!
//! The curve is a pure function of the waypoint sequence — it is rebuilt on
//! demand and never mutated independently. Identical waypoints always produce
//! an identical curve.

use glam::DVec3;

/// Minimum spacing between consecutive waypoints appended during one trace
/// gesture. Enforced by the caller, not by `FlightPath` itself.
pub const MIN_POINT_SPACING: f64 = 0.8;

/// Fixed smoothing parameter of the interpolating spline. Not user-exposed.
const TENSION: f64 = 0.5;

/// Subdivisions of the cumulative arc-length table.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Ordered sequence of 3-D waypoints. Insertion order defines travel
/// direction. Fewer than 2 points is "empty" for curve/animation purposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPath {
    points: Vec<DVec3>,
}

impl FlightPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Append a waypoint unconditionally. Distance filtering is the trace
    /// gesture's responsibility.
    pub fn push(&mut self, point: DVec3) {
        self.points.push(point);
    }

    /// Reset to the empty sequence
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn last(&self) -> Option<DVec3> {
        self.points.last().copied()
    }

    /// A path needs at least 2 waypoints before it can be flown
    pub fn is_flyable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Build the smoothed curve through the current waypoints
    pub fn curve(&self) -> Option<CatmullRom> {
        CatmullRom::new(&self.points)
    }

    /// Arc length of the derived curve; 0 with fewer than 2 waypoints
    pub fn length(&self) -> f64 {
        self.curve().map(|c| c.length()).unwrap_or(0.0)
    }
}

/// Open uniform Catmull-Rom spline through a fixed set of waypoints.
///
/// Interpolating: the curve passes through every waypoint exactly. Endpoint
/// tangents come from reflected phantom points (`2·p0 − p1`), so the curve is
/// defined over the whole [0, 1] range even with only two waypoints.
/// Sampling is arc-length parameterized via a precomputed cumulative table.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<DVec3>,
    /// Cumulative chord lengths at uniform parameter steps
    lengths: Vec<f64>,
}

impl CatmullRom {
    /// Returns `None` with fewer than 2 waypoints
    pub fn new(points: &[DVec3]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = Self {
            points: points.to_vec(),
            lengths: Vec::new(),
        };
        curve.lengths = curve.compute_lengths();
        Some(curve)
    }

    /// Total arc length of the curve
    pub fn length(&self) -> f64 {
        *self.lengths.last().unwrap_or(&0.0)
    }

    /// Position at normalized arc-position `t ∈ [0, 1]`
    pub fn sample_at(&self, t: f64) -> DVec3 {
        self.point_at_param(self.param_for_arc(t))
    }

    /// Unit tangent at normalized arc-position `t ∈ [0, 1]`
    pub fn tangent_at(&self, t: f64) -> DVec3 {
        let u = self.param_for_arc(t);
        let d = self.derivative_at_param(u);
        if d.length_squared() > 1e-12 {
            d.normalize()
        } else {
            // Degenerate (coincident waypoints): fall back to chord direction
            let chord = self.points[self.points.len() - 1] - self.points[0];
            if chord.length_squared() > 1e-12 {
                chord.normalize()
            } else {
                DVec3::X
            }
        }
    }

    /// Resolve the segment and local weight for raw parameter `u ∈ [0, 1]`
    fn segment(&self, u: f64) -> (usize, f64) {
        let l = self.points.len();
        let p = (l - 1) as f64 * u.clamp(0.0, 1.0);
        let mut i = p.floor() as usize;
        let mut w = p - i as f64;
        if i >= l - 1 {
            i = l - 2;
            w = 1.0;
        }
        (i, w)
    }

    /// Control quad for segment `i`, with phantom ends reflected through the
    /// boundary waypoints
    fn control_quad(&self, i: usize) -> (DVec3, DVec3, DVec3, DVec3) {
        let pts = &self.points;
        let l = pts.len();
        let p0 = if i > 0 {
            pts[i - 1]
        } else {
            pts[0] * 2.0 - pts[1]
        };
        let p3 = if i + 2 < l {
            pts[i + 2]
        } else {
            pts[l - 1] * 2.0 - pts[l - 2]
        };
        (p0, pts[i], pts[i + 1], p3)
    }

    /// Cubic Hermite evaluation with Catmull-Rom tangents
    fn point_at_param(&self, u: f64) -> DVec3 {
        let (i, w) = self.segment(u);
        let (p0, p1, p2, p3) = self.control_quad(i);
        let t0 = (p2 - p0) * TENSION;
        let t1 = (p3 - p1) * TENSION;
        let w2 = w * w;
        let w3 = w2 * w;
        p1 * (2.0 * w3 - 3.0 * w2 + 1.0)
            + t0 * (w3 - 2.0 * w2 + w)
            + p2 * (-2.0 * w3 + 3.0 * w2)
            + t1 * (w3 - w2)
    }

    /// Derivative with respect to the raw parameter
    fn derivative_at_param(&self, u: f64) -> DVec3 {
        let (i, w) = self.segment(u);
        let (p0, p1, p2, p3) = self.control_quad(i);
        let t0 = (p2 - p0) * TENSION;
        let t1 = (p3 - p1) * TENSION;
        let w2 = w * w;
        p1 * (6.0 * w2 - 6.0 * w)
            + t0 * (3.0 * w2 - 4.0 * w + 1.0)
            + p2 * (-6.0 * w2 + 6.0 * w)
            + t1 * (3.0 * w2 - 2.0 * w)
    }

    /// Cumulative chord lengths at `ARC_LENGTH_DIVISIONS + 1` uniform steps
    fn compute_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut sum = 0.0;
        let mut prev = self.point_at_param(0.0);
        lengths.push(0.0);
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point_at_param(i as f64 / ARC_LENGTH_DIVISIONS as f64);
            sum += current.distance(prev);
            lengths.push(sum);
            prev = current;
        }
        lengths
    }

    /// Map normalized arc-position to the raw curve parameter
    fn param_for_arc(&self, t: f64) -> f64 {
        let total = self.length();
        if total <= 0.0 {
            return 0.0;
        }
        let target = t.clamp(0.0, 1.0) * total;

        // Binary search the cumulative table for the bracketing step
        let mut low = 0;
        let mut high = self.lengths.len() - 1;
        while low < high {
            let mid = (low + high) / 2;
            if self.lengths[mid] < target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        if low == 0 {
            return 0.0;
        }

        let before = self.lengths[low - 1];
        let span = self.lengths[low] - before;
        let frac = if span > 0.0 { (target - before) / span } else { 0.0 };
        ((low - 1) as f64 + frac) / ARC_LENGTH_DIVISIONS as f64
    }
}
