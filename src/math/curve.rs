use glam::Vec3;

use crate::geo::{Projector, Route};

/// Minimum number of samples in the arc-length table
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Parameter offset used for finite-difference tangents
const TANGENT_DELTA: f32 = 1e-4;

/// Segments shorter than this (after the centripetal power) are treated as unit length
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Tangent reported for curves without a direction (single point, zero length)
pub const DEGENERATE_TANGENT: Vec3 = Vec3::X;

/// Open centripetal Catmull-Rom curve through a list of control points.
///
/// The curve passes through every control point. Queries with the `_at`
/// suffix take a normalised arc-length fraction, so equal steps in `u`
/// travel equal distances along the curve.
#[derive(Debug, Clone)]
pub struct Curve {
    points: Vec<Vec3>,
    /// Cumulative length at `i / (len - 1)` of the raw parameter
    arc_lengths: Vec<f32>,
}

impl Curve {
    /// Builds a curve through `points`. Returns `None` for an empty slice.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self::through(points))
    }

    /// Projects every waypoint at ground level and builds the curve through them
    pub fn from_route(route: &Route, projector: &dyn Projector) -> Self {
        let points = route
            .waypoints()
            .iter()
            .map(|c| projector.project(*c, 0.0))
            .collect();
        Self::through(points)
    }

    /// `points` must be non-empty
    fn through(points: Vec<Vec3>) -> Self {
        let divisions = ARC_LENGTH_DIVISIONS.max(points.len() * 10);
        let mut curve = Self {
            points,
            arc_lengths: Vec::with_capacity(divisions + 1),
        };
        curve.arc_lengths = curve.compute_arc_lengths(divisions);
        curve
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// True when the curve has no usable direction
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2 || self.length() <= f32::EPSILON
    }

    /// Point at raw curve parameter `t` in [0, 1]
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        if n == 1 {
            return self.points[0];
        }

        let t = sanitize(t);
        let p = (n - 1) as f32 * t;
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;

        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            p2 + (p2 - p1)
        };

        centripetal(p0, p1, p2, p3, weight)
    }

    /// Unit tangent at raw curve parameter `t`
    pub fn tangent(&self, t: f32) -> Vec3 {
        if self.is_degenerate() {
            return DEGENERATE_TANGENT;
        }

        let t = sanitize(t);
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);

        (self.point(t2) - self.point(t1))
            .try_normalize()
            .unwrap_or(DEGENERATE_TANGENT)
    }

    /// Point at arc-length fraction `u` in [0, 1]
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u` in [0, 1]
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// `divisions + 1` points evenly spaced by arc length, endpoints included
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }

    /// Maps an arc-length fraction onto the raw curve parameter
    fn u_to_t(&self, u: f32) -> f32 {
        let u = sanitize(u);
        let lengths = &self.arc_lengths;
        let total = self.length();

        if lengths.len() < 2 || total <= f32::EPSILON {
            return u;
        }

        let last = lengths.len() - 1;
        let target = u * total;

        // Largest i with lengths[i] <= target
        let i = lengths.partition_point(|&l| l <= target).saturating_sub(1).min(last);
        if i == last {
            return 1.0;
        }

        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            ((target - before) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (i as f32 + fraction) / last as f32
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        lengths
    }
}

/// Clamps to [0, 1]; NaN maps to 0
fn sanitize(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Evaluates the non-uniform cubic between `p1` and `p2` with centripetal knots
fn centripetal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, weight: f32) -> Vec3 {
    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);

    if dt1 < MIN_KNOT_INTERVAL {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_INTERVAL {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_INTERVAL {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    hermite(p1, p2, m1, m2, weight)
}

fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3, t: f32) -> Vec3 {
    let c0 = x0;
    let c1 = t0;
    let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
    let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
    let t2 = t * t;
    c0 + c1 * t + c2 * t2 + c3 * t2 * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_line() -> Curve {
        Curve::new(vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_empty_points_rejected() {
        assert!(Curve::new(vec![]).is_none());
    }

    #[test]
    fn test_passes_through_control_points() {
        let points = vec![
            Vec3::ZERO,
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(6.0, 1.0, 0.0),
            Vec3::new(9.0, 5.0, 0.0),
        ];
        let curve = Curve::new(points.clone()).unwrap();

        for (i, expected) in points.iter().enumerate() {
            let t = i as f32 / 3.0;
            assert!(curve.point(t).distance(*expected) < 1e-4, "point {i}");
        }
    }

    #[test]
    fn test_straight_line_length_and_midpoint() {
        let curve = straight_line();
        assert_relative_eq!(curve.length(), 10.0, epsilon = 1e-3);

        let mid = curve.point_at(0.5);
        assert_relative_eq!(mid.x, 5.0, epsilon = 1e-2);
        assert_relative_eq!(mid.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_tangent_is_unit_along_line() {
        let curve = straight_line();
        for u in [0.0, 0.25, 0.5, 1.0] {
            let tangent = curve.tangent_at(u);
            assert_relative_eq!(tangent.length(), 1.0, epsilon = 1e-4);
            assert!(tangent.x > 0.99, "u={u} tangent={tangent}");
        }
    }

    #[test]
    fn test_out_of_range_fractions_are_clamped() {
        let curve = straight_line();
        assert_eq!(curve.point_at(-1.0), curve.point_at(0.0));
        assert_eq!(curve.point_at(2.0), curve.point_at(1.0));
        assert_eq!(curve.point_at(f32::NAN), curve.point_at(0.0));
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let curve = Curve::new(vec![Vec3::new(1.0, 2.0, 3.0)]).unwrap();
        assert!(curve.is_degenerate());
        assert_eq!(curve.point_at(0.7), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(curve.tangent_at(0.7), DEGENERATE_TANGENT);
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let p = Vec3::new(4.0, 4.0, 0.0);
        let curve = Curve::new(vec![p, p, p]).unwrap();
        assert!(curve.is_degenerate());
        assert!(curve.point_at(0.5).distance(p) < 1e-5);
        assert_eq!(curve.tangent_at(0.5), DEGENERATE_TANGENT);
    }

    #[test]
    fn test_from_route_starts_at_projected_origin() {
        use crate::geo::{Coordinate, MercatorProjector};

        let anchor = Coordinate::new(19.138, 72.932);
        let route = Route::new(vec![anchor, Coordinate::new(19.139, 72.933)]).unwrap();
        let curve = Curve::from_route(&route, &MercatorProjector::new(anchor));

        assert_eq!(curve.points().len(), 2);
        assert!(curve.point_at(0.0).length() < 1e-3);
        assert!(curve.length() > 100.0);
    }

    #[test]
    fn test_spaced_points_count_and_ends() {
        let curve = straight_line();
        let points = curve.spaced_points(20);
        assert_eq!(points.len(), 21);
        assert!(points[0].distance(Vec3::ZERO) < 1e-4);
        assert!(points[20].distance(Vec3::new(10.0, 0.0, 0.0)) < 1e-3);
    }
}
