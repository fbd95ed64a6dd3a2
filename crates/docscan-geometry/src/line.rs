use crate::angle::wrap_angle_pi;
use log::debug;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// A line in normal form: `x·cos θ + y·sin θ = ρ`.
///
/// `rho` is the signed distance from the origin along the unit normal
/// `(cos θ, sin θ)`. Lines built by this crate, deserialized ones included,
/// keep `theta` in [0, π); use [`PolarLine::canonical`] to bring an arbitrary
/// pair into that range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PolarLineFields")]
pub struct PolarLine {
    pub rho: f64,
    pub theta: f64,
}

#[derive(Deserialize)]
struct PolarLineFields {
    rho: f64,
    theta: f64,
}

impl From<PolarLineFields> for PolarLine {
    fn from(PolarLineFields { rho, theta }: PolarLineFields) -> Self {
        PolarLine::new(rho, theta)
    }
}

impl PolarLine {
    /// Build a line and reduce it to canonical form.
    pub fn new(rho: f64, theta: f64) -> Self {
        Self { rho, theta }.canonical()
    }

    /// The same line with `theta` in [0, π).
    ///
    /// Every half-turn removed from `theta` flips the sign of `rho`.
    pub fn canonical(self) -> Self {
        let theta = wrap_angle_pi(self.theta);
        let half_turns = ((self.theta - theta) / PI).round();
        let rho = if half_turns.rem_euclid(2.0) == 0.0 {
            self.rho
        } else {
            -self.rho
        };
        Self { rho, theta }
    }

    /// The same line with `theta` moved from (π/2, π) into (-π/2, 0).
    ///
    /// Near-vertical lines sit on both ends of [0, π); comparing the shifted
    /// forms catches pairs that straddle that seam.
    pub(crate) fn shifted(self) -> Self {
        if self.theta > FRAC_PI_2 {
            Self {
                rho: -self.rho,
                theta: self.theta - PI,
            }
        } else {
            self
        }
    }

    /// Unit normal `(cos θ, sin θ)`.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.theta.cos(), self.theta.sin())
    }

    /// Signed distance from `p` to the line, positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, p: &Point2<f64>) -> f64 {
        self.normal().dot(&p.coords) - self.rho
    }

    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }
}

impl fmt::Display for PolarLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rho={:.3} theta={:.4}rad ({:.2}deg)",
            self.rho,
            self.theta,
            self.theta_degrees()
        )
    }
}

/// A detected line segment given by its two endpoints.
///
/// Serialized as `[x1, y1, x2, y2]`, the layout line detectors emit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct LineSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl LineSegment {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn to_polar(&self) -> PolarLine {
        polar_from_segment(self)
    }
}

impl From<[f64; 4]> for LineSegment {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }
}

impl From<[i32; 4]> for LineSegment {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self::from([x1 as f64, y1 as f64, x2 as f64, y2 as f64])
    }
}

impl From<LineSegment> for [f64; 4] {
    fn from(s: LineSegment) -> Self {
        [s.start.x, s.start.y, s.end.x, s.end.y]
    }
}

/// Convert a segment into the polar form of the line through it.
///
/// A zero-length segment has no direction; it maps to `theta = 0` and
/// `rho` equal to the distance of its point from the origin.
pub fn polar_from_segment(segment: &LineSegment) -> PolarLine {
    let d = segment.end - segment.start;
    let len = d.norm();
    if len <= f64::EPSILON {
        let rho = segment.start.coords.norm();
        debug!(
            "degenerate segment at {}, using theta = 0, rho = {rho:.3}",
            format_pixel_point(&segment.start)
        );
        return PolarLine { rho, theta: 0.0 };
    }

    let n = Vector2::new(-d.y, d.x) / len;
    PolarLine {
        rho: n.dot(&segment.start.coords),
        theta: n.y.atan2(n.x),
    }
    .canonical()
}

/// Write `line` to the diagnostic log at debug level.
pub fn log_line_parameters(line: &PolarLine) {
    debug!("{line}");
}

/// Render a point as integer pixel coordinates, truncating toward zero.
pub fn format_pixel_point(p: &Point2<f64>) -> String {
    format!("({}, {})", p.x as i64, p.y as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    fn polar(seg: [f64; 4]) -> PolarLine {
        polar_from_segment(&LineSegment::from(seg))
    }

    #[test]
    fn horizontal_segment() {
        let l = polar([0.0, 5.0, 10.0, 5.0]);
        assert_abs_diff_eq!(l.theta, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(l.rho, 5.0, epsilon = 1e-12);

        // Endpoint order does not matter.
        let r = polar([10.0, 5.0, 0.0, 5.0]);
        assert_abs_diff_eq!(r.theta, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(r.rho, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn vertical_segment() {
        for seg in [[7.0, 0.0, 7.0, 10.0], [7.0, 10.0, 7.0, 0.0]] {
            let l = polar(seg);
            assert_abs_diff_eq!(l.theta, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(l.rho, 7.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn diagonal_segments_keep_signed_rho() {
        // y = -x + 10
        let falling = polar([0.0, 10.0, 10.0, 0.0]);
        assert_abs_diff_eq!(falling.theta, FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(falling.rho, 50f64.sqrt(), epsilon = 1e-9);

        // y = x - 10 passes below the origin.
        let rising = polar([10.0, 0.0, 20.0, 10.0]);
        assert_abs_diff_eq!(rising.theta, 3.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(rising.rho, -(50f64.sqrt()), epsilon = 1e-9);

        // y = x + 10 passes above it.
        let above = polar([0.0, 10.0, 10.0, 20.0]);
        assert_abs_diff_eq!(above.theta, 3.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(above.rho, 50f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn endpoints_lie_on_polar_line() {
        let seg = LineSegment::from([3.0, -4.0, 17.5, 22.0]);
        let l = seg.to_polar();
        assert!((0.0..PI).contains(&l.theta));
        assert_abs_diff_eq!(l.signed_distance(&seg.start), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(l.signed_distance(&seg.end), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_segment_defaults_to_point_distance() {
        let l = polar([3.0, 4.0, 3.0, 4.0]);
        assert_eq!(l.theta, 0.0);
        assert_abs_diff_eq!(l.rho, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn canonical_flips_rho_per_half_turn() {
        let l = PolarLine::new(5.0, PI + 0.5);
        assert_abs_diff_eq!(l.theta, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(l.rho, -5.0);

        let l = PolarLine::new(5.0, -PI + 0.5);
        assert_abs_diff_eq!(l.theta, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(l.rho, -5.0);

        let l = PolarLine::new(5.0, 2.0 * PI + 0.5);
        assert_abs_diff_eq!(l.theta, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(l.rho, 5.0);
    }

    #[test]
    fn integer_segment_and_serde_layout() {
        let seg = LineSegment::from([1, 2, 3, 4]);
        assert_eq!(seg.start, Point2::new(1.0, 2.0));
        assert_abs_diff_eq!(seg.length(), 8f64.sqrt());

        let json = serde_json::to_string(&seg).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: LineSegment = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(back, seg);
    }

    #[test]
    fn deserialized_lines_are_canonical() {
        let l: PolarLine = serde_json::from_str(r#"{"rho": -50, "theta": 3.15}"#).unwrap();
        assert_abs_diff_eq!(l.theta, 3.15 - PI, epsilon = 1e-12);
        assert_abs_diff_eq!(l.rho, 50.0);

        let json = serde_json::to_string(&PolarLine::new(10.0, 0.5)).unwrap();
        assert_eq!(json, r#"{"rho":10.0,"theta":0.5}"#);
    }

    #[test]
    fn display_and_pixel_format() {
        let l = PolarLine::new(10.0, FRAC_PI_2);
        assert_eq!(l.to_string(), "rho=10.000 theta=1.5708rad (90.00deg)");
        assert_eq!(format_pixel_point(&Point2::new(12.9, -3.7)), "(12, -3)");
    }
}
