use std::f64::consts::PI;

/// Wrap an angle to [0, π).
pub fn wrap_angle_pi(theta: f64) -> f64 {
    let mut t = theta % PI;
    if t < 0.0 {
        t += PI;
    }
    // A tiny negative remainder rounds up to exactly π.
    if t >= PI {
        t -= PI;
    }
    t
}

/// Whether two line angles (radians) point the same way within `tolerance`.
///
/// Angles are compared directly and across the π seam, so 179° and 1° are
/// 2° apart.
pub fn are_thetas_close(first: f64, second: f64, tolerance: f64) -> bool {
    let diff = (first - second).abs();
    diff <= tolerance || (diff - PI).abs() <= tolerance
}
