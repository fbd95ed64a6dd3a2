//! Corner candidates from intersecting lines of different orientation groups.

use crate::error::check_determinant_threshold;
use crate::{GeometryError, LineGroup, PolarLine};
use nalgebra::{Matrix2, Point2, Vector2};

/// Smallest `|sin(θb - θa)|` for which two lines are intersected.
///
/// About 0.06° of angular separation; anything closer is treated as parallel.
pub const DEFAULT_MIN_DETERMINANT: f64 = 1e-3;

/// Solve the normal-form equations of `a` and `b` for their common point.
///
/// Returns `None` when the system determinant is below `min_determinant` in
/// magnitude (parallel or nearly so) or the solution is not finite.
pub fn intersect_polar_lines(
    a: &PolarLine,
    b: &PolarLine,
    min_determinant: f64,
) -> Option<Point2<f64>> {
    let (sa, ca) = a.theta.sin_cos();
    let (sb, cb) = b.theta.sin_cos();
    let m = Matrix2::new(ca, sa, cb, sb);

    let det = m.determinant();
    if !(det.abs() >= min_determinant) {
        return None;
    }

    let solution = m.try_inverse()? * Vector2::new(a.rho, b.rho);
    if solution.iter().all(|v| v.is_finite()) {
        Some(Point2::from(solution))
    } else {
        None
    }
}

/// Intersect every line with every line of every later group.
///
/// Output order: group pairs `(i, j)` with `i < j` in lexicographic order,
/// then lines of group `i`, then lines of group `j`. Near-parallel pairs are
/// skipped, so the output may be shorter than the number of pairs.
pub fn intersections_from_parallel_lines(groups: &[LineGroup]) -> Vec<Point2<f64>> {
    collect_intersections(groups, DEFAULT_MIN_DETERMINANT)
}

/// [`intersections_from_parallel_lines`] with an explicit parallelism threshold.
pub fn intersections_from_parallel_lines_with(
    groups: &[LineGroup],
    min_determinant: f64,
) -> Result<Vec<Point2<f64>>, GeometryError> {
    let min_determinant = check_determinant_threshold(min_determinant)?;
    Ok(collect_intersections(groups, min_determinant))
}

pub(crate) fn collect_intersections(
    groups: &[LineGroup],
    min_determinant: f64,
) -> Vec<Point2<f64>> {
    let mut out = Vec::new();
    for (i, first) in groups.iter().enumerate() {
        for second in &groups[i + 1..] {
            for a in first {
                for b in second {
                    if let Some(p) = intersect_polar_lines(a, b, min_determinant) {
                        out.push(p);
                    }
                }
            }
        }
    }
    out
}

/// Four document corners from the two leading orientation groups.
///
/// Uses the first two lines of the first two groups, `a0, a1` and `b0, b1`,
/// and returns `a0×b1, a0×b0, a1×b0, a1×b1`: consecutive corners share an
/// edge, so the array walks around the quadrilateral. Returns `None` when a
/// group is missing, has fewer than two lines, or a pair does not intersect.
pub fn quad_corners_from_parallel_groups(groups: &[LineGroup]) -> Option<[Point2<f64>; 4]> {
    quad_corners(groups, DEFAULT_MIN_DETERMINANT)
}

pub(crate) fn quad_corners(
    groups: &[LineGroup],
    min_determinant: f64,
) -> Option<[Point2<f64>; 4]> {
    let [first, second, ..] = groups else {
        return None;
    };
    let ([a0, a1, ..], [b0, b1, ..]) = (first.as_slice(), second.as_slice()) else {
        return None;
    };

    let corner = |l: &PolarLine, m: &PolarLine| intersect_polar_lines(l, m, min_determinant);
    Some([
        corner(a0, b1)?,
        corner(a0, b0)?,
        corner(a1, b0)?,
        corner(a1, b1)?,
    ])
}
