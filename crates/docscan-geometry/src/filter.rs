//! Near-duplicate suppression for polar lines.
//!
//! A line detector usually reports one physical edge several times with
//! slightly different parameters. The filter keeps the first report of each
//! edge in input order and drops the rest.

use crate::error::check_tolerance;
use crate::{GeometryError, PolarLine};
use log::debug;

/// Whether `a` and `b` describe the same edge within the given tolerances.
///
/// Both lines are compared in canonical form and, failing that, with angles
/// above π/2 moved to the negative side, so a pair at θ≈0 and θ≈π with
/// opposite `rho` still matches.
pub fn are_lines_similar(
    a: &PolarLine,
    b: &PolarLine,
    rho_tolerance: f64,
    theta_tolerance: f64,
) -> bool {
    let (a, b) = (a.canonical(), b.canonical());
    if has_close_parameters(&a, &b, rho_tolerance, theta_tolerance) {
        return true;
    }
    has_close_parameters(&a.shifted(), &b.shifted(), rho_tolerance, theta_tolerance)
}

fn has_close_parameters(
    a: &PolarLine,
    b: &PolarLine,
    rho_tolerance: f64,
    theta_tolerance: f64,
) -> bool {
    (a.rho - b.rho).abs() <= rho_tolerance && (a.theta - b.theta).abs() <= theta_tolerance
}

/// Drop lines similar to an earlier retained line.
///
/// First seen wins: every line is checked against the lines kept so far and
/// kept only if none of them matches. The result is a subsequence of
/// `lines`, so the filter is idempotent.
pub fn filter_similar_lines(
    lines: &[PolarLine],
    rho_tolerance: f64,
    theta_tolerance: f64,
) -> Result<Vec<PolarLine>, GeometryError> {
    check_tolerance("rho_tolerance", rho_tolerance)?;
    check_tolerance("theta_tolerance", theta_tolerance)?;

    let mut kept: Vec<PolarLine> = Vec::with_capacity(lines.len());
    for line in lines {
        let duplicate = kept
            .iter()
            .any(|k| are_lines_similar(line, k, rho_tolerance, theta_tolerance));
        if !duplicate {
            kept.push(*line);
        }
    }

    debug!("kept {} of {} lines", kept.len(), lines.len());
    Ok(kept)
}
