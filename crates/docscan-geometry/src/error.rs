/// Errors returned for caller-side contract violations.
///
/// Geometry on real data never fails: degenerate segments get a default line
/// and ill-conditioned intersections are skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{name} must be non-negative (got {value})")]
    InvalidTolerance { name: &'static str, value: f64 },
    #[error("determinant threshold must be finite and non-negative (got {value})")]
    InvalidDeterminantThreshold { value: f64 },
}

/// `+inf` is a valid tolerance (everything matches); NaN is not.
pub(crate) fn check_tolerance(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidTolerance { name, value })
    }
}

pub(crate) fn check_determinant_threshold(value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidDeterminantThreshold { value })
    }
}
