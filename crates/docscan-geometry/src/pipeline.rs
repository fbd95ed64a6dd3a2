//! End-to-end corner extraction from raw line segments.

use crate::error::{check_determinant_threshold, check_tolerance};
use crate::intersection::{collect_intersections, quad_corners};
use crate::{
    filter_similar_lines, format_pixel_point, group_by_near_parallel_lines, load_json,
    log_line_parameters, polar_from_segment, write_json, GeometryError, JsonIoError, LineGroup,
    LineSegment, PolarLine, DEFAULT_MIN_DETERMINANT,
};
use log::{info, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Tolerances for [`detect_document_corners`].
///
/// Angles are in degrees here so parameter files stay readable; the
/// geometry functions themselves take radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentCornerParams {
    /// Max `rho` difference (pixels) for two lines to be duplicates.
    pub rho_tolerance: f64,
    /// Max angle difference (degrees) for two lines to be duplicates.
    pub theta_tolerance_deg: f64,
    /// Max angle difference (degrees) between a line and its group.
    pub parallel_tolerance_deg: f64,
    /// Pairs with `|sin Δθ|` below this are not intersected.
    pub min_determinant: f64,
}

impl Default for DocumentCornerParams {
    fn default() -> Self {
        Self {
            rho_tolerance: 20.0,
            theta_tolerance_deg: 5.0,
            parallel_tolerance_deg: 20.0,
            min_determinant: DEFAULT_MIN_DETERMINANT,
        }
    }
}

impl DocumentCornerParams {
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_tolerance("rho_tolerance", self.rho_tolerance)?;
        check_tolerance("theta_tolerance_deg", self.theta_tolerance_deg)?;
        check_tolerance("parallel_tolerance_deg", self.parallel_tolerance_deg)?;
        check_determinant_threshold(self.min_determinant)?;
        Ok(())
    }

    /// Load parameters from a JSON file; missing fields take defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, JsonIoError> {
        load_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), JsonIoError> {
        write_json(self, path)
    }
}

/// Every intermediate stage of a corner extraction run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentCorners {
    /// One polar line per input segment, same order.
    pub lines: Vec<PolarLine>,
    /// `lines` with near-duplicates removed.
    pub filtered: Vec<PolarLine>,
    /// `filtered` split by orientation.
    pub groups: Vec<LineGroup>,
    /// All cross-group intersections.
    pub intersections: Vec<Point2<f64>>,
    /// Document quadrilateral from the two leading groups, if available.
    pub quad: Option<[Point2<f64>; 4]>,
}

/// Run segment conversion, filtering, grouping and intersection.
///
/// Each converted line is written to the debug log.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(segments, params), fields(segments = segments.len()))
)]
pub fn detect_document_corners(
    segments: &[LineSegment],
    params: &DocumentCornerParams,
) -> Result<DocumentCorners, GeometryError> {
    params.validate()?;

    let lines: Vec<PolarLine> = segments.iter().map(polar_from_segment).collect();
    lines.iter().for_each(log_line_parameters);

    let filtered = filter_similar_lines(
        &lines,
        params.rho_tolerance,
        params.theta_tolerance_deg.to_radians(),
    )?;
    let groups =
        group_by_near_parallel_lines(&filtered, params.parallel_tolerance_deg.to_radians())?;
    let intersections = collect_intersections(&groups, params.min_determinant);
    let quad = quad_corners(&groups, params.min_determinant);

    info!(
        "{} segments -> {} lines, {} groups, {} intersections",
        segments.len(),
        filtered.len(),
        groups.len(),
        intersections.len()
    );
    match &quad {
        Some(corners) => info!(
            "document corners {}",
            corners
                .iter()
                .map(format_pixel_point)
                .collect::<Vec<_>>()
                .join(" ")
        ),
        None => warn!("document quad not found ({} groups)", groups.len()),
    }

    Ok(DocumentCorners {
        lines,
        filtered,
        groups,
        intersections,
        quad,
    })
}
