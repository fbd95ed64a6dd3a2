//! Polar line geometry for document edge detection.
//!
//! An external line detector hands over raw segments (endpoint pairs). This
//! crate turns them into `(rho, theta)` lines, drops near-duplicates, groups
//! the survivors by orientation and intersects lines of different groups to
//! produce document corner candidates.
//!
//! The crate is small and purely geometric. It does *not* depend on any
//! image type or line detector.
//!
//! ```
//! use docscan_geometry::{detect_document_corners, DocumentCornerParams, LineSegment};
//!
//! let segments = [
//!     LineSegment::from([10, 0, 10, 100]),
//!     LineSegment::from([90, 0, 90, 100]),
//!     LineSegment::from([0, 20, 100, 20]),
//!     LineSegment::from([0, 80, 100, 80]),
//! ];
//! let found = detect_document_corners(&segments, &DocumentCornerParams::default()).unwrap();
//! assert_eq!(found.intersections.len(), 4);
//! assert!(found.quad.is_some());
//! ```

mod angle;
mod error;
mod filter;
mod grouping;
mod intersection;
mod io;
mod line;
mod logger;
mod pipeline;

pub use angle::{are_thetas_close, wrap_angle_pi};
pub use error::GeometryError;
pub use filter::{are_lines_similar, filter_similar_lines};
pub use grouping::{group_by_near_parallel_lines, LineGroup};
pub use intersection::{
    intersect_polar_lines, intersections_from_parallel_lines,
    intersections_from_parallel_lines_with, quad_corners_from_parallel_groups,
    DEFAULT_MIN_DETERMINANT,
};
pub use io::{load_json, write_json, JsonIoError};
pub use line::{
    format_pixel_point, log_line_parameters, polar_from_segment, LineSegment, PolarLine,
};
pub use pipeline::{detect_document_corners, DocumentCornerParams, DocumentCorners};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, verbosity_level};
