use approx::assert_abs_diff_eq;
use docscan_geometry::{
    detect_document_corners, filter_similar_lines, group_by_near_parallel_lines,
    intersections_from_parallel_lines, polar_from_segment, DocumentCornerParams, LineSegment,
    PolarLine,
};
use nalgebra::{Point2, Rotation2, Vector2};

/// Segments along the four sides of a rectangle rotated about its center,
/// each side reported three times with small jitter like a Hough detector.
fn rotated_document(angle_deg: f64) -> (Vec<LineSegment>, [Point2<f64>; 4]) {
    let center = Vector2::new(320.0, 240.0);
    let rot = Rotation2::new(angle_deg.to_radians());
    let corners = [
        Point2::new(-150.0, -200.0),
        Point2::new(150.0, -200.0),
        Point2::new(150.0, 200.0),
        Point2::new(-150.0, 200.0),
    ]
    .map(|p| rot * p + center);

    let mut segments = Vec::new();
    for jitter in [0.0, 1.5, -1.0] {
        for k in 0..4 {
            let a = corners[k];
            let b = corners[(k + 1) % 4];
            let dir = (b - a).normalize();
            let normal = Vector2::new(-dir.y, dir.x) * jitter;
            // Detectors rarely see the whole edge.
            let start = a + (b - a) * 0.1 + normal;
            let end = a + (b - a) * 0.9 + normal;
            segments.push(LineSegment::new(start, end));
        }
    }
    (segments, corners)
}

fn assert_contains_point(points: &[Point2<f64>], expected: &Point2<f64>, tol: f64) {
    assert!(
        points.iter().any(|p| (p - expected).norm() < tol),
        "no point near ({:.1}, {:.1}) in {points:?}",
        expected.x,
        expected.y
    );
}

#[test]
fn finds_corners_of_rotated_document() {
    let (segments, corners) = rotated_document(12.0);
    let found = detect_document_corners(&segments, &DocumentCornerParams::default())
        .expect("valid params");

    assert_eq!(found.lines.len(), segments.len());
    assert_eq!(found.filtered.len(), 4);
    assert_eq!(found.groups.len(), 2);
    assert!(found.groups.iter().all(|g| g.len() == 2));
    assert_eq!(found.intersections.len(), 4);

    for c in &corners {
        assert_contains_point(&found.intersections, c, 1e-6);
    }

    let quad = found.quad.expect("quad from two groups of two");
    for c in &corners {
        assert_contains_point(&quad, c, 1e-6);
    }
    // Consecutive quad corners share an edge: no diagonal steps.
    for k in 0..4 {
        let step = (quad[(k + 1) % 4] - quad[k]).norm();
        assert!(step < 401.0, "step {k} is a diagonal ({step:.1})");
    }
}

#[test]
fn stages_compose_like_the_pipeline() {
    let (segments, _) = rotated_document(-30.0);
    let params = DocumentCornerParams::default();

    let lines: Vec<PolarLine> = segments.iter().map(polar_from_segment).collect();
    let filtered = filter_similar_lines(
        &lines,
        params.rho_tolerance,
        params.theta_tolerance_deg.to_radians(),
    )
    .unwrap();
    let groups =
        group_by_near_parallel_lines(&filtered, params.parallel_tolerance_deg.to_radians())
            .unwrap();
    let intersections = intersections_from_parallel_lines(&groups);

    let report = detect_document_corners(&segments, &params).unwrap();
    assert_eq!(report.filtered, filtered);
    assert_eq!(report.groups, groups);
    assert_eq!(report.intersections, intersections);
}

#[test]
fn horizontal_segment_converts_to_half_turn_normal() {
    let line = polar_from_segment(&LineSegment::from([0, 5, 10, 5]));
    assert_abs_diff_eq!(line.theta, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(line.rho, 5.0, epsilon = 1e-12);
}

#[test]
fn report_and_params_roundtrip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let params_path = dir.path().join("params.json");

    let params = DocumentCornerParams {
        rho_tolerance: 7.5,
        ..Default::default()
    };
    params.write_json(&params_path).unwrap();
    let loaded = DocumentCornerParams::load_json(&params_path).unwrap();
    assert_eq!(loaded, params);

    let (segments, _) = rotated_document(5.0);
    let report = detect_document_corners(&segments, &loaded).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["quad"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["groups"].as_array().map(Vec::len), Some(2));
}
