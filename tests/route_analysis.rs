//! End-to-end properties of thinning + statistics

use approx::assert_relative_eq;
use gpx_route_stats::geodesy::EARTH_RADIUS_M;
use gpx_route_stats::gpx_reader::parse_track_points;
use gpx_route_stats::{
    summarize, thin_indices, thin_points, AnalyzerConfig, RouteAnalyzer, RouteStatsError, Stage,
    SteepnessCategory, TrackPoint,
};

fn along_meridian(distance_m: f64, elevation: f64) -> TrackPoint {
    TrackPoint::new(0.0, (distance_m / EARTH_RADIUS_M).to_degrees(), elevation)
}

/// A hilly out-and-back with GPS-like jitter in both position and elevation.
fn hilly_track() -> Vec<TrackPoint> {
    (0..400)
        .map(|i| {
            let t = i as f64;
            let along = if i < 200 { t * 12.0 } else { (400.0 - t) * 12.0 };
            let jitter = ((i * 7919) % 11) as f64 - 5.0;
            TrackPoint::new(
                23.28 + jitter * 1e-6,
                42.56 + (along / EARTH_RADIUS_M).to_degrees(),
                1200.0 + 80.0 * (along / 500.0).sin() + jitter * 0.3,
            )
        })
        .collect()
}

fn edge_distance_m(points: &[TrackPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

#[test]
fn test_thinned_track_is_subsequence() {
    let points = hilly_track();
    let retained = thin_indices(&points, 25.0).unwrap();
    assert!(!retained.is_empty());
    assert!(retained.windows(2).all(|w| w[0] < w[1]));
    assert!(retained.iter().all(|&i| i < points.len()));
}

#[test]
fn test_dropped_points_have_no_distant_successor() {
    let points = hilly_track();
    let threshold = 25.0;
    let retained = thin_indices(&points, threshold).unwrap();

    for i in (0..points.len()).filter(|i| !retained.contains(i)) {
        let reaches = points[i + 1..]
            .iter()
            .any(|later| points[i].distance_to(later) >= threshold);
        assert!(!reaches, "dropped point {} had a distant successor", i);
    }
    assert!(!retained.contains(&(points.len() - 1)));
}

#[test]
fn test_trailing_drop_is_exact() {
    let mut points: Vec<TrackPoint> = (0..10).map(|i| along_meridian(i as f64 * 100.0, 50.0)).collect();
    for k in 1..=4 {
        points.push(along_meridian(900.0 + k as f64 * 8.0, 50.0));
    }
    // 900m and the four points after it are all within 50m of each other
    let retained = thin_indices(&points, 50.0).unwrap();
    assert_eq!(retained, (0..9).collect::<Vec<_>>());
}

#[test]
fn test_segments_cover_distance() {
    let config = AnalyzerConfig::new(20.0).with_elevation_distance_threshold(40.0);
    let thinned = thin_points(&hilly_track(), config.distance_threshold_m).unwrap();
    let summary = summarize(&thinned, &config).unwrap();

    let expected_m = edge_distance_m(&thinned);
    assert_relative_eq!(summary.distance_km * 1000.0, expected_m, max_relative = 1e-9);
    assert_relative_eq!(summary.total_segment_length_m(), expected_m, max_relative = 1e-6);
}

#[test]
fn test_average_elevation_ignores_thresholds() {
    let thinned = thin_points(&hilly_track(), 20.0).unwrap();
    let mean = thinned.iter().map(|p| p.elevation).sum::<f64>() / thinned.len() as f64;
    let expected = (mean + 0.5).floor() as i64;

    for (section, elevation) in [(50.0, 0.0), (10.0, 500.0), (400.0, 5.0)] {
        let config = AnalyzerConfig::new(20.0)
            .with_slope_section_threshold(section)
            .with_elevation_distance_threshold(elevation);
        assert_eq!(summarize(&thinned, &config).unwrap().average_elevation_m, expected);
    }
}

#[test]
fn test_summarize_is_pure() {
    let config = AnalyzerConfig::new(15.0).with_elevation_distance_threshold(30.0);
    let thinned = thin_points(&hilly_track(), config.distance_threshold_m).unwrap();
    let first = summarize(&thinned, &config).unwrap();
    let second = summarize(&thinned, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.distance_km.to_bits(), second.distance_km.to_bits());
}

#[test]
fn test_one_kilometer_climb() {
    let points = vec![along_meridian(0.0, 400.0), along_meridian(1000.0, 500.0)];
    let summary = summarize(&points, &AnalyzerConfig::new(10.0)).unwrap();
    assert_relative_eq!(summary.distance_km, 1.0, max_relative = 1e-9);
    assert_relative_eq!(summary.ascent_m, 100.0, max_relative = 1e-9);
    assert_eq!(summary.descent_m, 0.0);
}

#[test]
fn test_hysteresis_longer_than_track() {
    let thinned = thin_points(&hilly_track(), 20.0).unwrap();
    let track_m = edge_distance_m(&thinned);
    let config = AnalyzerConfig::new(20.0).with_elevation_distance_threshold(track_m + 1.0);
    let summary = summarize(&thinned, &config).unwrap();
    assert_eq!(summary.ascent_m, 0.0);
    assert_eq!(summary.descent_m, 0.0);
    assert!(summary.distance_km > 0.0);
}

#[test]
fn test_hysteresis_reduces_jitter() {
    let thinned = thin_points(&hilly_track(), 5.0).unwrap();
    let raw = summarize(&thinned, &AnalyzerConfig::new(5.0)).unwrap();
    let filtered = summarize(
        &thinned,
        &AnalyzerConfig::new(5.0).with_elevation_distance_threshold(100.0),
    )
    .unwrap();
    assert!(filtered.ascent_m <= raw.ascent_m);
    assert!(filtered.descent_m <= raw.descent_m);
}

#[test]
fn test_steep_ramp_lands_in_top_bucket() {
    // 40% grade for 200m, then a gentle 1% run-out
    let mut points: Vec<TrackPoint> = (0..=10).map(|i| along_meridian(i as f64 * 20.0, i as f64 * 8.0)).collect();
    points.extend((1..=10).map(|i| along_meridian(200.0 + i as f64 * 20.0, 80.0 + i as f64 * 0.2)));

    let summary = summarize(&points, &AnalyzerConfig::new(10.0)).unwrap();
    assert!(summary.ascent_segments.bucket(SteepnessCategory::Extreme).count >= 1);
    assert!(summary.descent_segments.is_empty());
}

#[test]
fn test_analyzer_from_gpx_text() {
    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="gpx-route-stats" xmlns="http://www.topografix.com/GPX/1/1">
<trk><name>Ridge</name><trkseg>
<trkpt lat="42.5600" lon="23.2800"><ele>1800.0</ele></trkpt>
<trkpt lat="42.5610" lon="23.2800"><ele>1806.0</ele></trkpt>
<trkpt lat="42.5620" lon="23.2800"><ele>1815.0</ele></trkpt>
<trkpt lat="42.5630" lon="23.2800"><ele>1809.0</ele></trkpt>
<trkpt lat="42.5640" lon="23.2800"><ele>1812.0</ele></trkpt>
</trkseg></trk>
</gpx>"#;

    let points = parse_track_points(doc.as_bytes(), "ridge.gpx").unwrap();
    let analyzer = RouteAnalyzer::new(AnalyzerConfig::new(50.0)).unwrap();
    let analysis = analyzer.analyze_detailed(&points).unwrap();

    assert_eq!(analysis.raw_points, 5);
    assert_eq!(analysis.thinned_points, 4);
    // three ~111m legs survive; +6, +9, -6
    assert_relative_eq!(analysis.summary.distance_km, 0.3336, max_relative = 1e-3);
    assert_relative_eq!(analysis.summary.ascent_m, 15.0, max_relative = 1e-9);
    assert_relative_eq!(analysis.summary.descent_m, 6.0, max_relative = 1e-9);
    assert_eq!(analysis.summary.average_elevation_m, 1808); // 7230 / 4 = 1807.5
}

#[test]
fn test_errors_carry_stage() {
    let analyzer = RouteAnalyzer::new(AnalyzerConfig::new(50.0)).unwrap();
    let close_together = vec![along_meridian(0.0, 1.0), along_meridian(10.0, 1.0), along_meridian(20.0, 1.0)];
    match analyzer.analyze(&close_together) {
        Err(RouteStatsError::InsufficientTrack { stage, actual, .. }) => {
            assert_eq!(stage, Stage::Aggregation);
            assert_eq!(actual, 0);
        }
        other => panic!("expected InsufficientTrack, got {:?}", other),
    }
}
