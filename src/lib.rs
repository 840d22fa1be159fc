//! # GPX Route Stats
//!
//! Compact statistics for a single recorded track:
//! - total horizontal distance (haversine, 6,371 km sphere)
//! - elevation gain/loss with a distance-based hysteresis filter
//! - climb/descent segments bucketed by percent grade
//! - mean elevation
//!
//! The track is first thinned so that points closer together than a
//! configurable spacing do not inflate the statistics.
//!
//! ```rust
//! use gpx_route_stats::{AnalyzerConfig, RouteAnalyzer};
//!
//! let analyzer = RouteAnalyzer::new(AnalyzerConfig::new(10.0)).unwrap();
//! let summary = analyzer
//!     .analyze_coordinates(&[
//!         (23.28, 42.560, 1800.0),
//!         (23.28, 42.561, 1805.0),
//!         (23.28, 42.562, 1812.0),
//!         (23.28, 42.563, 1811.0),
//!     ])
//!     .unwrap();
//! println!("{:.2}km, +{:.0}m", summary.distance_km, summary.ascent_m);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod gpx_reader;
pub mod point_thinner;
pub mod report;
pub mod route_statistics;
pub mod slope_histogram;
pub mod track_point;

pub use analyzer::{RouteAnalysis, RouteAnalyzer};
pub use config::AnalyzerConfig;
pub use error::{PointField, Result, RouteStatsError, Stage};
pub use geodesy::haversine_distance;
pub use point_thinner::{thin_indices, thin_points};
pub use route_statistics::{summarize, RouteSummary};
pub use slope_histogram::{SegmentBucket, SlopeDirection, SlopeHistogram, SteepnessCategory};
pub use track_point::TrackPoint;
