use log::debug;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::point_thinner::thin_points;
use crate::route_statistics::{summarize, RouteSummary};
use crate::track_point::TrackPoint;

/// Summary plus the point counts before and after thinning.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAnalysis {
    pub raw_points: usize,
    pub thinned_points: usize,
    pub summary: RouteSummary,
}

/// Thins a track and summarizes it with a fixed set of thresholds.
///
/// Holds no state beyond its configuration, so one analyzer can be shared
/// across threads and reused for any number of tracks.
#[derive(Debug, Clone)]
pub struct RouteAnalyzer {
    config: AnalyzerConfig,
}

impl RouteAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(RouteAnalyzer { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, points: &[TrackPoint]) -> Result<RouteSummary> {
        Ok(self.analyze_detailed(points)?.summary)
    }

    pub fn analyze_detailed(&self, points: &[TrackPoint]) -> Result<RouteAnalysis> {
        let thinned = thin_points(points, self.config.distance_threshold_m)?;
        let summary = summarize(&thinned, &self.config)?;

        debug!(
            "analyzed {} points ({} after thinning): {:.2}km, +{:.0}m/-{:.0}m",
            points.len(),
            thinned.len(),
            summary.distance_km,
            summary.ascent_m,
            summary.descent_m
        );

        Ok(RouteAnalysis {
            raw_points: points.len(),
            thinned_points: thinned.len(),
            summary,
        })
    }

    /// Same as [`RouteAnalyzer::analyze`] for raw `(lon, lat, ele)` tuples.
    pub fn analyze_coordinates(&self, coordinates: &[(f64, f64, f64)]) -> Result<RouteSummary> {
        let points: Vec<TrackPoint> = coordinates.iter().map(|&c| TrackPoint::from(c)).collect();
        self.analyze(&points)
    }
}
