use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteStatsError};

pub const DEFAULT_SLOPE_SECTION_THRESHOLD_M: f64 = 50.0;
pub const DEFAULT_ELEVATION_DISTANCE_THRESHOLD_M: f64 = 0.0;

/// Distance thresholds for one analyzer, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Minimum spacing a retained point must have to some later point.
    pub distance_threshold_m: f64,
    /// Accumulated distance after which a slope segment is closed.
    pub slope_section_threshold_m: f64,
    /// Accumulated distance before an elevation change is credited.
    pub elevation_distance_threshold_m: f64,
}

impl AnalyzerConfig {
    pub fn new(distance_threshold_m: f64) -> Self {
        AnalyzerConfig {
            distance_threshold_m,
            slope_section_threshold_m: DEFAULT_SLOPE_SECTION_THRESHOLD_M,
            elevation_distance_threshold_m: DEFAULT_ELEVATION_DISTANCE_THRESHOLD_M,
        }
    }

    pub fn with_slope_section_threshold(mut self, meters: f64) -> Self {
        self.slope_section_threshold_m = meters;
        self
    }

    pub fn with_elevation_distance_threshold(mut self, meters: f64) -> Self {
        self.elevation_distance_threshold_m = meters;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("distance_threshold", self.distance_threshold_m)?;
        require_positive("slope_section_threshold", self.slope_section_threshold_m)?;
        require_non_negative(
            "elevation_distance_threshold",
            self.elevation_distance_threshold_m,
        )
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RouteStatsError::InvalidConfiguration {
            parameter,
            requirement: "a finite value > 0",
            value,
        })
    }
}

pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RouteStatsError::InvalidConfiguration {
            parameter,
            requirement: "a finite value >= 0",
            value,
        })
    }
}
