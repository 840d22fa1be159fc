use serde::{Deserialize, Serialize};

use crate::error::{PointField, Result, RouteStatsError, Stage};
use crate::geodesy::haversine_distance;

/// One geodetic sample of a recorded track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
}

impl TrackPoint {
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        TrackPoint {
            longitude,
            latitude,
            elevation,
        }
    }

    pub fn from_geo(point: geo::Point<f64>, elevation: f64) -> Self {
        TrackPoint::new(point.x(), point.y(), elevation)
    }

    pub fn distance_to(&self, other: &TrackPoint) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    fn first_non_finite_field(&self) -> Option<PointField> {
        if !self.longitude.is_finite() {
            Some(PointField::Longitude)
        } else if !self.latitude.is_finite() {
            Some(PointField::Latitude)
        } else if !self.elevation.is_finite() {
            Some(PointField::Elevation)
        } else {
            None
        }
    }
}

impl From<(f64, f64, f64)> for TrackPoint {
    fn from((longitude, latitude, elevation): (f64, f64, f64)) -> Self {
        TrackPoint::new(longitude, latitude, elevation)
    }
}

/// Reject the first point carrying a NaN or infinite coordinate.
pub fn validate_points(points: &[TrackPoint], stage: Stage) -> Result<()> {
    for (index, point) in points.iter().enumerate() {
        if let Some(field) = point.first_non_finite_field() {
            return Err(RouteStatsError::MalformedPoint { stage, index, field });
        }
    }
    Ok(())
}
