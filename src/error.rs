use std::fmt;

use thiserror::Error;

/// Pipeline stage a failure was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Thinning,
    Aggregation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ingest => "ingest",
            Stage::Thinning => "point thinning",
            Stage::Aggregation => "track statistics",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointField {
    Longitude,
    Latitude,
    Elevation,
}

impl fmt::Display for PointField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PointField::Longitude => "longitude",
            PointField::Latitude => "latitude",
            PointField::Elevation => "elevation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RouteStatsError {
    #[error("invalid configuration: {parameter} must be {requirement}, got {value}")]
    InvalidConfiguration {
        parameter: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("{stage} needs at least {required} points, got {actual}")]
    InsufficientTrack {
        stage: Stage,
        required: usize,
        actual: usize,
    },
    #[error("{stage}: point {index} has no finite {field}")]
    MalformedPoint {
        stage: Stage,
        index: usize,
        field: PointField,
    },
    #[error("failed to read track file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse GPX file: {0}")]
    GpxParse(String),
    #[error("no track found in {0}")]
    NoTrack(String),
}

pub type Result<T> = std::result::Result<T, RouteStatsError>;
