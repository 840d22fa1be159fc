/// GPX ingestion: turns a GPX document into the flat point sequence the
/// analyzer works on.
///
/// Only the first track is used; its segments are concatenated in order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use gpx::read;
use log::warn;
use walkdir::WalkDir;

use crate::error::{PointField, Result, RouteStatsError, Stage};
use crate::track_point::TrackPoint;

pub fn read_track_points(path: &Path) -> Result<Vec<TrackPoint>> {
    let file = File::open(path)?;
    parse_track_points(BufReader::new(file), &path.display().to_string())
}

/// `source` only labels warnings and errors.
pub fn parse_track_points<R: Read>(reader: R, source: &str) -> Result<Vec<TrackPoint>> {
    let gpx = read(reader).map_err(|e| RouteStatsError::GpxParse(e.to_string()))?;

    if gpx.tracks.len() > 1 {
        warn!(
            "{} contains {} tracks, only the first one is analyzed",
            source,
            gpx.tracks.len()
        );
    }

    let track = gpx
        .tracks
        .into_iter()
        .next()
        .ok_or_else(|| RouteStatsError::NoTrack(source.to_string()))?;

    let mut points = Vec::new();
    for segment in track.segments {
        for waypoint in segment.points {
            let elevation = waypoint.elevation.ok_or(RouteStatsError::MalformedPoint {
                stage: Stage::Ingest,
                index: points.len(),
                field: PointField::Elevation,
            })?;
            points.push(TrackPoint::from_geo(waypoint.point(), elevation));
        }
    }

    if points.is_empty() {
        return Err(RouteStatsError::NoTrack(source.to_string()));
    }

    Ok(points)
}

/// Every `.gpx` file under `root` (any case), sorted by path. A file path is
/// returned as-is.
pub fn find_gpx_files(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_gpx = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("gpx"))
            .unwrap_or(false);
        if is_gpx {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
