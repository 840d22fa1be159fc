/// Forward greedy point thinning.
///
/// Starting from an anchor, scan forward for the first later point that is at
/// least `distance_threshold_m` away. If one exists the anchor is kept and the
/// scan jumps to that point, leaving everything in between untouched. If none
/// exists the anchor is dropped and the next point becomes the anchor. The last
/// point of a track never has a later point, so it is always dropped, together
/// with any trailing run of points that are all within the threshold of
/// everything after them.

use log::debug;

use crate::config::require_positive;
use crate::error::{Result, RouteStatsError, Stage};
use crate::track_point::{validate_points, TrackPoint};

/// Indices of the points that survive thinning, in input order.
pub fn thin_indices(points: &[TrackPoint], distance_threshold_m: f64) -> Result<Vec<usize>> {
    require_positive("distance_threshold", distance_threshold_m)?;
    if points.is_empty() {
        return Err(RouteStatsError::InsufficientTrack {
            stage: Stage::Thinning,
            required: 1,
            actual: 0,
        });
    }
    validate_points(points, Stage::Thinning)?;

    // Drops only happen at the cursor and the cursor never moves back, so
    // everything after the cursor is still present in the shrinking sequence.
    let mut dropped = vec![false; points.len()];
    let mut cursor = 0;

    while cursor < points.len() {
        let anchor = &points[cursor];
        let next_anchor = (cursor + 1..points.len())
            .find(|&j| anchor.distance_to(&points[j]) >= distance_threshold_m);

        match next_anchor {
            Some(j) => cursor = j,
            None => {
                dropped[cursor] = true;
                cursor += 1;
            }
        }
    }

    let retained: Vec<usize> = (0..points.len()).filter(|&i| !dropped[i]).collect();

    debug!(
        "thinned {} points to {} at {:.1}m spacing",
        points.len(),
        retained.len(),
        distance_threshold_m
    );

    Ok(retained)
}

pub fn thin_points(points: &[TrackPoint], distance_threshold_m: f64) -> Result<Vec<TrackPoint>> {
    let retained = thin_indices(points, distance_threshold_m)?;
    Ok(retained.into_iter().map(|i| points[i]).collect())
}
