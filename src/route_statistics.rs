/// Track Statistics Aggregator
///
/// One left-to-right pass over consecutive point pairs (edges) that computes:
/// - total horizontal distance
/// - elevation gain/loss, credited only after enough distance has built up
///   since the last elevation checkpoint (hysteresis)
/// - a slope histogram of segments bucketed by steepness and direction
/// - the mean elevation of every point
///
/// Zero-length edges still count towards the mean elevation but are otherwise
/// skipped, including their elevation change.

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::error::{Result, RouteStatsError, Stage};
use crate::slope_histogram::{SlopeDirection, SlopeHistogram, SteepnessCategory};
use crate::track_point::{validate_points, TrackPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub ascent_m: f64,
    pub descent_m: f64,
    pub ascent_segments: SlopeHistogram,
    pub descent_segments: SlopeHistogram,
    pub average_elevation_m: i64,
}

impl RouteSummary {
    /// Combined length of every recorded slope segment, in meters.
    pub fn total_segment_length_m(&self) -> f64 {
        self.ascent_segments.total_length_m() + self.descent_segments.total_length_m()
    }
}

pub fn summarize(points: &[TrackPoint], config: &AnalyzerConfig) -> Result<RouteSummary> {
    config.validate()?;
    if points.len() < 2 {
        return Err(RouteStatsError::InsufficientTrack {
            stage: Stage::Aggregation,
            required: 2,
            actual: points.len(),
        });
    }
    validate_points(points, Stage::Aggregation)?;

    let mut total_distance_m = 0.0;
    let mut mean = ElevationMean::default();
    let mut hysteresis =
        ElevationHysteresis::new(points[0].elevation, config.elevation_distance_threshold_m);
    let mut segmenter = SlopeSegmenter::new(config.slope_section_threshold_m);

    for (i, edge) in points.windows(2).enumerate() {
        let (prev, curr) = (&edge[0], &edge[1]);

        if i == 0 {
            mean.add(prev.elevation);
        }
        mean.add(curr.elevation);

        let distance = prev.distance_to(curr);
        if distance == 0.0 {
            continue;
        }

        total_distance_m += distance;
        hysteresis.advance(distance, curr.elevation);
        segmenter.advance(distance, curr.elevation - prev.elevation);
    }

    let (ascent_segments, descent_segments) = segmenter.finish();

    Ok(RouteSummary {
        distance_km: total_distance_m / 1000.0,
        ascent_m: hysteresis.ascent_m,
        descent_m: hysteresis.descent_m,
        ascent_segments,
        descent_segments,
        average_elevation_m: mean.rounded()?,
    })
}

#[derive(Debug, Default)]
struct ElevationMean {
    total: f64,
    count: usize,
}

impl ElevationMean {
    fn add(&mut self, elevation: f64) {
        self.total += elevation;
        self.count += 1;
    }

    /// Half values round up (-2.5 -> -2), not away from zero.
    fn rounded(&self) -> Result<i64> {
        if self.count == 0 {
            return Err(RouteStatsError::InsufficientTrack {
                stage: Stage::Aggregation,
                required: 1,
                actual: 0,
            });
        }
        let mean = self.total / self.count as f64;
        Ok((mean + 0.5).floor() as i64)
    }
}

/// Credits elevation change against the last checkpoint once the distance
/// since that checkpoint reaches the threshold.
#[derive(Debug)]
struct ElevationHysteresis {
    threshold_m: f64,
    accumulated_distance_m: f64,
    checkpoint_elevation_m: f64,
    ascent_m: f64,
    descent_m: f64,
}

impl ElevationHysteresis {
    fn new(start_elevation_m: f64, threshold_m: f64) -> Self {
        ElevationHysteresis {
            threshold_m,
            accumulated_distance_m: 0.0,
            checkpoint_elevation_m: start_elevation_m,
            ascent_m: 0.0,
            descent_m: 0.0,
        }
    }

    fn advance(&mut self, distance_m: f64, elevation_m: f64) {
        self.accumulated_distance_m += distance_m;
        if self.accumulated_distance_m < self.threshold_m {
            return;
        }

        let delta = elevation_m - self.checkpoint_elevation_m;
        if delta > 0.0 {
            self.ascent_m += delta;
        } else if delta < 0.0 {
            self.descent_m += -delta;
        }

        self.accumulated_distance_m = 0.0;
        self.checkpoint_elevation_m = elevation_m;
    }
}

#[derive(Debug, Default)]
struct SlopeSegment {
    accumulated_distance_m: f64,
    accumulated_elevation_change_m: f64,
    label: Option<(SteepnessCategory, SlopeDirection)>,
}

impl SlopeSegment {
    fn labelled(category: SteepnessCategory, direction: SlopeDirection) -> Self {
        SlopeSegment {
            label: Some((category, direction)),
            ..SlopeSegment::default()
        }
    }

    fn grade_percent(&self) -> f64 {
        if self.accumulated_distance_m > 0.0 {
            self.accumulated_elevation_change_m / self.accumulated_distance_m * 100.0
        } else {
            0.0
        }
    }
}

/// Groups edges into segments and files each closed segment under the label
/// it carries at closing time.
///
/// A segment's label follows its cumulative grade while it grows, but the
/// segment is never split on a label change: it may end up filed under a
/// category that does not match every edge it contains. Closing a segment on
/// the threshold seeds the next one with the closing edge's label only; the
/// closing edge's distance stays with the closed segment.
#[derive(Debug)]
struct SlopeSegmenter {
    section_threshold_m: f64,
    current: SlopeSegment,
    ascent: SlopeHistogram,
    descent: SlopeHistogram,
}

impl SlopeSegmenter {
    fn new(section_threshold_m: f64) -> Self {
        SlopeSegmenter {
            section_threshold_m,
            current: SlopeSegment::default(),
            ascent: SlopeHistogram::new(),
            descent: SlopeHistogram::new(),
        }
    }

    fn advance(&mut self, distance_m: f64, elevation_change_m: f64) {
        self.current.accumulated_distance_m += distance_m;
        self.current.accumulated_elevation_change_m += elevation_change_m;

        let category = SteepnessCategory::from_grade(self.current.grade_percent());
        let direction =
            SlopeDirection::from_elevation_change(self.current.accumulated_elevation_change_m);

        let stored = self.current.label;
        match stored {
            None => self.current.label = Some((category, direction)),
            Some(label) if self.current.accumulated_distance_m >= self.section_threshold_m => {
                let length_m = self.current.accumulated_distance_m;
                self.close(label, length_m);
                self.current = SlopeSegment::labelled(category, direction);
            }
            Some(_) => self.current.label = Some((category, direction)),
        }
    }

    fn close(&mut self, (category, direction): (SteepnessCategory, SlopeDirection), length_m: f64) {
        match direction {
            SlopeDirection::Ascent => self.ascent.record(category, length_m),
            SlopeDirection::Descent => self.descent.record(category, length_m),
        }
    }

    /// Flush whatever segment is open, regardless of its length.
    fn finish(mut self) -> (SlopeHistogram, SlopeHistogram) {
        if let Some(label) = self.current.label {
            self.close(label, self.current.accumulated_distance_m);
        }
        (self.ascent, self.descent)
    }
}
