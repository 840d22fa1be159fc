use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Percent-grade band a slope segment is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteepnessCategory {
    Gentle,
    Moderate,
    Steady,
    Steep,
    VerySteep,
    Severe,
    Extreme,
}

impl SteepnessCategory {
    pub const ALL: [SteepnessCategory; 7] = [
        SteepnessCategory::Gentle,
        SteepnessCategory::Moderate,
        SteepnessCategory::Steady,
        SteepnessCategory::Steep,
        SteepnessCategory::VerySteep,
        SteepnessCategory::Severe,
        SteepnessCategory::Extreme,
    ];

    /// Upper bounds are inclusive: 5.0% is still `0-5`, anything above 30% is `30+`.
    pub fn from_grade(grade_percent: f64) -> Self {
        let grade = grade_percent.abs();
        if grade <= 5.0 {
            SteepnessCategory::Gentle
        } else if grade <= 10.0 {
            SteepnessCategory::Moderate
        } else if grade <= 15.0 {
            SteepnessCategory::Steady
        } else if grade <= 20.0 {
            SteepnessCategory::Steep
        } else if grade <= 25.0 {
            SteepnessCategory::VerySteep
        } else if grade <= 30.0 {
            SteepnessCategory::Severe
        } else {
            SteepnessCategory::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SteepnessCategory::Gentle => "0-5",
            SteepnessCategory::Moderate => "5-10",
            SteepnessCategory::Steady => "10-15",
            SteepnessCategory::Steep => "15-20",
            SteepnessCategory::VerySteep => "20-25",
            SteepnessCategory::Severe => "25-30",
            SteepnessCategory::Extreme => "30+",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeDirection {
    Ascent,
    Descent,
}

impl SlopeDirection {
    /// Flat counts as ascent.
    pub fn from_elevation_change(elevation_change_m: f64) -> Self {
        if elevation_change_m >= 0.0 {
            SlopeDirection::Ascent
        } else {
            SlopeDirection::Descent
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SegmentBucket {
    pub count: u32,
    pub total_length_m: f64,
}

/// Segment counts and lengths for one direction, one bucket per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlopeHistogram {
    buckets: [SegmentBucket; 7],
}

impl SlopeHistogram {
    pub fn new() -> Self {
        SlopeHistogram::default()
    }

    pub fn record(&mut self, category: SteepnessCategory, length_m: f64) {
        let bucket = &mut self.buckets[category.index()];
        bucket.count += 1;
        bucket.total_length_m += length_m;
    }

    pub fn bucket(&self, category: SteepnessCategory) -> &SegmentBucket {
        &self.buckets[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SteepnessCategory, &SegmentBucket)> + '_ {
        SteepnessCategory::ALL.iter().map(move |&c| (c, &self.buckets[c.index()]))
    }

    pub fn total_length_m(&self) -> f64 {
        self.buckets.iter().map(|b| b.total_length_m).sum()
    }

    pub fn total_count(&self) -> u32 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

// Keyed by label so JSON output reads {"0-5": {...}, "5-10": {...}, ...}.
impl Serialize for SlopeHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (category, bucket) in self.iter() {
            map.serialize_entry(category.label(), bucket)?;
        }
        map.end()
    }
}
