use std::path::Path;

use chrono::{DateTime, Utc};
use csv::Writer;
use serde::Serialize;

use crate::analyzer::RouteAnalysis;
use crate::route_statistics::RouteSummary;
use crate::slope_histogram::{SlopeHistogram, SteepnessCategory};

/// One analyzed file, as written to the batch CSV.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub raw_points: usize,
    pub thinned_points: usize,
    pub summary: RouteSummary,
}

impl FileReport {
    pub fn new(filename: impl Into<String>, analysis: RouteAnalysis) -> Self {
        FileReport {
            filename: filename.into(),
            raw_points: analysis.raw_points,
            thinned_points: analysis.thinned_points,
            summary: analysis.summary,
        }
    }
}

fn csv_header() -> Vec<String> {
    let mut header = vec![
        "Filename".to_string(),
        "Analyzed At".to_string(),
        "Raw Points".to_string(),
        "Thinned Points".to_string(),
        "Distance (km)".to_string(),
        "Ascent (m)".to_string(),
        "Descent (m)".to_string(),
        "Average Elevation (m)".to_string(),
    ];

    for direction in ["Ascent", "Descent"] {
        for category in SteepnessCategory::ALL {
            header.push(format!("{} {}% Count", direction, category.label()));
            header.push(format!("{} {}% Length (m)", direction, category.label()));
        }
    }

    header
}

fn histogram_columns(histogram: &SlopeHistogram, row: &mut Vec<String>) {
    for (_, bucket) in histogram.iter() {
        row.push(bucket.count.to_string());
        row.push(format!("{:.1}", bucket.total_length_m));
    }
}

fn csv_row(report: &FileReport, analyzed_at: &DateTime<Utc>) -> Vec<String> {
    let summary = &report.summary;
    let mut row = vec![
        report.filename.clone(),
        analyzed_at.to_rfc3339(),
        report.raw_points.to_string(),
        report.thinned_points.to_string(),
        format!("{:.3}", summary.distance_km),
        format!("{:.1}", summary.ascent_m),
        format!("{:.1}", summary.descent_m),
        summary.average_elevation_m.to_string(),
    ];
    histogram_columns(&summary.ascent_segments, &mut row);
    histogram_columns(&summary.descent_segments, &mut row);
    row
}

pub fn write_csv_report(reports: &[FileReport], output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = Writer::from_path(output_path)?;
    let analyzed_at = Utc::now();

    wtr.write_record(&csv_header())?;
    for report in reports {
        wtr.write_record(&csv_row(report, &analyzed_at))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_json(reports: &[FileReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

fn print_histogram(title: &str, histogram: &SlopeHistogram) {
    if histogram.is_empty() {
        println!("  {}: none", title);
        return;
    }
    println!("  {}:", title);
    for (category, bucket) in histogram.iter().filter(|(_, b)| b.count > 0) {
        println!(
            "    {:>6}%  {:>4} segments  {:>9.1}m",
            category.label(),
            bucket.count,
            bucket.total_length_m
        );
    }
}

pub fn print_summary(filename: &str, analysis: &RouteAnalysis) {
    let summary = &analysis.summary;
    println!("\n📍 {}", filename);
    println!(
        "  Points: {} → {} after thinning",
        analysis.raw_points, analysis.thinned_points
    );
    println!("  📏 Distance: {:.2}km", summary.distance_km);
    println!(
        "  ⛰️  Ascent: {:.0}m, Descent: {:.0}m",
        summary.ascent_m, summary.descent_m
    );
    println!("  📊 Average elevation: {}m", summary.average_elevation_m);
    print_histogram("Climbs by grade", &summary.ascent_segments);
    print_histogram("Descents by grade", &summary.descent_segments);
}
