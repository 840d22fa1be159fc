use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use gpx_route_stats::config::{DEFAULT_ELEVATION_DISTANCE_THRESHOLD_M, DEFAULT_SLOPE_SECTION_THRESHOLD_M};
use gpx_route_stats::gpx_reader::{find_gpx_files, read_track_points};
use gpx_route_stats::report::{print_summary, to_json, write_csv_report, FileReport};
use gpx_route_stats::{AnalyzerConfig, RouteAnalysis, RouteAnalyzer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Distance, climbing and slope statistics for GPX tracks", long_about = None)]
struct Cli {
    /// GPX files or folders to scan for GPX files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Minimum spacing between retained points, in meters
    #[arg(long)]
    distance_threshold: f64,

    /// Distance after which a slope segment is closed, in meters
    #[arg(long, default_value_t = DEFAULT_SLOPE_SECTION_THRESHOLD_M)]
    slope_section_threshold: f64,

    /// Distance to accumulate before counting elevation change, in meters
    #[arg(long, default_value_t = DEFAULT_ELEVATION_DISTANCE_THRESHOLD_M)]
    elevation_distance_threshold: f64,

    /// Write one CSV row per analyzed file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the summaries as JSON instead of the console report
    #[arg(long)]
    json: bool,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn analyze_file(analyzer: &RouteAnalyzer, path: &Path) -> Result<RouteAnalysis, Box<dyn std::error::Error + Send + Sync>> {
    let points = read_track_points(path)?;
    Ok(analyzer.analyze_detailed(&points)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let analyzer = RouteAnalyzer::new(
        AnalyzerConfig::new(cli.distance_threshold)
            .with_slope_section_threshold(cli.slope_section_threshold)
            .with_elevation_distance_threshold(cli.elevation_distance_threshold),
    )?;

    let mut files = Vec::new();
    for input in &cli.inputs {
        files.extend(find_gpx_files(input)?);
    }
    if files.is_empty() {
        return Err("No GPX files found in the given inputs".into());
    }

    info!(
        "Analyzing {} GPX files on {} cores (spacing {:.1}m, segments {:.1}m, elevation {:.1}m)",
        files.len(),
        num_cpus::get(),
        analyzer.config().distance_threshold_m,
        analyzer.config().slope_section_threshold_m,
        analyzer.config().elevation_distance_threshold_m
    );

    let results: Vec<(PathBuf, _)> = files
        .par_iter()
        .map(|path| (path.clone(), analyze_file(&analyzer, path)))
        .collect();

    let mut reports = Vec::new();
    for (path, result) in results {
        match result {
            Ok(analysis) => {
                let filename = display_name(&path);
                if !cli.json {
                    print_summary(&filename, &analysis);
                }
                reports.push(FileReport::new(filename, analysis));
            }
            Err(e) => warn!("⚠️  Error processing {}: {}", path.display(), e),
        }
    }

    info!("✅ Analyzed {} out of {} GPX files", reports.len(), files.len());

    if cli.json {
        println!("{}", to_json(&reports)?);
    }

    if let Some(csv_path) = &cli.csv {
        write_csv_report(&reports, csv_path)?;
        info!("📁 Results saved to: {}", csv_path.display());
    }

    if reports.is_empty() {
        return Err("No track could be analyzed".into());
    }

    Ok(())
}
