//! Soundscape CLI - satellite measurements to landscape image and audio clip.
//!
//! Generate a procedurally drawn landscape (PNG) and a synthesized soundscape
//! (WAV) for a location and month.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Datelike, Local, NaiveDate};

use soundscape::audio::Style;
use soundscape::landscape::LandscapeConfig;
use soundscape::measure::MeasurementTriplet;
use soundscape::pipeline::{GenerationRequest, Soundscape, DEFAULT_LOOKBACK_MONTHS};
use soundscape::retrieval::{
    parse_month, DateWindow, FixedSource, GeoPoint, JsonFileSource, MeasurementSource, Unavailable,
};
use soundscape::SoundscapeConfig;

/// Landscape image and soundscape generator driven by monthly satellite measurements.
#[derive(Parser)]
#[command(name = "soundscape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an image and audio clip for one location.
    Generate {
        /// Latitude in degrees (-90 to 90).
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees (-180 to 180).
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[command(flatten)]
        shared: SharedArgs,

        /// Vegetation index (requires --lst and --precip).
        #[arg(long, allow_hyphen_values = true)]
        ndvi: Option<f64>,

        /// Land-surface temperature in °C (requires --ndvi and --precip).
        #[arg(long, allow_hyphen_values = true)]
        lst: Option<f64>,

        /// Monthly precipitation in mm (requires --ndvi and --lst).
        #[arg(long, allow_hyphen_values = true)]
        precip: Option<f64>,

        /// JSON file with {"ndvi", "lst", "precip"} measurements.
        #[arg(long, conflicts_with_all = ["ndvi", "lst", "precip"])]
        measurements: Option<PathBuf>,

        /// Base name for output files.
        #[arg(short, long, default_value = "soundscape")]
        name: String,
    },

    /// Generate artifacts for several locations in parallel (coordinate fallback data).
    Batch {
        /// Location as LAT,LON. Repeat for each location.
        #[arg(long = "location", required = true, allow_hyphen_values = true)]
        locations: Vec<String>,

        #[command(flatten)]
        shared: SharedArgs,

        /// Base name for output files; an index is appended.
        #[arg(short, long, default_value = "soundscape")]
        name: String,
    },

    /// Print the measurement window used for a target month.
    Window {
        /// Target month (YYYY-MM). Defaults to the current month.
        #[arg(short, long)]
        month: Option<String>,

        /// Months to step back from the target month.
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_MONTHS, value_parser = clap::value_parser!(u32).range(1..=2))]
        lookback: u32,
    },

    /// Display the effective generator configuration.
    Info {
        /// JSON config file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Canvas preset.
        #[arg(long, default_value = "portrait")]
        preset: CanvasPreset,
    },
}

#[derive(clap::Args)]
struct SharedArgs {
    /// Target month (YYYY-MM). Defaults to the current month.
    #[arg(short, long)]
    month: Option<String>,

    /// Months to step back from the target month for measurements.
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_MONTHS, value_parser = clap::value_parser!(u32).range(1..=2))]
    lookback: u32,

    /// Music style preset.
    #[arg(short, long)]
    style: Option<Style>,

    /// JSON config file (fields not given take defaults).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas preset; ignored when --config is given.
    #[arg(long, default_value = "portrait")]
    preset: CanvasPreset,

    /// Clip length in seconds (1-600).
    #[arg(short, long)]
    duration: Option<u32>,

    /// Draw the landscape without buildings.
    #[arg(long)]
    no_buildings: bool,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum CanvasPreset {
    /// 720x1280, 140 stars.
    Portrait,
    /// 320x320, 60 stars.
    Compact,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            lat,
            lon,
            shared,
            ndvi,
            lst,
            precip,
            measurements,
            name,
        } => {
            run_generate(lat, lon, shared, ndvi, lst, precip, measurements, name);
        }
        Commands::Batch {
            locations,
            shared,
            name,
        } => {
            run_batch(locations, shared, name);
        }
        Commands::Window { month, lookback } => {
            run_window(month, lookback);
        }
        Commands::Info { config, preset } => {
            run_info(config, preset);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    lat: f64,
    lon: f64,
    shared: SharedArgs,
    ndvi: Option<f64>,
    lst: Option<f64>,
    precip: Option<f64>,
    measurements: Option<PathBuf>,
    name: String,
) {
    let point = GeoPoint::new(lat, lon).unwrap_or_else(|e| exit_with(&e));
    let config = build_config(&shared);
    let request = build_request(point, &shared);

    let source: Box<dyn MeasurementSource> = match (ndvi, lst, precip, measurements) {
        (Some(ndvi), Some(lst), Some(precip), _) => {
            Box::new(FixedSource(MeasurementTriplet::new(ndvi, lst, precip)))
        }
        (None, None, None, Some(path)) => Box::new(JsonFileSource::new(path)),
        (None, None, None, None) => Box::new(Unavailable),
        _ => exit_with(&"--ndvi, --lst and --precip must be given together"),
    };

    println!("Soundscape - Landscape & Audio Generator");
    println!("========================================");
    println!("Location: ({:.4}, {:.4})", point.lat, point.lon);
    println!("Target month: {}", request.target_month.format("%Y-%m"));
    println!("Style: {}", request.style.map_or("none", |s| s.name()));
    println!("Output: {}", shared.output.display());

    let start = Instant::now();
    let generator = Soundscape::new(config);
    let artifacts = generator
        .generate(source.as_ref(), &request)
        .unwrap_or_else(|e| exit_with(&e));

    let summary = artifacts.summary(generator.config());
    println!("\nMeasurements ({}):", summary.provenance.label());
    println!("  Window: {}", summary.window);
    println!("  NDVI:   {:.4}", summary.ndvi);
    println!("  LST:    {:.2} °C", summary.lst_celsius);
    println!("  Precip: {:.2} mm", summary.precip_mm);
    println!("  Tempo:  {:.0} bpm", summary.tempo_bpm);
    println!("Generation completed in {:.2?}", start.elapsed());

    println!("\nExporting...");
    let paths = artifacts
        .write_to_dir(&shared.output, &name, generator.config())
        .unwrap_or_else(|e| exit_with(&e));
    println!("  Image:   {}", paths.image.display());
    println!("  Audio:   {}", paths.audio.display());
    println!("  Summary: {}", paths.summary.display());

    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

fn run_batch(locations: Vec<String>, shared: SharedArgs, name: String) {
    let points: Vec<GeoPoint> = locations
        .iter()
        .map(|text| parse_location(text).unwrap_or_else(|e| exit_with(&e)))
        .collect();
    let config = build_config(&shared);
    let requests: Vec<GenerationRequest> = points
        .iter()
        .map(|&point| build_request(point, &shared))
        .collect();

    println!("Soundscape - Batch Generation");
    println!("=============================");
    println!("Locations: {}", requests.len());
    println!("Output: {}", shared.output.display());

    let start = Instant::now();
    let generator = Soundscape::new(config);
    let results = generator.generate_batch(&Unavailable, &requests);
    println!("Generation completed in {:.2?}", start.elapsed());

    let mut failures = 0;
    for (i, result) in results.into_iter().enumerate() {
        let file_name = format!("{}_{:02}", name, i + 1);
        let written = result
            .map_err(|e| e.to_string())
            .and_then(|a| {
                a.write_to_dir(&shared.output, &file_name, generator.config())
                    .map_err(|e| e.to_string())
            });
        match written {
            Ok(paths) => println!("  [{}/{}] {}", i + 1, requests.len(), paths.image.display()),
            Err(e) => {
                failures += 1;
                eprintln!("  [{}/{}] Error: {}", i + 1, requests.len(), e);
            }
        }
    }

    println!("\nTotal time: {:.2?}", start.elapsed());
    if failures > 0 {
        eprintln!("{} of {} locations failed", failures, requests.len());
        std::process::exit(1);
    }
    println!("Done!");
}

fn run_window(month: Option<String>, lookback: u32) {
    let target = resolve_month(month.as_deref());
    let window = DateWindow::months_before(target, lookback).unwrap_or_else(|e| exit_with(&e));
    println!("Target month: {}", target.format("%Y-%m"));
    println!("Lookback:     {} month(s)", lookback);
    println!("Window:       {} ({} days)", window, window.days());
}

fn run_info(config: Option<PathBuf>, preset: CanvasPreset) {
    let config = match config {
        Some(path) => load_config_file(&path),
        None => SoundscapeConfig {
            landscape: landscape_preset(preset),
            ..Default::default()
        },
    };
    let l = &config.landscape;
    let a = &config.audio;
    let pcm_bytes = a.sample_count() as u64 * 2;

    println!("Soundscape - Generator Configuration");
    println!("====================================");
    println!();
    println!("Landscape:");
    println!("  Canvas:      {}x{}", l.width, l.height);
    println!("  Stars:       {}", l.star_count);
    println!("  Ground line: {:.2} of height", l.ground_line);
    println!("  Buildings:   {}", if l.buildings { "yes" } else { "no" });
    println!("  Glow above:  lst_n > {:.2}", l.glow_threshold);
    println!();
    println!("Audio:");
    println!("  Sample rate: {} Hz, mono, 16-bit", a.sample_rate);
    println!("  Duration:    {} s", a.duration_secs);
    println!("  PCM size:    {} bytes ({:.2} MB)", pcm_bytes, pcm_bytes as f64 / 1024.0 / 1024.0);
    println!();
    println!("Styles:");
    for style in Style::all() {
        let p = style.preset();
        println!(
            "  {:<10} base {:>3.0} bpm, tonal x{:.2}, synth x{:.2}, drive {:.2}",
            style.name(),
            p.base_tempo_bpm,
            p.tonal_gain,
            p.synth_gain,
            p.distortion
        );
    }
}

fn build_config(shared: &SharedArgs) -> SoundscapeConfig {
    let mut config = match &shared.config {
        Some(path) => load_config_file(path),
        None => SoundscapeConfig {
            landscape: landscape_preset(shared.preset),
            ..Default::default()
        },
    };
    if let Some(duration) = shared.duration {
        config.audio.duration_secs = duration;
    }
    if shared.no_buildings {
        config.landscape.buildings = false;
    }
    config.validate().unwrap_or_else(|e| exit_with(&e));
    config
}

fn build_request(point: GeoPoint, shared: &SharedArgs) -> GenerationRequest {
    let mut request = GenerationRequest::new(point, resolve_month(shared.month.as_deref()))
        .with_lookback(shared.lookback);
    request.style = shared.style;
    request
}

fn load_config_file(path: &Path) -> SoundscapeConfig {
    SoundscapeConfig::from_json_file(path).unwrap_or_else(|e| {
        eprintln!("Error loading config {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

fn landscape_preset(preset: CanvasPreset) -> LandscapeConfig {
    match preset {
        CanvasPreset::Portrait => LandscapeConfig::portrait(),
        CanvasPreset::Compact => LandscapeConfig::compact(),
    }
}

fn resolve_month(month: Option<&str>) -> NaiveDate {
    match month {
        Some(text) => parse_month(text).unwrap_or_else(|e| exit_with(&e)),
        None => {
            let today = Local::now().date_naive();
            today.with_day(1).unwrap_or(today)
        }
    }
}

fn parse_location(text: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| format!("Invalid location '{}': expected LAT,LON", text))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("Invalid latitude in '{}'", text))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("Invalid longitude in '{}'", text))?;
    GeoPoint::new(lat, lon).map_err(|e| e.to_string())
}

fn exit_with(err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
