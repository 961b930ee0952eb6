use clap::{Parser, Subcommand};
use scalebar::crop::{CropController, PointerEvent};
use scalebar::detect::{crop_and_save, detect_scale_bar_with_config};
use scalebar::io::image_size;
use scalebar::{Calibration, MatchConfig, MatchResult, ScaleSweep};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Scale-bar detection and ROI cropping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Enable tracing output for the search.
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the scale bar and print the calibration as JSON.
    Detect {
        /// Path to the JSON configuration file.
        #[arg(short, long, value_name = "FILE", default_value = "config.json")]
        config: PathBuf,
        /// Print the JSON schema and exit.
        #[arg(long)]
        print_schema: bool,
        /// Print an example config and exit.
        #[arg(long)]
        print_example: bool,
    },
    /// Save a square crop centered on a point of the image.
    Crop {
        /// Image to crop from.
        #[arg(long)]
        image: PathBuf,
        /// Center x in full-resolution pixels.
        #[arg(long)]
        x: f64,
        /// Center y in full-resolution pixels.
        #[arg(long)]
        y: f64,
        /// Crop half-size as a fraction of the longer image side.
        #[arg(long, default_value_t = 0.05)]
        half_size_factor: f64,
        /// Directory that receives the crop.
        #[arg(long, default_value = "cropped")]
        output_dir: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SearchConfigJson {
    step: f64,
    steps: usize,
    parallel: bool,
}

impl Default for SearchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            step: cfg.sweep.step,
            steps: cfg.sweep.steps,
            parallel: cfg.parallel,
        }
    }
}

impl From<SearchConfigJson> for MatchConfig {
    fn from(value: SearchConfigJson) -> Self {
        MatchConfig {
            sweep: ScaleSweep {
                step: value.step,
                steps: value.steps,
            },
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    template_length: f64,
    visualize: bool,
    output_path: Option<String>,
    search: SearchConfigJson,
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    resize_factor: f64,
    max_val: f32,
    top_left: [usize; 2],
    width: usize,
    height: usize,
}

impl From<MatchResult> for MatchRecord {
    fn from(value: MatchResult) -> Self {
        Self {
            resize_factor: value.resize_factor,
            max_val: value.score,
            top_left: [value.top_left.0, value.top_left.1],
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    units_per_pixel: f64,
    match_info: MatchRecord,
    evaluated: usize,
    skipped: usize,
    overlay_path: Option<String>,
}

impl Output {
    fn new(calibration: Calibration, overlay_path: Option<PathBuf>) -> Self {
        Self {
            units_per_pixel: calibration.units_per_pixel,
            match_info: calibration.best.into(),
            evaluated: calibration.evaluated,
            skipped: calibration.skipped,
            overlay_path: overlay_path.map(|p| p.display().to_string()),
        }
    }
}

fn run_detect(
    config: &Path,
    print_schema: bool,
    print_example: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }

    let detection = detect_scale_bar_with_config(
        &config.image_path,
        &config.template_path,
        config.template_length,
        config.visualize,
        config.search.into(),
    )?;
    tracing::info!(
        units_per_pixel = detection.calibration.units_per_pixel,
        evaluated = detection.calibration.evaluated,
        "scale bar detected"
    );
    let output = Output::new(detection.calibration, detection.overlay_path);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run_crop(
    image: &Path,
    x: f64,
    y: f64,
    half_size_factor: f64,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = image_size(image)?;
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let controller = CropController::new(stem, width, height)
        .with_display_scale(1.0)
        .with_half_size_factor(half_size_factor);

    let (_, saved) = crop_and_save(image, &controller, PointerEvent::Click { x, y }, output_dir)?;
    match saved {
        Some(path) => println!("[Saved] {}", path.display()),
        None => return Err("crop point lies outside the image".into()),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("scalebar=info".parse()?))
            .with_target(false)
            .init();
    }

    match cli.command {
        Command::Detect {
            config,
            print_schema,
            print_example,
        } => run_detect(&config, print_schema, print_example),
        Command::Crop {
            image,
            x,
            y,
            half_size_factor,
            output_dir,
        } => run_crop(&image, x, y, half_size_factor, &output_dir),
    }
}
