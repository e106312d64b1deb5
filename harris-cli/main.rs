use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use harris_cli::{CornerPipeline, DetectorBuilder};
use harris_detect::DetectorConfig;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "harris")]
#[command(about = "Detect Harris corners and draw them over the input image")]
struct Cli {
    /// Input image
    input: PathBuf,
    /// Overlay output path
    #[arg(short, long, default_value = "corners.png")]
    output: PathBuf,
    /// Harris sensitivity
    #[arg(long)]
    k: Option<f32>,
    /// Smoothing half-width
    #[arg(long)]
    filter_range: Option<usize>,
    /// Literal Gaussian window instead of the box sum
    #[arg(long)]
    gaussian: bool,
    /// Fraction of the response grid to return, in (0, 1]
    #[arg(long)]
    percentage: Option<f32>,
    /// Suppression radius around each accepted corner
    #[arg(long)]
    radius: Option<usize>,
    /// Detector config (.json or .toml); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the normalized response buffer here
    #[arg(long)]
    response_map: Option<PathBuf>,
    #[arg(long)]
    threads: Option<usize>,
    #[arg(short, long)]
    verbose: bool,
}

const MARKER_RADIUS: i32 = 3;

fn build_config(cli: &Cli) -> Result<DetectorConfig, Box<dyn Error>> {
    let base = match &cli.config {
        Some(path) => CornerPipeline::from_config_file(path)?.config().clone(),
        None => DetectorConfig::default(),
    };

    let mut builder = DetectorBuilder::from_config(base);
    if let Some(k) = cli.k {
        builder = builder.k(k);
    }
    if let Some(range) = cli.filter_range {
        builder = builder.filter_range(range);
    }
    if cli.gaussian {
        builder = builder.gaussian(true);
    }
    if let Some(p) = cli.percentage {
        builder = builder.percentage(p);
    }
    if let Some(r) = cli.radius {
        builder = builder.suppression_radius(r);
    }
    if let Some(n) = cli.threads {
        builder = builder.threads(n);
    }
    Ok(builder.to_config())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let pipeline = CornerPipeline::new(build_config(&cli)?)?;
    info!("{}", pipeline.config().summary());
    pipeline.init_threads()?;

    let img = CornerPipeline::load_image(&cli.input)?;
    let detection = pipeline.detect(&img)?;

    println!("Time taken: {:.2?}", detection.elapsed);
    println!("Detected {} corners", detection.candidates.len());

    CornerPipeline::draw_candidates(&img, &detection.candidates, MARKER_RADIUS).save(&cli.output)?;
    println!("Saved result image as {}", cli.output.display());

    if let Some(path) = &cli.response_map {
        CornerPipeline::response_map(&detection.responses).save(path)?;
        println!("Saved response map as {}", path.display());
    }
    Ok(())
}
