use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use harris_core::{Candidate, PixelBuffer, init_thread_pool};
use harris_detect::{ConfigError, DetectorConfig, HarrisError};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;
use log::{debug, info};

pub use harris_detect::{self, DetectorBuilder, HarrisDetector};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Harris error: {0}")]
    Harris(#[from] HarrisError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unsupported config format: {} (expected .json or .toml)", .0.display())]
    UnsupportedConfig(PathBuf),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Candidates and responses for one image
#[derive(Debug, Clone)]
pub struct Detection {
    pub candidates: Vec<Candidate>,
    pub responses: PixelBuffer,
    pub elapsed: Duration,
}

/// Load, detect and render in one place
#[derive(Debug, Clone)]
pub struct CornerPipeline {
    config: DetectorConfig,
}

impl CornerPipeline {
    /// Validate `config` and wrap it
    pub fn new(config: DetectorConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Read a `.json` or `.toml` detector configuration
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DetectorConfig::load_json(path)?,
            Some("toml") => DetectorConfig::load_toml(path)?,
            _ => return Err(PipelineError::UnsupportedConfig(path.to_path_buf())),
        };
        Self::new(config)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Size the global rayon pool; only the first call in a process succeeds
    pub fn init_threads(&self) -> PipelineResult<()> {
        init_thread_pool(self.config.core.n_threads)?;
        Ok(())
    }

    /// Decode any format `image` supports and convert to 8-bit RGB
    pub fn load_image<P: AsRef<Path>>(path: P) -> PipelineResult<RgbImage> {
        let img = image::open(path.as_ref())?.to_rgb8();
        debug!(
            "loaded {} ({}x{})",
            path.as_ref().display(),
            img.width(),
            img.height()
        );
        Ok(img)
    }

    /// Run the pipeline and selection on `img`, timing both
    pub fn detect(&self, img: &RgbImage) -> PipelineResult<Detection> {
        let t0 = Instant::now();
        let configured = DetectorBuilder::from_config(self.config.clone()).build(img)?;
        let candidates = configured.detect()?;
        let elapsed = t0.elapsed();
        info!("detected {} corners in {:.2?}", candidates.len(), elapsed);

        Ok(Detection {
            candidates,
            responses: configured.responses().clone(),
            elapsed,
        })
    }

    /// Copy of `img` with a hollow circle around each candidate
    pub fn draw_candidates(img: &RgbImage, candidates: &[Candidate], radius: i32) -> RgbImage {
        let mut output = img.clone();
        for cand in candidates {
            draw_hollow_circle_mut(
                &mut output,
                (cand.col as i32, cand.row as i32),
                radius,
                Rgb([255, 0, 0]),
            );
        }
        output
    }

    /// Responses scaled linearly onto 0..=255
    pub fn response_map(responses: &PixelBuffer) -> GrayImage {
        let (lo, hi) = responses.min_max().unwrap_or((0.0, 0.0));
        let span = hi - lo;
        GrayImage::from_fn(responses.cols() as u32, responses.rows() as u32, |x, y| {
            let v = responses.get(y as usize, x as usize);
            if span > 0.0 {
                Luma([((v - lo) / span * 255.0).round() as u8])
            } else {
                Luma([0])
            }
        })
    }
}
