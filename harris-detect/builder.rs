use harris_core::{CrossTerm, GaussianMode, HarrisConfig, RgbSource, Smoothing};
use crate::config::DetectorConfig;
use crate::configured_detector::ConfiguredDetector;
use crate::detector::HarrisDetector;
use crate::error::HarrisResult;

/// Builder for creating a `ConfiguredDetector`
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    config: HarrisConfig,
    percentage: f32,
    suppression_radius: usize,
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::from_config(DetectorConfig::default())
    }

    /// Set the Harris sensitivity
    pub fn k(mut self, k: f32) -> Self {
        self.config.k = k;
        self
    }

    /// Set the smoothing half-width
    pub fn filter_range(mut self, filter_range: usize) -> Self {
        self.config.filter_range = filter_range;
        self
    }

    /// Literal Gaussian window when `true`, box sum otherwise
    pub fn gaussian(mut self, enable: bool) -> Self {
        self.config.smoothing = Smoothing::from_flag(enable);
        self
    }

    /// Set the smoothing strategy, including the Gaussian mode
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.config.smoothing = smoothing;
        self
    }

    /// Set what the third derivative slot holds
    pub fn cross_term(mut self, cross_term: CrossTerm) -> Self {
        self.config.cross_term = cross_term;
        self
    }

    /// Set the number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    /// Fraction of the response grid to select
    pub fn percentage(mut self, percentage: f32) -> Self {
        self.percentage = percentage;
        self
    }

    /// Set the Chebyshev radius suppressed around each accepted corner
    pub fn suppression_radius(mut self, radius: usize) -> Self {
        self.suppression_radius = radius;
        self
    }

    /// Apply the dense preset, keeping the thread count
    pub fn preset_dense(self) -> Self {
        self.apply_preset(DetectorConfig::dense_preset())
    }

    /// Apply the sparse preset, keeping the thread count
    pub fn preset_sparse(self) -> Self {
        self.apply_preset(DetectorConfig::sparse_preset())
    }

    /// Apply the smooth preset, keeping the thread count
    pub fn preset_smooth(self) -> Self {
        self.apply_preset(DetectorConfig::smooth_preset())
    }

    fn apply_preset(self, preset: DetectorConfig) -> Self {
        let n_threads = self.config.n_threads;
        Self::from_config(preset).threads(n_threads)
    }

    /// Validate the settings and run the pipeline on `image`
    pub fn build<S: RgbSource + ?Sized>(self, image: &S) -> HarrisResult<ConfiguredDetector> {
        let config = self.to_config();
        config.validate()?;
        let detector = HarrisDetector::with_config(image, &config.core)?;
        Ok(ConfiguredDetector { detector, config })
    }

    /// Generate summary of current configuration
    pub fn summary(&self) -> String {
        format!(
            "DetectorBuilder: k={}, filter_range={}, smoothing={:?}, cross_term={:?}, threads={}, percentage={}, radius={}",
            self.config.k,
            self.config.filter_range,
            self.config.smoothing,
            self.config.cross_term,
            self.config.n_threads,
            self.percentage,
            self.suppression_radius
        )
    }

    /// Create builder from existing configuration
    pub fn from_config(config: DetectorConfig) -> Self {
        Self {
            config: config.core,
            percentage: config.percentage,
            suppression_radius: config.suppression_radius,
        }
    }

    /// Convert to DetectorConfig without metadata
    pub fn to_config(&self) -> DetectorConfig {
        DetectorConfig {
            core: self.config.clone(),
            percentage: self.percentage,
            suppression_radius: self.suppression_radius,
            ..DetectorConfig::default()
        }
    }

    /// Whether a Gaussian window is selected
    pub fn is_gaussian(&self) -> bool {
        self.config.smoothing.is_gaussian()
    }

    /// Gaussian mode, `None` for the box sum
    pub fn gaussian_mode(&self) -> Option<GaussianMode> {
        match self.config.smoothing {
            Smoothing::Gaussian { mode } => Some(mode),
            Smoothing::BoxSum => None,
        }
    }
}
