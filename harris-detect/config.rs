use harris_core::{CrossTerm, GaussianMode, HarrisConfig, Smoothing};
use crate::builder::DetectorBuilder;
use crate::error::{HarrisError, HarrisResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failure while reading or writing a [`DetectorConfig`] file
#[cfg(feature = "serde")]
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config toml: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("config toml: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error(transparent)]
    Invalid(#[from] HarrisError),
}

/// Complete detector configuration: pipeline settings plus the selection
/// parameters used by [`crate::ConfiguredDetector::detect`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Pipeline configuration
    pub core: HarrisConfig,
    /// Fraction of the response grid to return, in (0, 1]
    pub percentage: f32,
    /// Chebyshev half-width suppressed around each accepted candidate
    pub suppression_radius: usize,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub version: Option<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            core: HarrisConfig::default(),
            percentage: 0.01,
            suppression_radius: 3,
            name: None,
            description: None,
            version: None,
        }
    }
}

impl DetectorConfig {
    /// Default selection parameters around the `(k, filter_range, use_gaussian)` triple
    pub fn new(k: f32, filter_range: usize, use_gaussian: bool) -> Self {
        Self {
            core: HarrisConfig::new(k, filter_range, use_gaussian),
            ..Self::default()
        }
    }

    /// Many candidates with light suppression
    pub fn dense_preset() -> Self {
        Self {
            core: HarrisConfig {
                k: 0.04,
                filter_range: 1,
                smoothing: Smoothing::BoxSum,
                ..HarrisConfig::default()
            },
            percentage: 0.05,
            suppression_radius: 1,
            name: Some("Dense".to_string()),
            description: Some("Many closely spaced corners".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Few well-separated candidates
    pub fn sparse_preset() -> Self {
        Self {
            core: HarrisConfig {
                k: 0.06,
                filter_range: 2,
                smoothing: Smoothing::BoxSum,
                ..HarrisConfig::default()
            },
            percentage: 0.005,
            suppression_radius: 8,
            name: Some("Sparse".to_string()),
            description: Some("Strongest corners with wide suppression".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Separable Gaussian smoothing with the product cross term
    pub fn smooth_preset() -> Self {
        Self {
            core: HarrisConfig {
                k: 0.05,
                filter_range: 2,
                smoothing: Smoothing::Gaussian {
                    mode: GaussianMode::SlidingWindow,
                },
                cross_term: CrossTerm::Product,
                ..HarrisConfig::default()
            },
            percentage: 0.01,
            suppression_radius: 4,
            name: Some("Smooth".to_string()),
            description: Some("Gaussian-weighted gradients for noisy input".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self.version = Some("1.0".to_string());
        self
    }

    /// Convert to DetectorBuilder for further customization
    pub fn to_builder(self) -> DetectorBuilder {
        DetectorBuilder::from_config(self)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: k={}, filter_range={}, smoothing={:?}, cross_term={:?}, threads={}, percentage={}, radius={}",
            self.core.k,
            self.core.filter_range,
            self.core.smoothing,
            self.core.cross_term,
            self.core.n_threads,
            self.percentage,
            self.suppression_radius
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> HarrisResult<()> {
        if !self.core.k.is_finite() {
            return Err(HarrisError::InvalidSensitivity(self.core.k));
        }
        if !(self.percentage > 0.0 && self.percentage <= 1.0) {
            return Err(HarrisError::InvalidPercentage(self.percentage));
        }
        if self.core.n_threads == 0 {
            return Err(HarrisError::InvalidConfig("n_threads must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string and validate
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from TOML string and validate
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
