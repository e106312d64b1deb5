mod buffer;
mod rgb;

pub use buffer::PixelBuffer;
pub use rgb::{RgbImage, RgbSource};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Corner candidate in original-image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub score: f32,
}

/// How the Gaussian window samples its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GaussianMode {
    /// Every tap reads the same pixel, so each pass only scales it by the
    /// summed weights.
    #[default]
    Literal,
    /// Separable blur where tap `x` reads the pixel at offset `x`.
    SlidingWindow,
}

/// Smoothing applied to each derivative buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Smoothing {
    /// Unnormalized window sum through a summed-area table
    #[default]
    BoxSum,
    /// Unit-sigma Gaussian weights
    Gaussian { mode: GaussianMode },
}

impl Smoothing {
    /// `true` selects the literal Gaussian window, `false` the box sum
    pub fn from_flag(use_gaussian: bool) -> Self {
        if use_gaussian {
            Smoothing::Gaussian {
                mode: GaussianMode::Literal,
            }
        } else {
            Smoothing::BoxSum
        }
    }

    /// `true` for either Gaussian mode
    pub fn is_gaussian(&self) -> bool {
        matches!(self, Smoothing::Gaussian { .. })
    }
}

/// What the third slot of the derivative triple holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrossTerm {
    /// Third slot is a copy of the vertical derivative
    #[default]
    AliasVertical,
    /// Third slot is the elementwise product `Ix * Iy`
    Product,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HarrisConfig {
    /// Harris sensitivity, typically 0.04 to 0.06
    pub k: f32,
    /// Smoothing half-width; each stage trims this many pixels per border
    pub filter_range: usize,
    pub smoothing: Smoothing,
    pub cross_term: CrossTerm,
    pub n_threads: usize,
}

impl Default for HarrisConfig {
    fn default() -> Self {
        Self {
            k: 0.04,
            filter_range: 1,
            smoothing: Smoothing::BoxSum,
            cross_term: CrossTerm::AliasVertical,
            n_threads: num_cpus::get().max(1),
        }
    }
}

impl HarrisConfig {
    /// Configuration matching the `(k, filter_range, use_gaussian)` triple
    pub fn new(k: f32, filter_range: usize, use_gaussian: bool) -> Self {
        Self {
            k,
            filter_range,
            smoothing: Smoothing::from_flag(use_gaussian),
            ..Self::default()
        }
    }

    /// Pixels lost per border between the input image and the response
    /// buffer: one for the derivative kernel plus the smoothing range.
    /// Saturates at `usize::MAX`.
    pub fn border(&self) -> usize {
        self.filter_range.saturating_add(1)
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}
