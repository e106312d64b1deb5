//! Harris corner detection over RGB images.
//!
//! The pipeline runs once per image: grayscale conversion, Sobel-equivalent
//! derivatives, windowed smoothing, and per-pixel Harris scoring. The
//! resulting response buffer is cached in a [`HarrisDetector`], and
//! [`HarrisDetector::get_maxima_points`] selects corners from it with greedy
//! non-maximum suppression.

pub mod builder;
pub mod config;
pub mod configured_detector;
pub mod derivatives;
pub mod detector;
pub mod error;
pub mod grayscale;
pub mod maxima;
pub mod response;
pub mod smoothing;
pub mod types;

pub use builder::DetectorBuilder;
#[cfg(feature = "serde")]
pub use config::ConfigError;
pub use config::DetectorConfig;
pub use configured_detector::ConfiguredDetector;
pub use derivatives::compute_derivatives;
pub use detector::HarrisDetector;
pub use error::{HarrisError, HarrisResult};
pub use grayscale::convert_rgb_to_grayscale;
pub use maxima::select_maxima;
pub use response::compute_harris_responses;
pub use smoothing::{
    apply_smoothing, box_sum_filter, gauss_filter, gauss_filter_sliding, integral_image,
};
pub use types::DerivativeTriple;

pub use harris_core::{
    init_thread_pool, Candidate, CrossTerm, GaussianMode, HarrisConfig, PixelBuffer, RgbImage,
    RgbSource, Smoothing,
};
