#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HarrisError {
    #[error("Image {rows}x{cols} too small for filter range {filter_range}")]
    ImageTooSmall {
        rows: usize,
        cols: usize,
        filter_range: usize,
    },
    #[error("Invalid percentage: {0} (must be in (0, 1])")]
    InvalidPercentage(f32),
    #[error("Invalid Harris sensitivity: {0} (must be finite)")]
    InvalidSensitivity(f32),
    #[error("Filter range {actual} does not match construction value {expected}")]
    FilterRangeMismatch { expected: usize, actual: usize },
    #[error("Buffer dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type HarrisResult<T> = Result<T, HarrisError>;
