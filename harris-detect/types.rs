use harris_core::PixelBuffer;
use crate::error::{HarrisError, HarrisResult};

/// Per-pixel derivative buffers sharing one set of dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeTriple {
    pub ix: PixelBuffer,
    pub iy: PixelBuffer,
    pub ixy: PixelBuffer,
}

impl DerivativeTriple {
    /// Bundle three buffers, rejecting mismatched dimensions
    pub fn new(ix: PixelBuffer, iy: PixelBuffer, ixy: PixelBuffer) -> HarrisResult<Self> {
        for other in [&iy, &ixy] {
            if other.dimensions() != ix.dimensions() {
                return Err(HarrisError::DimensionMismatch {
                    left: ix.dimensions(),
                    right: other.dimensions(),
                });
            }
        }
        Ok(Self { ix, iy, ixy })
    }

    /// (rows, cols) shared by all three buffers
    pub fn dimensions(&self) -> (usize, usize) {
        self.ix.dimensions()
    }

    /// Apply the same fallible transform to every buffer
    pub fn try_map<F>(&self, mut f: F) -> HarrisResult<Self>
    where
        F: FnMut(&PixelBuffer) -> HarrisResult<PixelBuffer>,
    {
        Self::new(f(&self.ix)?, f(&self.iy)?, f(&self.ixy)?)
    }
}
