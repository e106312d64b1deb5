//! Sobel-equivalent gradients built from two separable [1, 2, 1] passes.
//!
//! `vsmooth` is the grayscale image smoothed down each column and
//! `hsmooth` the image smoothed along each row. Differencing `hsmooth` two
//! rows apart and `vsmooth` two columns apart gives the two gradient
//! estimates on a grid trimmed by one pixel per border.

use harris_core::{CrossTerm, PixelBuffer};
use log::debug;
use crate::error::{HarrisError, HarrisResult};
use crate::types::DerivativeTriple;

/// Vertical [1, 2, 1] pass, `(rows - 2) x cols`
fn vertical_smooth(gray: &PixelBuffer) -> PixelBuffer {
    let mut out = PixelBuffer::new(gray.rows() - 2, gray.cols());
    out.par_fill_rows(|r, row| {
        let (above, center, below) = (gray.row(r), gray.row(r + 1), gray.row(r + 2));
        for (c, v) in row.iter_mut().enumerate() {
            *v = above[c] + center[c] + center[c] + below[c];
        }
    });
    out
}

/// Horizontal [1, 2, 1] pass, `rows x (cols - 2)`
fn horizontal_smooth(gray: &PixelBuffer) -> PixelBuffer {
    let mut out = PixelBuffer::new(gray.rows(), gray.cols() - 2);
    out.par_fill_rows(|r, row| {
        let src = gray.row(r);
        for (c, v) in row.iter_mut().enumerate() {
            *v = src[c] + src[c + 1] + src[c + 1] + src[c + 2];
        }
    });
    out
}

/// Compute `{Ix, Iy, third}` on the `(rows - 2) x (cols - 2)` grid.
///
/// The third buffer is chosen by `cross_term`: a copy of `Iy`, or the
/// elementwise product `Ix * Iy`.
pub fn compute_derivatives(gray: &PixelBuffer, cross_term: CrossTerm) -> HarrisResult<DerivativeTriple> {
    let (rows, cols) = gray.dimensions();
    if rows < 3 || cols < 3 {
        return Err(HarrisError::ImageTooSmall {
            rows,
            cols,
            filter_range: 0,
        });
    }

    let vsmooth = vertical_smooth(gray);
    let hsmooth = horizontal_smooth(gray);

    let mut ix = PixelBuffer::new(rows - 2, cols - 2);
    ix.par_fill_rows(|r, row| {
        let (top, bottom) = (hsmooth.row(r), hsmooth.row(r + 2));
        for (c, v) in row.iter_mut().enumerate() {
            *v = top[c] - bottom[c];
        }
    });

    let mut iy = PixelBuffer::new(rows - 2, cols - 2);
    iy.par_fill_rows(|r, row| {
        let src = vsmooth.row(r);
        for (c, v) in row.iter_mut().enumerate() {
            *v = -src[c] + src[c + 2];
        }
    });

    let third = match cross_term {
        CrossTerm::AliasVertical => iy.clone(),
        CrossTerm::Product => {
            let mut ixy = PixelBuffer::new(rows - 2, cols - 2);
            ixy.par_fill_rows(|r, row| {
                let (gx, gy) = (ix.row(r), iy.row(r));
                for (c, v) in row.iter_mut().enumerate() {
                    *v = gx[c] * gy[c];
                }
            });
            ixy
        }
    };

    debug!(
        "derivatives: {}x{} -> {}x{} ({:?})",
        rows,
        cols,
        rows - 2,
        cols - 2,
        cross_term
    );
    DerivativeTriple::new(ix, iy, third)
}
