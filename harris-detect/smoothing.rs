use std::f64::consts::PI;

use harris_core::{GaussianMode, PixelBuffer, Smoothing};
use log::debug;
use crate::error::{HarrisError, HarrisResult};
use crate::types::DerivativeTriple;

/// Unnormalized unit-sigma Gaussian weight for tap offset `x`
#[inline]
pub fn gauss_weight(x: i64) -> f64 {
    let x = x as f64;
    1.0 / (2.0 * PI).sqrt() * (-0.5 * x * x).exp()
}

/// Sum of `gauss_weight(x)` for `x` in `-range..=range`
pub fn gauss_weight_sum(range: usize) -> f64 {
    let range = range as i64;
    (-range..=range).map(gauss_weight).sum()
}

fn trimmed_dimensions(buf: &PixelBuffer, range: usize) -> HarrisResult<(usize, usize)> {
    let (rows, cols) = buf.dimensions();
    let too_small = HarrisError::ImageTooSmall {
        rows,
        cols,
        filter_range: range,
    };
    let trimmed = range.checked_mul(2).ok_or_else(|| too_small.clone())?;
    if rows <= trimmed || cols <= trimmed {
        return Err(too_small);
    }
    Ok((rows - trimmed, cols - trimmed))
}

/// Summed-area table: `S[r, c]` is the sum of `img[i, j]` for `i <= r`, `j <= c`
pub fn integral_image(img: &PixelBuffer) -> PixelBuffer {
    let (rows, cols) = img.dimensions();
    let mut sat = PixelBuffer::new(rows, cols);
    if img.is_empty() {
        return sat;
    }

    sat.set(0, 0, img.get(0, 0));
    for c in 1..cols {
        sat.set(0, c, sat.get(0, c - 1) + img.get(0, c));
    }
    for r in 1..rows {
        sat.set(r, 0, sat.get(r - 1, 0) + img.get(r, 0));
    }
    for r in 1..rows {
        for c in 1..cols {
            let v = img.get(r, c) + sat.get(r - 1, c) + sat.get(r, c - 1) - sat.get(r - 1, c - 1);
            sat.set(r, c, v);
        }
    }
    sat
}

/// Inclusion-exclusion window sum over a summed-area table.
///
/// Output pixel `(r - range, c - range)` is
/// `S[r+range, c+range] + S[r-range, c-range] - S[r+range, c-range] - S[r-range, c+range]`,
/// which sums the input over rows `r-range+1..=r+range` and columns
/// `c-range+1..=c+range`. The result is not divided by the window area.
pub fn box_sum_filter(sat: &PixelBuffer, range: usize) -> HarrisResult<PixelBuffer> {
    let (out_rows, out_cols) = trimmed_dimensions(sat, range)?;
    let mut out = PixelBuffer::new(out_rows, out_cols);
    out.par_fill_rows(|i, row| {
        let r = i + range;
        let (lo, hi) = (sat.row(r - range), sat.row(r + range));
        for (j, v) in row.iter_mut().enumerate() {
            let c = j + range;
            *v = hi[c + range] + lo[c - range] - hi[c - range] - lo[c + range];
        }
    });
    Ok(out)
}

/// Box sum of the raw input; `range == 0` returns a copy
pub fn box_sum(img: &PixelBuffer, range: usize) -> HarrisResult<PixelBuffer> {
    if range == 0 {
        return Ok(img.clone());
    }
    box_sum_filter(&integral_image(img), range)
}

/// Gaussian window whose taps all read the same pixel.
///
/// Both passes accumulate `weight(x) * img[r - range, c - range]`, so the
/// output is the top-left `(rows - 2*range) x (cols - 2*range)` crop scaled
/// by `gauss_weight_sum(range)` squared.
pub fn gauss_filter(img: &PixelBuffer, range: usize) -> HarrisResult<PixelBuffer> {
    let (out_rows, out_cols) = trimmed_dimensions(img, range)?;
    let taps = range as i64;

    let mut helper = PixelBuffer::new(out_rows, out_cols);
    helper.par_fill_rows(|i, row| {
        let src = img.row(i);
        for (j, v) in row.iter_mut().enumerate() {
            let mut res = 0.0f32;
            for x in -taps..=taps {
                res = (res as f64 + gauss_weight(x) * src[j] as f64) as f32;
            }
            *v = res;
        }
    });

    let mut out = PixelBuffer::new(out_rows, out_cols);
    out.par_fill_rows(|i, row| {
        let src = helper.row(i);
        for (j, v) in row.iter_mut().enumerate() {
            let mut res = 0.0f32;
            for x in -taps..=taps {
                res = (res as f64 + gauss_weight(x) * src[j] as f64) as f32;
            }
            *v = res;
        }
    });
    Ok(out)
}

/// Separable Gaussian blur over the trimmed grid: a vertical pass into a
/// `(rows - 2*range) x cols` helper, then a horizontal pass.
pub fn gauss_filter_sliding(img: &PixelBuffer, range: usize) -> HarrisResult<PixelBuffer> {
    let (out_rows, out_cols) = trimmed_dimensions(img, range)?;
    let taps = range as i64;
    let weights: Vec<f64> = (-taps..=taps).map(gauss_weight).collect();

    let mut helper = PixelBuffer::new(out_rows, img.cols());
    helper.par_fill_rows(|i, row| {
        for (c, v) in row.iter_mut().enumerate() {
            let mut res = 0.0f64;
            for (t, w) in weights.iter().enumerate() {
                res += w * img.get(i + t, c) as f64;
            }
            *v = res as f32;
        }
    });

    let mut out = PixelBuffer::new(out_rows, out_cols);
    out.par_fill_rows(|i, row| {
        let src = helper.row(i);
        for (j, v) in row.iter_mut().enumerate() {
            let mut res = 0.0f64;
            for (t, w) in weights.iter().enumerate() {
                res += w * src[j + t] as f64;
            }
            *v = res as f32;
        }
    });
    Ok(out)
}

/// Smooth one buffer with the chosen strategy; `range == 0` is a copy
pub fn smooth_buffer(buf: &PixelBuffer, smoothing: Smoothing, range: usize) -> HarrisResult<PixelBuffer> {
    if range == 0 {
        return Ok(buf.clone());
    }
    match smoothing {
        Smoothing::BoxSum => box_sum(buf, range),
        Smoothing::Gaussian { mode: GaussianMode::Literal } => gauss_filter(buf, range),
        Smoothing::Gaussian { mode: GaussianMode::SlidingWindow } => gauss_filter_sliding(buf, range),
    }
}

/// Smooth each derivative buffer independently
pub fn apply_smoothing(
    derivatives: DerivativeTriple,
    smoothing: Smoothing,
    range: usize,
) -> HarrisResult<DerivativeTriple> {
    if range == 0 {
        return Ok(derivatives);
    }
    let smoothed = derivatives.try_map(|buf| smooth_buffer(buf, smoothing, range))?;
    let (in_rows, in_cols) = derivatives.dimensions();
    let (out_rows, out_cols) = smoothed.dimensions();
    debug!(
        "smoothing {:?} range {}: {}x{} -> {}x{}",
        smoothing, range, in_rows, in_cols, out_rows, out_cols
    );
    Ok(smoothed)
}
