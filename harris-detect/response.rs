use harris_core::PixelBuffer;
use log::debug;
use crate::error::{HarrisError, HarrisResult};
use crate::types::DerivativeTriple;

/// Harris score of a single derivative pair.
///
/// The structure tensor is formed from this pixel alone:
/// `[[ix², ix·iy], [ix·iy, iy²]]`. Scores are `|det - k·trace²|`.
#[inline]
pub fn harris_score(k: f32, ix: f32, iy: f32) -> f32 {
    let a11 = ix * ix;
    let a22 = iy * iy;
    let a21 = ix * iy;
    let a12 = ix * iy;

    let det = a11 * a22 - a12 * a21;
    let trace = a11 + a22;
    (det - k * trace * trace).abs()
}

/// Response buffer from the smoothed `(Ix, Iy)` pair; `Ixy` is not read.
pub fn compute_harris_responses(k: f32, derivatives: &DerivativeTriple) -> HarrisResult<PixelBuffer> {
    let (ix, iy) = (&derivatives.ix, &derivatives.iy);
    if ix.dimensions() != iy.dimensions() {
        return Err(HarrisError::DimensionMismatch {
            left: ix.dimensions(),
            right: iy.dimensions(),
        });
    }

    let (rows, cols) = ix.dimensions();
    let mut responses = PixelBuffer::new(rows, cols);
    responses.par_fill_rows(|r, row| {
        let (gx, gy) = (ix.row(r), iy.row(r));
        for (c, v) in row.iter_mut().enumerate() {
            *v = harris_score(k, gx[c], gy[c]);
        }
    });

    debug!("responses: {}x{} (k = {})", rows, cols, k);
    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(ix: PixelBuffer, iy: PixelBuffer) -> DerivativeTriple {
        DerivativeTriple::new(ix, iy.clone(), iy).unwrap()
    }

    #[test]
    fn test_score_formula() {
        // Rank-one tensor: det vanishes, leaving k * (ix² + iy²)².
        let k = 0.05;
        assert_eq!(harris_score(k, 0.0, 0.0), 0.0);
        assert!((harris_score(k, 2.0, 0.0) - k * 16.0).abs() < 1e-6);
        assert!((harris_score(k, 1.0, 1.0) - k * 4.0).abs() < 1e-6);
        assert_eq!(harris_score(k, -3.0, 4.0), harris_score(k, 3.0, -4.0));
    }

    #[test]
    fn test_non_negative() {
        let ix = PixelBuffer::from_fn(6, 6, |r, c| r as f32 - 2.5 * c as f32);
        let iy = PixelBuffer::from_fn(6, 6, |r, c| (r * c) as f32 - 7.0);
        for k in [-0.1, 0.0, 0.04, 0.06, 0.5] {
            let responses = compute_harris_responses(k, &triple(ix.clone(), iy.clone())).unwrap();
            assert!(responses.as_slice().iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn test_zero_gradients_zero_response() {
        let zero = PixelBuffer::new(4, 5);
        let responses = compute_harris_responses(0.04, &triple(zero.clone(), zero)).unwrap();
        assert_eq!(responses.dimensions(), (4, 5));
        assert!(responses.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_third_slot_is_ignored() {
        let ix = PixelBuffer::filled(3, 3, 2.0);
        let iy = PixelBuffer::filled(3, 3, -1.0);
        let a = DerivativeTriple::new(ix.clone(), iy.clone(), PixelBuffer::new(3, 3)).unwrap();
        let b = DerivativeTriple::new(ix, iy, PixelBuffer::filled(3, 3, 99.0)).unwrap();
        assert_eq!(
            compute_harris_responses(0.04, &a).unwrap(),
            compute_harris_responses(0.04, &b).unwrap()
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let derivatives = DerivativeTriple {
            ix: PixelBuffer::new(3, 3),
            iy: PixelBuffer::new(3, 4),
            ixy: PixelBuffer::new(3, 4),
        };
        assert!(matches!(
            compute_harris_responses(0.04, &derivatives),
            Err(HarrisError::DimensionMismatch { .. })
        ));
    }
}
