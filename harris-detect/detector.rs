use harris_core::{Candidate, HarrisConfig, PixelBuffer, RgbSource};
use log::debug;
use crate::derivatives::compute_derivatives;
use crate::error::{HarrisError, HarrisResult};
use crate::grayscale::convert_rgb_to_grayscale;
use crate::maxima::select_maxima;
use crate::response::compute_harris_responses;
use crate::smoothing::apply_smoothing;

/// Harris corner detector holding the response buffer of one image.
///
/// All pipeline stages run in the constructor; selection only reads the
/// cached responses and can be repeated with different parameters.
#[derive(Debug, Clone)]
pub struct HarrisDetector {
    cfg: HarrisConfig,
    rows: usize,
    cols: usize,
    responses: PixelBuffer,
}

impl HarrisDetector {
    /// Run the pipeline with box-sum (`use_gaussian == false`) or literal
    /// Gaussian smoothing.
    pub fn new<S: RgbSource + ?Sized>(
        img: &S,
        k: f32,
        filter_range: usize,
        use_gaussian: bool,
    ) -> HarrisResult<Self> {
        Self::with_config(img, &HarrisConfig::new(k, filter_range, use_gaussian))
    }

    /// Run the pipeline with every variant taken from `cfg`
    pub fn with_config<S: RgbSource + ?Sized>(img: &S, cfg: &HarrisConfig) -> HarrisResult<Self> {
        Self::validate(img.rows(), img.cols(), cfg)?;

        let gray = convert_rgb_to_grayscale(img);
        debug!("grayscale: {}x{}", gray.rows(), gray.cols());

        let derivatives = compute_derivatives(&gray, cfg.cross_term)?;
        let smoothed = apply_smoothing(derivatives, cfg.smoothing, cfg.filter_range)?;
        let responses = compute_harris_responses(cfg.k, &smoothed)?;

        Ok(Self {
            cfg: cfg.clone(),
            rows: img.rows(),
            cols: img.cols(),
            responses,
        })
    }

    /// Check that the image survives `1 + filter_range` pixels of trimming
    /// per border and that `k` is usable.
    pub fn validate(rows: usize, cols: usize, cfg: &HarrisConfig) -> HarrisResult<()> {
        if !cfg.k.is_finite() {
            return Err(HarrisError::InvalidSensitivity(cfg.k));
        }
        let too_small = HarrisError::ImageTooSmall {
            rows,
            cols,
            filter_range: cfg.filter_range,
        };
        let trimmed = cfg.border().checked_mul(2).ok_or_else(|| too_small.clone())?;
        if rows <= trimmed || cols <= trimmed {
            return Err(too_small);
        }
        Ok(())
    }

    /// Select corners. `filter_range` must be the value the detector was
    /// built with; it only drives the coordinate remap.
    pub fn get_maxima_points(
        &self,
        percentage: f32,
        filter_range: usize,
        suppression_radius: usize,
    ) -> HarrisResult<Vec<Candidate>> {
        if filter_range != self.cfg.filter_range {
            return Err(HarrisError::FilterRangeMismatch {
                expected: self.cfg.filter_range,
                actual: filter_range,
            });
        }
        select_maxima(&self.responses, percentage, filter_range, suppression_radius)
    }

    /// Select corners using the construction filter range
    pub fn maxima_points(&self, percentage: f32, suppression_radius: usize) -> HarrisResult<Vec<Candidate>> {
        self.get_maxima_points(percentage, self.cfg.filter_range, suppression_radius)
    }

    /// Cached response buffer, trimmed by `1 + filter_range` per border
    pub fn responses(&self) -> &PixelBuffer {
        &self.responses
    }

    pub fn config(&self) -> &HarrisConfig {
        &self.cfg
    }

    /// Input image (rows, cols)
    pub fn image_dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harris_core::{CrossTerm, GaussianMode, RgbImage, Smoothing};

    /// Flat image with one brighter pixel
    fn impulse_image(rows: usize, cols: usize, at: (usize, usize)) -> RgbImage {
        let mut img = RgbImage::filled(rows, cols, [50, 50, 50]);
        img.set(at.0, at.1, [150, 150, 150]);
        img
    }

    /// Bright square on a dark background
    fn square_image(size: usize, lo: usize, hi: usize) -> RgbImage {
        let mut img = RgbImage::filled(size, size, [20, 20, 20]);
        for r in lo..hi {
            for c in lo..hi {
                img.set(r, c, [230, 230, 230]);
            }
        }
        img
    }

    #[test]
    fn test_response_dimensions() {
        let img = RgbImage::new(20, 30);
        let det = HarrisDetector::new(&img, 0.04, 0, false).unwrap();
        assert_eq!(det.responses().dimensions(), (18, 28));

        let det = HarrisDetector::new(&img, 0.04, 3, false).unwrap();
        assert_eq!(det.responses().dimensions(), (12, 22));

        let det = HarrisDetector::new(&img, 0.04, 3, true).unwrap();
        assert_eq!(det.responses().dimensions(), (12, 22));
        assert_eq!(det.image_dimensions(), (20, 30));
    }

    #[test]
    fn test_image_too_small() {
        // 2 + 2 * 2 = 6 pixels trimmed; 6 rows leave nothing.
        let img = RgbImage::new(6, 40);
        assert!(matches!(
            HarrisDetector::new(&img, 0.04, 2, false),
            Err(HarrisError::ImageTooSmall { rows: 6, cols: 40, filter_range: 2 })
        ));
        assert!(HarrisDetector::new(&RgbImage::new(7, 7), 0.04, 2, false).is_ok());
        assert!(HarrisDetector::new(&RgbImage::new(2, 2), 0.04, 0, true).is_err());
        assert!(HarrisDetector::new(&RgbImage::new(0, 0), 0.04, 0, false).is_err());
    }

    #[test]
    fn test_huge_filter_range_is_rejected() {
        let img = RgbImage::new(8, 8);
        for filter_range in [usize::MAX, usize::MAX / 2, usize::MAX / 2 - 1] {
            assert_eq!(
                HarrisDetector::new(&img, 0.04, filter_range, false).unwrap_err(),
                HarrisError::ImageTooSmall { rows: 8, cols: 8, filter_range }
            );
        }
    }

    #[test]
    fn test_invalid_sensitivity() {
        let img = RgbImage::new(8, 8);
        assert!(matches!(
            HarrisDetector::new(&img, f32::NAN, 0, false),
            Err(HarrisError::InvalidSensitivity(_))
        ));
    }

    #[test]
    fn test_flat_image_zero_response() {
        let img = RgbImage::filled(12, 12, [90, 140, 30]);
        for gauss in [false, true] {
            let det = HarrisDetector::new(&img, 0.04, 1, gauss).unwrap();
            assert!(det.responses().as_slice().iter().all(|&v| v.abs() < 1e-6));
        }
    }

    #[test]
    fn test_single_bright_pixel() {
        let img = impulse_image(7, 7, (3, 3));
        let det = HarrisDetector::new(&img, 0.05, 0, false).unwrap();
        let responses = det.responses();

        // The structure tensor of a single pixel is rank one, so the score
        // is k * (ix² + iy²)². The impulse itself has zero gradient; its
        // orthogonal neighbours see the weight-2 tap.
        let d = 100.0f32;
        let orthogonal = 0.05 * (2.0 * d).powi(4);
        assert_eq!(responses.get(2, 2), 0.0);
        for (r, c) in [(1, 2), (2, 1), (2, 3), (3, 2)] {
            assert!((responses.get(r, c) - orthogonal).abs() / orthogonal < 1e-4);
        }

        let out = det.get_maxima_points(1.0, 0, 1).unwrap();
        assert!(out.len() <= 25);
        // Four neighbours tie; row-major order puts the one above first, and
        // its radius-1 square hides the left and right neighbours.
        assert_eq!((out[0].row, out[0].col), (2, 3));
        assert_eq!((out[1].row, out[1].col), (4, 3));
        assert_eq!(out[0].score, out[1].score);
        for cand in &out[..2] {
            let dr = cand.row.abs_diff(3);
            let dc = cand.col.abs_diff(3);
            assert_eq!(dr.max(dc), 1);
        }
        for cand in &out[2..] {
            assert!(cand.score < out[1].score);
        }
    }

    #[test]
    fn test_responses_follow_square_outline() {
        let img = square_image(32, 10, 22);
        let det = HarrisDetector::with_config(
            &img,
            &HarrisConfig {
                k: 0.04,
                filter_range: 1,
                smoothing: Smoothing::Gaussian { mode: GaussianMode::SlidingWindow },
                cross_term: CrossTerm::Product,
                n_threads: 1,
            },
        )
        .unwrap();

        let out = det.maxima_points(0.5, 2).unwrap();
        let strong: Vec<_> = out.iter().filter(|c| c.score > 0.0).collect();
        assert!(!strong.is_empty());
        for cand in strong {
            let (r, c) = (cand.row, cand.col);
            assert!((7..=24).contains(&r) && (7..=24).contains(&c));
            assert!(!((13..=18).contains(&r) && (13..=18).contains(&c)));
        }
    }

    #[test]
    fn test_filter_range_mismatch() {
        let img = impulse_image(12, 12, (6, 6));
        let det = HarrisDetector::new(&img, 0.04, 2, false).unwrap();
        assert_eq!(
            det.get_maxima_points(0.5, 1, 1).unwrap_err(),
            HarrisError::FilterRangeMismatch { expected: 2, actual: 1 }
        );
        assert_eq!(
            det.get_maxima_points(0.5, 2, 1).unwrap(),
            det.maxima_points(0.5, 1).unwrap()
        );
    }

    #[test]
    fn test_selection_is_repeatable() {
        let img = square_image(24, 6, 16);
        let det = HarrisDetector::new(&img, 0.04, 1, false).unwrap();
        let first = det.maxima_points(0.2, 2).unwrap();
        for _ in 0..5 {
            assert_eq!(det.maxima_points(0.2, 2).unwrap(), first);
        }
        let wider = det.maxima_points(0.2, 5).unwrap();
        assert!(wider.len() <= first.len());
    }

    #[test]
    fn test_candidates_inside_image() {
        let img = square_image(20, 5, 12);
        for filter_range in [0, 1, 2] {
            let det = HarrisDetector::new(&img, 0.05, filter_range, false).unwrap();
            let border = 1 + filter_range;
            for cand in det.maxima_points(1.0, 1).unwrap() {
                assert!(cand.row >= border && cand.row < 20 - border);
                assert!(cand.col >= border && cand.col < 20 - border);
            }
        }
    }

    #[test]
    fn test_detector_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HarrisDetector>();
    }

    #[test]
    fn test_concurrent_selection() {
        let img = square_image(24, 6, 16);
        let det = HarrisDetector::new(&img, 0.04, 1, false).unwrap();
        let expected = det.maxima_points(0.1, 2).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(det.maxima_points(0.1, 2).unwrap(), expected));
            }
        });
    }
}
