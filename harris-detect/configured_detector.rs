use harris_core::{Candidate, PixelBuffer};
use crate::config::DetectorConfig;
use crate::detector::HarrisDetector;
use crate::error::HarrisResult;

/// A `HarrisDetector` paired with the selection parameters it was built with.
#[derive(Debug, Clone)]
pub struct ConfiguredDetector {
    pub(crate) detector: HarrisDetector,
    pub(crate) config: DetectorConfig,
}

impl ConfiguredDetector {
    /// Select corners with the stored percentage and suppression radius.
    pub fn detect(&self) -> HarrisResult<Vec<Candidate>> {
        self.detector
            .maxima_points(self.config.percentage, self.config.suppression_radius)
    }

    /// Select corners with a different radius, keeping the stored percentage.
    pub fn detect_with_radius(&self, suppression_radius: usize) -> HarrisResult<Vec<Candidate>> {
        self.detector
            .maxima_points(self.config.percentage, suppression_radius)
    }

    /// Get a reference to the underlying `HarrisDetector`
    pub fn detector(&self) -> &HarrisDetector {
        &self.detector
    }

    /// Cached response buffer
    pub fn responses(&self) -> &PixelBuffer {
        self.detector.responses()
    }

    /// Configuration the detector was built from
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Get a summary of the detector's configuration
    pub fn config_summary(&self) -> String {
        self.config.summary()
    }

    /// Input image (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.detector.image_dimensions()
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::DetectorBuilder;
    use harris_core::RgbImage;

    fn checker(rows: usize, cols: usize, cell: usize) -> RgbImage {
        let gray: Vec<u8> = (0..rows * cols)
            .map(|i| {
                let (r, c) = (i / cols, i % cols);
                if (r / cell + c / cell) % 2 == 0 { 30 } else { 220 }
            })
            .collect();
        RgbImage::from_gray(rows, cols, &gray).unwrap()
    }

    #[test]
    fn test_detect_uses_stored_parameters() {
        let img = checker(32, 40, 8);
        let configured = DetectorBuilder::new()
            .k(0.04)
            .filter_range(1)
            .percentage(0.05)
            .suppression_radius(2)
            .build(&img)
            .unwrap();

        let direct = configured.detector().maxima_points(0.05, 2).unwrap();
        assert_eq!(configured.detect().unwrap(), direct);
        assert_eq!(configured.dimensions(), (32, 40));
        assert_eq!(configured.responses().dimensions(), (28, 36));
    }

    #[test]
    fn test_detect_with_radius() {
        let img = checker(32, 32, 8);
        let configured = DetectorBuilder::new().percentage(0.1).build(&img).unwrap();
        let tight = configured.detect_with_radius(0).unwrap();
        let wide = configured.detect_with_radius(6).unwrap();
        assert!(wide.len() <= tight.len());
        assert!(configured.config_summary().contains("percentage=0.1"));
    }
}
