/// Three-channel 8-bit image the pipeline can read from.
///
/// Channels are returned as `[R, G, B]`.
pub trait RgbSource: Sync {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn rgb(&self, row: usize, col: usize) -> [u8; 3];
}

/// Row-major owned RGB image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    rows: usize,
    cols: usize,
    data: Vec<[u8; 3]>,
}

impl RgbImage {
    /// Black image
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, [0, 0, 0])
    }

    /// Image with every pixel set to `rgb`
    pub fn filled(rows: usize, cols: usize, rgb: [u8; 3]) -> Self {
        Self {
            rows,
            cols,
            data: vec![rgb; rows * cols],
        }
    }

    /// Wrap row-major pixels, `None` on length mismatch
    pub fn from_vec(rows: usize, cols: usize, data: Vec<[u8; 3]>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    /// Gray image where every channel carries the same intensity
    pub fn from_gray(rows: usize, cols: usize, gray: &[u8]) -> Option<Self> {
        if gray.len() != rows * cols {
            return None;
        }
        Some(Self {
            rows,
            cols,
            data: gray.iter().map(|&v| [v, v, v]).collect(),
        })
    }

    /// # Panics
    /// If `(row, col)` lies outside the image.
    pub fn set(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        assert!(
            row < self.rows && col < self.cols,
            "pixel ({row}, {col}) outside {}x{} image",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col] = rgb;
    }

    pub fn as_slice(&self) -> &[[u8; 3]] {
        &self.data
    }
}

impl RgbSource for RgbImage {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn rgb(&self, row: usize, col: usize) -> [u8; 3] {
        assert!(
            row < self.rows && col < self.cols,
            "pixel ({row}, {col}) outside {}x{} image",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }
}

#[cfg(feature = "image")]
impl RgbSource for image::RgbImage {
    #[inline]
    fn rows(&self) -> usize {
        self.height() as usize
    }

    #[inline]
    fn cols(&self) -> usize {
        self.width() as usize
    }

    #[inline]
    fn rgb(&self, row: usize, col: usize) -> [u8; 3] {
        self.get_pixel(col as u32, row as u32).0
    }
}
