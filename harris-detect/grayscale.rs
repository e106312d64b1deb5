use harris_core::{PixelBuffer, RgbSource};

/// Rec.709 luma weights for R, G, B
pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Luminance of one RGB pixel
#[inline]
pub fn luminance(rgb: [u8; 3]) -> f32 {
    (LUMA_WEIGHTS[0] * rgb[0] as f64
        + LUMA_WEIGHTS[1] * rgb[1] as f64
        + LUMA_WEIGHTS[2] * rgb[2] as f64) as f32
}

/// Pointwise RGB to luminance, same dimensions as the input
pub fn convert_rgb_to_grayscale<S: RgbSource + ?Sized>(img: &S) -> PixelBuffer {
    let mut gray = PixelBuffer::new(img.rows(), img.cols());
    gray.par_fill_rows(|r, row| {
        for (c, v) in row.iter_mut().enumerate() {
            *v = luminance(img.rgb(r, c));
        }
    });
    gray
}
