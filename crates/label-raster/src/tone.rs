//! Tonal correction — levels stretch and histogram equalization.
//!
//! Both operate on single-channel intensity through 256-entry lookup
//! tables. The exact LUT construction determines visible banding on the
//! printed label, so it is kept bit-for-bit stable.

use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

use crate::RasterError;
use crate::mode::ensure_grayscale;

/// Build the levels LUT: clamp at the black/white points, linear in between.
fn levels_lut(black_point: u8, white_point: u8) -> [u8; 256] {
    let span = f64::from(white_point) - f64::from(black_point);
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let level = i as u8;
        *entry = if level <= black_point {
            0
        } else if level >= white_point {
            255
        } else {
            ((f64::from(level) - f64::from(black_point)) / span * 255.0).round() as u8
        };
    }
    lut
}

/// Apply a 256-entry LUT to every pixel of a grayscale image.
fn map_through_lut(img: &GrayImage, lut: &[u8; 256]) -> GrayImage {
    let mut output = GrayImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        output.put_pixel(x, y, Luma([lut[pixel.0[0] as usize]]));
    }
    output
}

/// Stretch intensities so `black_point` maps to 0 and `white_point` to 255.
///
/// Converts to grayscale first. `apply_levels(img, 0, 255)` is the identity
/// on a grayscale image.
pub fn apply_levels(
    img: &DynamicImage,
    black_point: u8,
    white_point: u8,
) -> Result<GrayImage, RasterError> {
    if white_point <= black_point {
        return Err(RasterError::InvalidRange {
            black: black_point,
            white: white_point,
        });
    }

    let gray = ensure_grayscale(img)?;
    debug!(black_point, white_point, "Applying levels adjustment");
    Ok(map_through_lut(&gray, &levels_lut(black_point, white_point)))
}

/// Levels stretch followed by standard histogram equalization, so the
/// cumulative histogram of the result is approximately linear.
pub fn apply_histogram_equalization(
    img: &DynamicImage,
    black_point: u8,
    white_point: u8,
) -> Result<GrayImage, RasterError> {
    let leveled = apply_levels(img, black_point, white_point)?;

    let mut histogram = [0u64; 256];
    for pixel in leveled.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let mut cdf = [0u64; 256];
    let mut running = 0u64;
    for (i, count) in histogram.iter().enumerate() {
        running += *count;
        cdf[i] = running;
    }
    let total = running;
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    // A single-intensity image has nothing to redistribute.
    if total == cdf_min {
        debug!("Histogram is degenerate, skipping equalization");
        return Ok(leveled);
    }

    let span = (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = ((cdf[i].saturating_sub(cdf_min)) as f64 / span * 255.0).round() as u8;
    }

    debug!(black_point, white_point, "Applying histogram equalization");
    Ok(map_through_lut(&leveled, &lut))
}
