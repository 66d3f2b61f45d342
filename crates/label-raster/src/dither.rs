//! Binarization — threshold conversion, Floyd-Steinberg error diffusion,
//! and the canonical print-preparation entry point.

use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

use crate::RasterError;
use crate::flatten::flatten_onto_white;
use crate::mode::{BilevelImage, ensure_grayscale};
use crate::resize::fit_to_width;

/// Quantization cut point for error diffusion.
const QUANT_MIDPOINT: i16 = 128;

/// The two buffers produced by [`prepare`]: the grayscale raster, kept so
/// callers can reprint variants (rotated, re-thresholded), and the dithered
/// bilevel raster sent to the printer.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub grayscale: GrayImage,
    pub dithered: BilevelImage,
}

/// Prepare a decoded photograph for thermal printing.
///
/// Flattens transparency, fits the image to the printer's raster width,
/// converts to grayscale, and dithers. Both returned buffers are exactly
/// `label_width` wide.
pub fn prepare(img: &DynamicImage, label_width: u32) -> Result<Prepared, RasterError> {
    let flattened = flatten_onto_white(img)?;
    let fitted = fit_to_width(&flattened, label_width)?;
    let grayscale = ensure_grayscale(&fitted)?;
    let dithered = floyd_steinberg_dither(&grayscale);
    debug!(
        label_width,
        height = grayscale.height(),
        "Prepared image for printing"
    );
    Ok(Prepared {
        grayscale,
        dithered,
    })
}

/// Binarize with a hard cut: blank (255) iff intensity is strictly above
/// `threshold_value`, ink (0) otherwise.
pub fn threshold(
    img: &DynamicImage,
    threshold_value: u8,
) -> Result<BilevelImage, RasterError> {
    let gray = ensure_grayscale(img)?;
    debug!(threshold_value, "Applying threshold binarization");

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = if i as u8 > threshold_value { 255 } else { 0 };
    }

    let mut output = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        output.put_pixel(x, y, Luma([lut[pixel.0[0] as usize]]));
    }
    Ok(BilevelImage::from_binary(output))
}

/// Floyd-Steinberg error-diffusion dithering.
///
/// Quantizes each pixel to ink or blank in row-major order, pushing the
/// quantization error onto not-yet-visited neighbors with the classical
/// weights: right 7/16, below-left 3/16, below 5/16, below-right 1/16.
/// Error that would land outside the image is discarded.
pub fn floyd_steinberg_dither(img: &GrayImage) -> BilevelImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    let w = width as usize;
    let h = height as usize;
    // i16 working copy so diffused error can push values past the u8 range.
    let mut buffer: Vec<i16> = img.pixels().map(|p| i16::from(p.0[0])).collect();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let old = buffer[idx];
            let new = if old >= QUANT_MIDPOINT { 255 } else { 0 };
            buffer[idx] = new;
            let error = old - new;

            if x + 1 < w {
                buffer[idx + 1] += error * 7 / 16;
            }
            if y + 1 < h {
                if x > 0 {
                    buffer[idx + w - 1] += error * 3 / 16;
                }
                buffer[idx + w] += error * 5 / 16;
                if x + 1 < w {
                    buffer[idx + w + 1] += error / 16;
                }
            }
        }
    }

    let output = GrayImage::from_fn(width, height, |x, y| {
        Luma([buffer[y as usize * w + x as usize].clamp(0, 255) as u8])
    });
    BilevelImage::from_binary(output)
}
