//! Alpha flattening — composite transparent images onto opaque white.

use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use crate::RasterError;
use crate::mode::ColorMode;

/// Composite an image with transparency over an opaque white background
/// and drop the alpha channel.
///
/// Opaque inputs (RGB or grayscale) pass through unchanged. Stages
/// downstream of this one never see an alpha channel.
pub fn flatten_onto_white(img: &DynamicImage) -> Result<DynamicImage, RasterError> {
    if !ColorMode::of(img)?.has_alpha() {
        return Ok(img.clone());
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(width, height, "Flattening alpha channel onto white");

    let mut output = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = f32::from(pixel[3]) / 255.0;
        let inv = 1.0 - alpha;
        output.put_pixel(
            x,
            y,
            Rgb([
                (f32::from(pixel[0]) * alpha + 255.0 * inv) as u8,
                (f32::from(pixel[1]) * alpha + 255.0 * inv) as u8,
                (f32::from(pixel[2]) * alpha + 255.0 * inv) as u8,
            ]),
        );
    }
    Ok(DynamicImage::ImageRgb8(output))
}
