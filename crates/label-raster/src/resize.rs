//! Geometric scaling to the printer's raster width.
//!
//! Two modes: a fast aspect-preserving fit for interactive capture loops,
//! and a millimeter-precise fit for exact-size printing.

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use tracing::debug;

use crate::{MM_PER_INCH, RasterError};

/// Scale an image so its width is exactly `label_width`, preserving aspect ratio.
///
/// Uses the fast Triangle filter since this runs per frame in interactive
/// capture. Returns the image unchanged if the width already matches.
pub fn fit_to_width(img: &DynamicImage, label_width: u32) -> Result<DynamicImage, RasterError> {
    let (orig_w, orig_h) = (img.width(), img.height());
    if orig_w == 0 || orig_h == 0 || label_width == 0 {
        return Err(RasterError::InvalidDimension {
            width: i64::from(label_width.min(orig_w)),
            height: i64::from(orig_h),
        });
    }

    if orig_w == label_width {
        debug!(label_width, "Image already at label width, skipping resize");
        return Ok(img.clone());
    }

    let ratio = f64::from(label_width) / f64::from(orig_w);
    let new_height = ((f64::from(orig_h) * ratio).round() as u32).max(1);
    debug!(orig_w, orig_h, label_width, new_height, "Fitting image to label width");

    Ok(img.resize_exact(label_width, new_height, FilterType::Triangle))
}

/// Scale an image to an exact physical width in millimeters at the given
/// print resolution.
///
/// Uses Lanczos3 since output quality matters more than speed here. When the
/// requested physical width is narrower than the printable area, the result
/// is centered on an opaque-white canvas of `label_width` so the printer
/// always receives a full-width raster; when it is at least `label_width`,
/// the raster is returned at its computed width and any clipping is the
/// printer driver's concern.
pub fn fit_to_physical_width(
    img: &DynamicImage,
    target_width_mm: f64,
    label_width: u32,
    dpi: u32,
) -> Result<DynamicImage, RasterError> {
    let (orig_w, orig_h) = (img.width(), img.height());
    if orig_w == 0 || orig_h == 0 {
        return Err(RasterError::InvalidDimension {
            width: i64::from(orig_w),
            height: i64::from(orig_h),
        });
    }

    let target_width_px = (target_width_mm / MM_PER_INCH * f64::from(dpi)).floor() as i64;
    if target_width_px < 1 {
        return Err(RasterError::InvalidDimension {
            width: target_width_px,
            height: i64::from(orig_h),
        });
    }
    let target_width_px = target_width_px as u32;

    let scale = f64::from(target_width_px) / f64::from(orig_w);
    let new_height = ((f64::from(orig_h) * scale).round() as u32).max(1);
    debug!(
        target_width_mm,
        dpi,
        target_width_px,
        new_height,
        "Fitting image to physical width"
    );

    let resized = img.resize_exact(target_width_px, new_height, FilterType::Lanczos3);
    if target_width_px >= label_width {
        return Ok(resized);
    }

    // Narrower than the head: center on a white canvas at full label width.
    let mut canvas = RgbImage::from_pixel(label_width, new_height, Rgb([255, 255, 255]));
    let x_offset = (label_width - target_width_px) / 2;
    image::imageops::replace(&mut canvas, &resized.to_rgb8(), i64::from(x_offset), 0);
    Ok(DynamicImage::ImageRgb8(canvas))
}
