//! Color-mode classification and the bilevel raster type.
//!
//! The pipeline understands a closed set of modes; every stage classifies
//! its input through [`ColorMode`] and matches exhaustively, so an exotic
//! buffer (16-bit, float) is reported as [`RasterError::UnsupportedMode`]
//! instead of being silently converted.

use image::{DynamicImage, GrayImage, Luma};

use crate::RasterError;

/// The color modes the pipeline accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 3x8-bit color.
    Rgb,
    /// 3x8-bit color with an 8-bit alpha channel.
    Rgba,
    /// 8-bit single-channel intensity.
    Grayscale,
    /// Single-channel with only ink (0) and blank (255) values.
    Bilevel,
}

impl ColorMode {
    /// Classify a decoded buffer into the closed mode set.
    ///
    /// Bilevel never comes out of here: 1-bit rasters only exist as
    /// [`BilevelImage`], which tags itself.
    pub fn of(img: &DynamicImage) -> Result<Self, RasterError> {
        match img {
            DynamicImage::ImageLuma8(_) => Ok(Self::Grayscale),
            DynamicImage::ImageRgb8(_) => Ok(Self::Rgb),
            DynamicImage::ImageRgba8(_) => Ok(Self::Rgba),
            other => Err(RasterError::UnsupportedMode(format!("{:?}", other.color()))),
        }
    }

    /// Whether this mode carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// Convert a buffer to single-channel intensity after checking that its
/// mode is in the supported set.
pub fn ensure_grayscale(img: &DynamicImage) -> Result<GrayImage, RasterError> {
    ColorMode::of(img)?;
    Ok(img.to_luma8())
}

/// A raster whose pixels are only ever ink (0) or blank (255).
///
/// Storage stays 8-bit grayscale for easy preview and compositing, but the
/// value set makes the buffer losslessly representable at one bit per pixel
/// (see [`BilevelImage::packed_rows`]). Only the binarizer constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilevelImage(GrayImage);

impl BilevelImage {
    pub(crate) fn from_binary(img: GrayImage) -> Self {
        debug_assert!(img.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        Self(img)
    }

    pub fn mode(&self) -> ColorMode {
        ColorMode::Bilevel
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.0
    }

    pub fn into_gray(self) -> GrayImage {
        self.0
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageLuma8(self.0.clone())
    }

    /// Frame the raster with an ink border, staying bilevel.
    pub fn with_border(&self, border_width: u32) -> BilevelImage {
        let w = self.0.width() + 2 * border_width;
        let h = self.0.height() + 2 * border_width;
        let mut canvas = GrayImage::from_pixel(w, h, Luma([0]));
        let offset = i64::from(border_width);
        image::imageops::replace(&mut canvas, &self.0, offset, offset);
        BilevelImage(canvas)
    }

    /// Pack each row into MSB-first bytes, 1 = ink, the order thermal
    /// print heads consume. Trailing bits of a partial byte stay 0.
    pub fn packed_rows(&self) -> Vec<Vec<u8>> {
        let (w, h) = self.0.dimensions();
        let row_bytes = w.div_ceil(8);
        (0..h)
            .map(|y| {
                (0..row_bytes)
                    .map(|byte_idx| {
                        let mut byte = 0u8;
                        for bit in 0..8 {
                            let x = byte_idx * 8 + bit;
                            if x < w && self.0.get_pixel(x, y).0[0] == 0 {
                                byte |= 1 << (7 - bit);
                            }
                        }
                        byte
                    })
                    .collect()
            })
            .collect()
    }
}
