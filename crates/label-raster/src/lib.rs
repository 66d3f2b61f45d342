//! Image-to-printable-raster pipeline for monochrome thermal label printers.
//!
//! Turns decoded photographs (RGB/RGBA/grayscale) into 1-bit rasters that
//! match a fixed print-head width: alpha flattening, width fitting, tonal
//! correction, binarization (threshold or Floyd-Steinberg dithering), and
//! raster compositing. Every transform is a pure function returning a fresh
//! buffer; identical input and parameters always produce bit-identical output.

pub mod compose;
pub mod dither;
pub mod flatten;
pub mod mode;
pub mod resize;
pub mod rotate;
pub mod tone;

// Re-exports for convenience
pub use compose::{add_border, concat_vertical};
pub use dither::{Prepared, floyd_steinberg_dither, prepare, threshold};
pub use flatten::flatten_onto_white;
pub use mode::{BilevelImage, ColorMode};
pub use resize::{fit_to_physical_width, fit_to_width};
pub use rotate::{Rotation, rotate_for_print};
pub use tone::{apply_histogram_equalization, apply_levels};

/// Default print resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Millimeters per inch, for physical-width conversion.
pub(crate) const MM_PER_INCH: f64 = 25.4;

/// Errors reported by the raster pipeline.
///
/// All of these are structural or configuration errors surfaced to the
/// caller immediately; no transform retries or returns a partial buffer.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Computed raster dimensions are degenerate: {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    #[error("White point {white} must be above black point {black}")]
    InvalidRange { black: u8, white: u8 },

    #[error("Unsupported color mode: {0}")]
    UnsupportedMode(String),
}
