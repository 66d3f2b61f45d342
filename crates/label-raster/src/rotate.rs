//! Rotation for reprint flows.
//!
//! The grayscale copy kept by [`crate::prepare`] can be reprinted rotated,
//! e.g. turning a portrait capture sideways on the label.

use image::DynamicImage;
use tracing::debug;

/// Rotation applied before reprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    /// Quarter turn clockwise.
    Cw90,
    /// Half turn.
    Half,
    /// Quarter turn counter-clockwise.
    Ccw90,
}

/// Rotate an image for printing. Pure; quarter turns swap the dimensions.
pub fn rotate_for_print(img: &DynamicImage, rotation: Rotation) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    debug!(w, h, ?rotation, "Rotating image for print");

    match rotation {
        Rotation::None => img.clone(),
        Rotation::Cw90 => img.rotate90(),
        Rotation::Half => img.rotate180(),
        Rotation::Ccw90 => img.rotate270(),
    }
}
