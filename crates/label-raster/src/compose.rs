//! Raster compositing — border framing and vertical stacking.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tracing::debug;

use crate::RasterError;
use crate::mode::ColorMode;

/// Frame an image with an ink-colored border of `border_width` pixels on
/// all four sides.
///
/// "Ink" means the minimum value for the buffer's mode, so the border
/// prints black whether the input is bilevel, grayscale, or color.
pub fn add_border(img: &DynamicImage, border_width: u32) -> Result<DynamicImage, RasterError> {
    let w = img.width() + 2 * border_width;
    let h = img.height() + 2 * border_width;
    debug!(border_width, w, h, "Adding border");

    let offset = i64::from(border_width);
    let bordered = match ColorMode::of(img)? {
        ColorMode::Grayscale | ColorMode::Bilevel => {
            let mut canvas = GrayImage::from_pixel(w, h, Luma([0]));
            image::imageops::replace(&mut canvas, &img.to_luma8(), offset, offset);
            DynamicImage::ImageLuma8(canvas)
        }
        ColorMode::Rgb => {
            let mut canvas = RgbImage::from_pixel(w, h, Rgb([0, 0, 0]));
            image::imageops::replace(&mut canvas, &img.to_rgb8(), offset, offset);
            DynamicImage::ImageRgb8(canvas)
        }
        ColorMode::Rgba => {
            let mut canvas = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));
            image::imageops::replace(&mut canvas, &img.to_rgba8(), offset, offset);
            DynamicImage::ImageRgba8(canvas)
        }
    };
    Ok(bordered)
}

/// Stack `bottom`, resized to a `bottom_size` square, beneath `top`.
///
/// The output keeps `top`'s width. Used to append a fixed-size graphic
/// (logo, QR code) below a printed image; any area the bottom graphic does
/// not cover stays white.
pub fn concat_vertical(
    top: &DynamicImage,
    bottom: &DynamicImage,
    bottom_size: u32,
) -> Result<DynamicImage, RasterError> {
    if bottom_size == 0 {
        return Err(RasterError::InvalidDimension {
            width: i64::from(bottom_size),
            height: i64::from(bottom_size),
        });
    }
    ColorMode::of(top)?;
    ColorMode::of(bottom)?;

    let w = top.width();
    let h = top.height() + bottom_size;
    debug!(w, h, bottom_size, "Concatenating rasters vertically");

    let mut canvas = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
    image::imageops::replace(&mut canvas, &top.to_rgb8(), 0, 0);

    let logo = bottom.resize_exact(bottom_size, bottom_size, FilterType::Lanczos3);
    image::imageops::replace(&mut canvas, &logo.to_rgb8(), 0, i64::from(top.height()));

    Ok(DynamicImage::ImageRgb8(canvas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrcode::QrCode;

    /// Render a QR code into a grayscale image, one pixel per module.
    fn create_qr_image(data: &str) -> DynamicImage {
        let code = QrCode::new(data.as_bytes()).unwrap();
        let modules = code.to_colors();
        let side = code.width() as u32;

        let mut img = GrayImage::from_pixel(side, side, Luma([255]));
        for (i, color) in modules.iter().enumerate() {
            if *color == qrcode::Color::Dark {
                img.put_pixel(i as u32 % side, i as u32 / side, Luma([0]));
            }
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn border_grows_dimensions_on_all_sides() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 6, Luma([200])));
        let result = add_border(&img, 3).unwrap();
        assert_eq!((result.width(), result.height()), (16, 12));
    }

    #[test]
    fn border_region_is_ink_and_interior_is_intact() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([200])));
        let result = add_border(&img, 1).unwrap();
        let gray = result.to_luma8();

        for x in 0..6 {
            assert_eq!(gray.get_pixel(x, 0).0[0], 0);
            assert_eq!(gray.get_pixel(x, 5).0[0], 0);
        }
        for y in 0..6 {
            assert_eq!(gray.get_pixel(0, y).0[0], 0);
            assert_eq!(gray.get_pixel(5, y).0[0], 0);
        }
        for y in 1..5 {
            for x in 1..5 {
                assert_eq!(gray.get_pixel(x, y).0[0], 200);
            }
        }
    }

    #[test]
    fn border_on_color_input_is_black() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([10, 200, 90])));
        let result = add_border(&img, 2).unwrap();
        let rgb = result.to_rgb8();

        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(7, 7).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(3, 3).0, [10, 200, 90]);
    }

    #[test]
    fn border_of_zero_width_is_a_copy() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(5, 5, Luma([42])));
        let result = add_border(&img, 0).unwrap();
        assert_eq!(result.to_luma8(), img.to_luma8());
    }

    #[test]
    fn concat_keeps_top_width_and_sums_heights() {
        let top = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 40, Luma([0])));
        let bottom = DynamicImage::ImageLuma8(GrayImage::from_pixel(30, 30, Luma([128])));
        let result = concat_vertical(&top, &bottom, 100).unwrap();
        assert_eq!((result.width(), result.height()), (100, 140));
    }

    #[test]
    fn concat_preserves_top_and_places_bottom_square() {
        let top = DynamicImage::ImageLuma8(GrayImage::from_pixel(60, 20, Luma([0])));
        let bottom = DynamicImage::ImageLuma8(GrayImage::from_pixel(7, 7, Luma([100])));
        let result = concat_vertical(&top, &bottom, 40).unwrap();
        let rgb = result.to_rgb8();

        // Top region is the original raster.
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(59, 19).0, [0, 0, 0]);
        // Bottom-left 40x40 is the resized graphic (uniform, so resize-stable).
        assert_eq!(rgb.get_pixel(0, 20).0, [100, 100, 100]);
        assert_eq!(rgb.get_pixel(39, 59).0, [100, 100, 100]);
        // Right of the graphic stays white.
        assert_eq!(rgb.get_pixel(40, 30).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(59, 59).0, [255, 255, 255]);
    }

    #[test]
    fn concat_appends_a_qr_code_below_a_label() {
        let label = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 80, Luma([255])));
        let qr = create_qr_image("https://example.com/sticker");
        let result = concat_vertical(&label, &qr, 200).unwrap();

        assert_eq!((result.width(), result.height()), (200, 280));
        // The QR region contains both ink and blank pixels.
        let rgb = result.to_rgb8();
        let region: Vec<u8> = (80u32..280)
            .flat_map(|y| (0u32..200).map(move |x| (x, y)))
            .map(|(x, y)| rgb.get_pixel(x, y).0[0])
            .collect();
        assert!(region.iter().any(|&v| v < 64));
        assert!(region.iter().any(|&v| v > 192));
    }

    #[test]
    fn concat_rejects_zero_bottom_size() {
        let top = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([0])));
        let bottom = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([0])));
        let err = concat_vertical(&top, &bottom, 0).unwrap_err();
        assert!(matches!(err, RasterError::InvalidDimension { .. }));
    }
}
