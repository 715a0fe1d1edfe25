//! Alpha trimming and square-fit geometry
//!
//! The three operations here are pure transforms over RGBA buffers: trim the
//! fully-transparent border, then fit the result onto a square canvas either
//! by padding (`Contain`) or by center-cropping (`Cover`). The sequencing
//! contract is trim first, then exactly one fit operation.

use crate::{
    config::Background,
    error::{Result, SquareFitError},
};
use image::{imageops, RgbaImage};

/// Resampling filter for all scaling operations
const RESAMPLE_FILTER: imageops::FilterType = imageops::FilterType::Lanczos3;

/// Half-open pixel bounds of the non-transparent region of an image
///
/// `right` and `bottom` are exclusive, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// Width of the box in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the box in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Find the minimal bounding box enclosing all pixels with alpha above zero
///
/// Returns `None` for a fully transparent (or zero-area) image.
#[must_use]
pub fn alpha_bounding_box(image: &RgbaImage) -> Option<BoundingBox> {
    let (width, height) = image.dimensions();

    let mut left = width;
    let mut top = height;
    let mut right = 0u32;
    let mut bottom = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            found = true;
            left = left.min(x);
            top = top.min(y);
            right = right.max(x + 1);
            bottom = bottom.max(y + 1);
        }
    }

    found.then_some(BoundingBox { left, top, right, bottom })
}

/// Remove fully-transparent rows and columns from the outer edge of an image
///
/// Crops to the tightest bounding box of visible content so that subsequent
/// fitting does not waste canvas area on invisible padding. A fully
/// transparent image is returned unchanged rather than collapsed to zero
/// size; fully opaque images are a no-op copy.
#[must_use]
pub fn trim_alpha(image: &RgbaImage) -> RgbaImage {
    match alpha_bounding_box(image) {
        Some(bbox) if (bbox.width(), bbox.height()) != image.dimensions() => {
            log::debug!(
                "Trimming transparent border: {}x{} -> {}x{}",
                image.width(),
                image.height(),
                bbox.width(),
                bbox.height()
            );
            imageops::crop_imm(image, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image()
        },
        _ => image.clone(),
    }
}

/// Fit an image entirely within a `size`×`size` square, padding the remainder
///
/// The content is scaled by `min(size/width, size/height)` with aspect ratio
/// preserved, then centered on a canvas filled with `background`. When
/// `allow_upscale` is false the scale is clamped to 1.0, so content smaller
/// than the target is centered at its native resolution. The output is always
/// exactly `size`×`size`.
///
/// # Errors
/// - `InvalidImage` when the input has zero width or height
/// - `InvalidConfig` when `size` is zero
pub fn to_square_contain(
    image: &RgbaImage,
    size: u32,
    allow_upscale: bool,
    background: Background,
) -> Result<RgbaImage> {
    let (width, height) = validated_dimensions(image, size)?;

    let mut scale = f64::from(size) / f64::from(width);
    scale = scale.min(f64::from(size) / f64::from(height));
    if !allow_upscale {
        scale = scale.min(1.0);
    }

    let (new_width, new_height) = scaled_dimensions(width, height, scale);
    let resized = resize_if_needed(image, new_width, new_height);

    let mut canvas = RgbaImage::from_pixel(size, size, background.to_rgba());
    let offset_x = (size - new_width.min(size)) / 2;
    let offset_y = (size - new_height.min(size)) / 2;

    // Masked paste: composite the content over the background so partial
    // alpha blends instead of replacing the canvas pixel outright.
    imageops::overlay(&mut canvas, &resized, i64::from(offset_x), i64::from(offset_y));

    log::debug!(
        "Contain fit: {}x{} -> {}x{} content on {}x{} canvas ({})",
        width,
        height,
        new_width,
        new_height,
        size,
        size,
        background
    );

    Ok(canvas)
}

/// Scale an image to fully cover a `size`×`size` square, cropping the overflow
///
/// The content is scaled by `max(size/width, size/height)` and the result is
/// center-cropped to the target. When `allow_upscale` is false the scale is
/// clamped to 1.0; a source smaller than the target in both dimensions then
/// stays at its native size, which can leave the result smaller than
/// `size`×`size`. That never-enlarge trade-off is deliberate and part of the
/// contract.
///
/// # Errors
/// - `InvalidImage` when the input has zero width or height
/// - `InvalidConfig` when `size` is zero
pub fn to_square_cover(image: &RgbaImage, size: u32, allow_upscale: bool) -> Result<RgbaImage> {
    let (width, height) = validated_dimensions(image, size)?;

    let mut scale = f64::from(size) / f64::from(width);
    scale = scale.max(f64::from(size) / f64::from(height));
    if !allow_upscale {
        scale = scale.min(1.0);
    }

    let (new_width, new_height) = scaled_dimensions(width, height, scale);
    let resized = resize_if_needed(image, new_width, new_height);

    // Centered crop, shrinking the crop box where the no-upscale clamp left
    // the content smaller than the target.
    let crop_width = new_width.min(size);
    let crop_height = new_height.min(size);
    let crop_x = (new_width - crop_width) / 2;
    let crop_y = (new_height - crop_height) / 2;

    log::debug!(
        "Cover fit: {}x{} -> {}x{} content, cropped to {}x{}",
        width,
        height,
        new_width,
        new_height,
        crop_width,
        crop_height
    );

    if (crop_width, crop_height) == (new_width, new_height) {
        return Ok(resized);
    }
    Ok(imageops::crop_imm(&resized, crop_x, crop_y, crop_width, crop_height).to_image())
}

/// Reject degenerate inputs before any scale arithmetic
fn validated_dimensions(image: &RgbaImage, size: u32) -> Result<(u32, u32)> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(SquareFitError::invalid_image(format!(
            "zero-area input image ({}x{})",
            width, height
        )));
    }
    if size == 0 {
        return Err(SquareFitError::config_value_error(
            "target size",
            size,
            "1 or greater",
            Some(600),
        ));
    }
    Ok((width, height))
}

/// Round scaled dimensions to the nearest integer, floored at 1
fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let new_width = (f64::from(width) * scale).round().max(1.0) as u32;
    let new_height = (f64::from(height) * scale).round().max(1.0) as u32;
    (new_width, new_height)
}

/// Resize with the shared filter, skipping the resample at identity scale
fn resize_if_needed(image: &RgbaImage, new_width: u32, new_height: u32) -> RgbaImage {
    if (new_width, new_height) == image.dimensions() {
        image.clone()
    } else {
        imageops::resize(image, new_width, new_height, RESAMPLE_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const OPAQUE_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Transparent canvas with an opaque block at the given offset
    fn image_with_block(
        width: u32,
        height: u32,
        block: (u32, u32, u32, u32), // (x, y, w, h)
    ) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(width, height, CLEAR);
        for y in block.1..block.1 + block.3 {
            for x in block.0..block.0 + block.2 {
                image.put_pixel(x, y, OPAQUE_RED);
            }
        }
        image
    }

    #[test]
    fn test_alpha_bounding_box_finds_content() {
        let image = image_with_block(10, 10, (2, 3, 4, 5));
        let bbox = alpha_bounding_box(&image).unwrap();
        assert_eq!(bbox, BoundingBox { left: 2, top: 3, right: 6, bottom: 8 });
        assert_eq!(bbox.width(), 4);
        assert_eq!(bbox.height(), 5);
    }

    #[test]
    fn test_alpha_bounding_box_fully_transparent() {
        let image = RgbaImage::from_pixel(8, 8, CLEAR);
        assert!(alpha_bounding_box(&image).is_none());
    }

    #[test]
    fn test_trim_alpha_crops_to_content() {
        let image = image_with_block(20, 10, (5, 2, 6, 3));
        let trimmed = trim_alpha(&image);
        assert_eq!(trimmed.dimensions(), (6, 3));
        assert!(trimmed.pixels().all(|p| *p == OPAQUE_RED));
    }

    #[test]
    fn test_trim_alpha_output_never_larger() {
        let image = image_with_block(33, 17, (1, 1, 30, 15));
        let trimmed = trim_alpha(&image);
        assert!(trimmed.width() <= image.width());
        assert!(trimmed.height() <= image.height());
    }

    #[test]
    fn test_trim_alpha_opaque_is_identity() {
        let image = RgbaImage::from_pixel(7, 5, OPAQUE_RED);
        let trimmed = trim_alpha(&image);
        assert_eq!(trimmed, image);
    }

    #[test]
    fn test_trim_alpha_fully_transparent_returns_input() {
        // Degenerate input: no zero-size output, the original comes back
        let image = RgbaImage::from_pixel(4, 6, CLEAR);
        let trimmed = trim_alpha(&image);
        assert_eq!(trimmed.dimensions(), (4, 6));
    }

    #[test]
    fn test_contain_output_is_always_target_size() {
        for (w, h) in [(300, 100), (100, 300), (601, 599), (50, 50), (1, 1)] {
            let image = RgbaImage::from_pixel(w, h, OPAQUE_RED);
            let out = to_square_contain(&image, 600, true, Background::TRANSPARENT).unwrap();
            assert_eq!(out.dimensions(), (600, 600), "input {}x{}", w, h);
        }
    }

    #[test]
    fn test_contain_wide_image_centered_with_padding() {
        // 300x100 opaque, size 600, upscale allowed: content becomes 600x200,
        // vertically centered with 200px transparent padding above and below.
        let image = RgbaImage::from_pixel(300, 100, OPAQUE_RED);
        let out = to_square_contain(&image, 600, true, Background::TRANSPARENT).unwrap();

        assert_eq!(out.dimensions(), (600, 600));
        assert_eq!(out.get_pixel(300, 100)[3], 0); // padding above
        assert_eq!(out.get_pixel(300, 500)[3], 0); // padding below
        assert_eq!(*out.get_pixel(300, 300), OPAQUE_RED); // content center
        assert_eq!(out.get_pixel(300, 200)[3], 255); // content top edge
        assert_eq!(out.get_pixel(300, 399)[3], 255); // content bottom edge
    }

    #[test]
    fn test_contain_preserves_aspect_ratio() {
        let image = RgbaImage::from_pixel(400, 100, OPAQUE_RED);
        let out = to_square_contain(&image, 600, true, Background::TRANSPARENT).unwrap();

        let bbox = alpha_bounding_box(&out).unwrap();
        // 4:1 content scaled to 600 wide should be 150 tall, within rounding
        assert_eq!(bbox.width(), 600);
        assert!((i64::from(bbox.height()) - 150).abs() <= 1);
    }

    #[test]
    fn test_contain_no_upscale_keeps_native_size() {
        let image = RgbaImage::from_pixel(50, 30, OPAQUE_RED);
        let out = to_square_contain(&image, 600, false, Background::TRANSPARENT).unwrap();

        assert_eq!(out.dimensions(), (600, 600));
        let bbox = alpha_bounding_box(&out).unwrap();
        assert_eq!((bbox.width(), bbox.height()), (50, 30));
        // Centered: (600-50)/2 = 275, (600-30)/2 = 285
        assert_eq!((bbox.left, bbox.top), (275, 285));
    }

    #[test]
    fn test_contain_background_fill() {
        let image = RgbaImage::from_pixel(100, 100, OPAQUE_RED);
        let out = to_square_contain(&image, 300, false, Background::WHITE).unwrap();

        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*out.get_pixel(150, 150), OPAQUE_RED);
    }

    #[test]
    fn test_contain_idempotent_on_fitted_image() {
        let image = RgbaImage::from_pixel(300, 100, OPAQUE_RED);
        let once = to_square_contain(&image, 600, true, Background::WHITE).unwrap();
        let twice = to_square_contain(&once, 600, true, Background::WHITE).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cover_exact_target_when_upscaling_allowed() {
        for (w, h) in [(300, 100), (100, 300), (1200, 1200), (50, 50)] {
            let image = RgbaImage::from_pixel(w, h, OPAQUE_RED);
            let out = to_square_cover(&image, 600, true).unwrap();
            assert_eq!(out.dimensions(), (600, 600), "input {}x{}", w, h);
        }
    }

    #[test]
    fn test_cover_downscale_permitted_without_upscale_flag() {
        // 1200x1200 with no-upscale still shrinks: the clamp only forbids
        // enlarging, scale < 1 passes through.
        let image = RgbaImage::from_pixel(1200, 1200, OPAQUE_RED);
        let out = to_square_cover(&image, 600, false).unwrap();
        assert_eq!(out.dimensions(), (600, 600));
    }

    #[test]
    fn test_cover_small_input_stays_native_without_upscale() {
        // Documented trade-off: never enlarge, even though the result is
        // smaller than the target square.
        let image = RgbaImage::from_pixel(50, 50, OPAQUE_RED);
        let out = to_square_cover(&image, 600, false).unwrap();
        assert_eq!(out.dimensions(), (50, 50));
        assert_eq!(out, image);
    }

    #[test]
    fn test_cover_crops_overflow_centered() {
        // 400x800 no-upscale: scale clamps to 1.0, height crops to 600
        let mut image = RgbaImage::from_pixel(400, 800, CLEAR);
        image.put_pixel(200, 400, OPAQUE_RED); // source center survives the crop
        let out = to_square_cover(&image, 600, false).unwrap();

        assert_eq!(out.dimensions(), (400, 600));
        assert_eq!(*out.get_pixel(200, 300), OPAQUE_RED);
    }

    #[test]
    fn test_zero_area_input_rejected() {
        let image = RgbaImage::new(0, 10);
        assert!(matches!(
            to_square_contain(&image, 600, false, Background::TRANSPARENT),
            Err(SquareFitError::InvalidImage(_))
        ));
        assert!(matches!(
            to_square_cover(&image, 600, false),
            Err(SquareFitError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_zero_target_size_rejected() {
        let image = RgbaImage::from_pixel(10, 10, OPAQUE_RED);
        assert!(matches!(
            to_square_contain(&image, 0, false, Background::TRANSPARENT),
            Err(SquareFitError::InvalidConfig(_))
        ));
        assert!(matches!(
            to_square_cover(&image, 0, false),
            Err(SquareFitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_extreme_aspect_ratio_floors_at_one_pixel() {
        // 1000x1 at size 10: height would round to 0 without the floor
        let image = RgbaImage::from_pixel(1000, 1, OPAQUE_RED);
        let out = to_square_contain(&image, 10, false, Background::TRANSPARENT).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
        let bbox = alpha_bounding_box(&out).unwrap();
        assert!(bbox.height() >= 1);
    }

    #[test]
    fn test_trim_then_contain_pipeline() {
        // Content block with transparent border, trimmed then fitted
        let image = image_with_block(200, 200, (50, 75, 100, 50));
        let trimmed = trim_alpha(&image);
        assert_eq!(trimmed.dimensions(), (100, 50));

        let out = to_square_contain(&trimmed, 600, true, Background::TRANSPARENT).unwrap();
        assert_eq!(out.dimensions(), (600, 600));
        let bbox = alpha_bounding_box(&out).unwrap();
        assert_eq!(bbox.width(), 600);
        assert!((i64::from(bbox.height()) - 300).abs() <= 1);
    }
}
