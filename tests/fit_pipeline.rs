//! End-to-end tests of the square-fit pipeline
//!
//! Exercises the public API from decoded input through trimming, fitting,
//! encoding, and file output, including the documented upscale policy
//! trade-offs and degenerate-input handling.

use image::{DynamicImage, Rgba, RgbaImage};
use squarefit::{
    alpha_bounding_box, fit_from_bytes, fit_from_path, fit_image, Background, FitConfig, FitMode,
    OutputFormat, Result, SquareFitError, SquareFitProcessor,
};
use tempfile::TempDir;

const OPAQUE_BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Transparent frame around an opaque content block
fn framed_image(width: u32, height: u32, margin: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    for y in margin..height - margin {
        for x in margin..width - margin {
            image.put_pixel(x, y, OPAQUE_BLUE);
        }
    }
    image
}

#[test]
fn test_contain_pipeline_from_bytes() -> Result<()> {
    let png = encode_png(&framed_image(200, 100, 10));
    let config = FitConfig::builder().size(600).allow_upscale(true).build()?;

    let result = fit_from_bytes(&png, &config)?;

    assert_eq!(result.dimensions(), (600, 600));
    assert_eq!(result.original_dimensions, (200, 100));
    assert_eq!(result.trimmed_dimensions, (180, 80));
    assert!(result.metadata.timings.total_ms >= result.metadata.timings.fit_ms);
    Ok(())
}

#[test]
fn test_wide_image_contain_scenario() -> Result<()> {
    // 300x100 opaque, contain, size 600, upscale: content 600x200 centered
    // with 200px transparent padding above and below
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 100, OPAQUE_BLUE));
    let config = FitConfig::builder()
        .size(600)
        .allow_upscale(true)
        .background(Background::TRANSPARENT)
        .build()?;

    let result = fit_image(&image, &config)?;
    assert_eq!(result.dimensions(), (600, 600));

    let bbox = alpha_bounding_box(&result.image).unwrap();
    assert_eq!((bbox.width(), bbox.height()), (600, 200));
    assert_eq!(bbox.top, 200);
    assert_eq!(bbox.bottom, 400);
    Ok(())
}

#[test]
fn test_cover_downscale_ignores_upscale_flag() -> Result<()> {
    // 1200x1200, cover, size 600, no upscale: downscaling is always allowed
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1200, 1200, OPAQUE_BLUE));
    let config = FitConfig::builder().mode(FitMode::Cover).size(600).build()?;

    let result = fit_image(&image, &config)?;
    assert_eq!(result.dimensions(), (600, 600));
    Ok(())
}

#[test]
fn test_cover_never_enlarges_small_input() -> Result<()> {
    // 50x50, cover, size 600, no upscale: stays 50x50
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, OPAQUE_BLUE));
    let config = FitConfig::builder().mode(FitMode::Cover).size(600).build()?;

    let result = fit_image(&image, &config)?;
    assert_eq!(result.dimensions(), (50, 50));
    Ok(())
}

#[test]
fn test_contain_output_size_invariant_across_inputs() -> Result<()> {
    let config = FitConfig::builder().size(128).build()?;
    let processor = SquareFitProcessor::new(config)?;

    for (w, h) in [(1, 1), (10, 500), (500, 10), (128, 128), (129, 127)] {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, OPAQUE_BLUE));
        let result = processor.process_image(&image)?;
        assert_eq!(result.dimensions(), (128, 128), "input {}x{}", w, h);
    }
    Ok(())
}

#[test]
fn test_round_trip_through_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = temp_dir.path().join("input.png");
    let output_path = temp_dir.path().join("output.png");

    framed_image(120, 80, 20).save_with_format(&input_path, image::ImageFormat::Png)?;

    let config = FitConfig::builder()
        .size(64)
        .background(Background::WHITE)
        .build()?;
    let mut result = fit_from_path(&input_path, &config)?;
    assert_eq!(result.input_path.as_deref(), Some(input_path.to_str().unwrap()));

    result.save(&output_path, OutputFormat::Png, 100)?;
    assert!(result.metadata.timings.image_encode_ms.is_some());

    let reloaded = image::open(&output_path)?.to_rgba8();
    assert_eq!(reloaded.dimensions(), (64, 64));
    assert_eq!(reloaded, result.image);
    Ok(())
}

#[test]
fn test_jpeg_output_flattens_alpha() -> Result<()> {
    let image = DynamicImage::ImageRgba8(framed_image(100, 100, 10));
    let config = FitConfig::builder()
        .size(50)
        .background(Background::WHITE)
        .output_format(OutputFormat::Jpeg)
        .build()?;

    let result = fit_image(&image, &config)?;
    let bytes = result.to_bytes(OutputFormat::Jpeg, 90)?;

    let decoded = image::load_from_memory(&bytes)?;
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
    assert_eq!(decoded.to_rgba8().dimensions(), (50, 50));
    Ok(())
}

#[test]
fn test_fully_transparent_input_survives_pipeline() -> Result<()> {
    // Degenerate input: the trim stage returns it unchanged and the fit
    // stage still produces a full-size canvas
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 30, Rgba([0, 0, 0, 0])));
    let config = FitConfig::builder().size(100).build()?;

    let result = fit_image(&image, &config)?;
    assert_eq!(result.trimmed_dimensions, (40, 30));
    assert_eq!(result.dimensions(), (100, 100));
    assert!(result.image.pixels().all(|p| p[3] == 0));
    Ok(())
}

#[test]
fn test_zero_area_image_is_invalid() {
    let image = DynamicImage::new_rgba8(0, 0);
    let config = FitConfig::default();

    let result = fit_image(&image, &config);
    assert!(matches!(result, Err(SquareFitError::InvalidImage(_))));
}

#[test]
fn test_undecodable_bytes_are_rejected() {
    let config = FitConfig::default();
    let result = fit_from_bytes(b"\x89PNG but not really", &config);
    assert!(matches!(result, Err(SquareFitError::Image(_))));
}

#[test]
fn test_contain_idempotence_on_fitted_output() -> Result<()> {
    let config = FitConfig::builder()
        .size(200)
        .allow_upscale(true)
        .background(Background::WHITE)
        .build()?;
    let processor = SquareFitProcessor::new(config)?;

    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 120, OPAQUE_BLUE));
    let once = processor.process_image(&image)?;
    let twice = processor.process_image(&DynamicImage::ImageRgba8(once.image.clone()))?;

    assert_eq!(once.image, twice.image);
    Ok(())
}

#[test]
fn test_aspect_ratio_preserved_within_rounding() -> Result<()> {
    let config = FitConfig::builder().size(600).allow_upscale(true).build()?;
    let processor = SquareFitProcessor::new(config)?;

    for (w, h) in [(320, 240), (240, 320), (700, 100)] {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, OPAQUE_BLUE));
        let result = processor.process_image(&image)?;
        let bbox = alpha_bounding_box(&result.image).unwrap();

        let input_ratio = f64::from(w) / f64::from(h);
        let content_ratio = f64::from(bbox.width()) / f64::from(bbox.height());
        // Within one pixel of rounding on either axis
        let tolerance = input_ratio * (1.0 / f64::from(bbox.height().min(bbox.width())) + 0.01);
        assert!(
            (input_ratio - content_ratio).abs() <= tolerance,
            "input {}x{}: ratio {} vs {}",
            w,
            h,
            input_ratio,
            content_ratio
        );
    }
    Ok(())
}

#[test]
fn test_metadata_serializes_to_json() -> Result<()> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, OPAQUE_BLUE));
    let config = FitConfig::builder().size(20).allow_upscale(true).build()?;

    let result = fit_image(&image, &config)?;
    let json = serde_json::to_string(&result.metadata).unwrap();
    assert!(json.contains("\"fit_mode\":\"Contain\""));
    assert!(json.contains("\"target_size\":20"));
    Ok(())
}
