//! Square-fit processing pipeline
//!
//! Wires the geometry stages into a single pass over one image: decode (when
//! starting from bytes or a path), alpha trim, then the configured fit
//! operation, with per-stage timing capture. Each invocation is independent
//! and synchronous; no state is retained across calls.

use crate::{
    config::{FitConfig, FitMode},
    error::Result,
    geometry,
    types::{FitResult, ProcessingMetadata, ProcessingTimings},
};
use image::DynamicImage;
use std::path::Path;
use std::time::Instant;

/// Main processor for square-fit operations
#[derive(Debug, Clone)]
pub struct SquareFitProcessor {
    config: FitConfig,
}

impl SquareFitProcessor {
    /// Create a new processor with a validated configuration
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the configuration fails validation
    /// (zero target size, out-of-range quality values).
    pub fn new(config: FitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Access the active configuration
    #[must_use]
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Trim and fit a pre-loaded image
    ///
    /// # Errors
    /// - `InvalidImage` for zero-area input reaching the geometry stage
    pub fn process_image(&self, image: &DynamicImage) -> Result<FitResult> {
        let total_start = Instant::now();
        let mut metadata = ProcessingMetadata::new(
            self.config.mode,
            self.config.size,
            self.config.allow_upscale,
        );
        let mut timings = ProcessingTimings::new();

        metadata.input_format = Self::detect_pixel_format(image);
        metadata.output_format = format!("{:?}", self.config.output_format).to_lowercase();

        let rgba = image.to_rgba8();
        let original_dimensions = rgba.dimensions();

        tracing::debug!(
            width = original_dimensions.0,
            height = original_dimensions.1,
            mode = %self.config.mode,
            size = self.config.size,
            "starting square-fit pipeline"
        );

        // 1. Alpha trim
        let trim_start = Instant::now();
        let trimmed = geometry::trim_alpha(&rgba);
        let trimmed_dimensions = trimmed.dimensions();
        timings.trim_ms = trim_start.elapsed().as_millis() as u64;

        // 2. Square fit
        let fit_start = Instant::now();
        let fitted = match self.config.mode {
            FitMode::Contain => geometry::to_square_contain(
                &trimmed,
                self.config.size,
                self.config.allow_upscale,
                self.config.background,
            )?,
            FitMode::Cover => {
                geometry::to_square_cover(&trimmed, self.config.size, self.config.allow_upscale)?
            },
        };
        timings.fit_ms = fit_start.elapsed().as_millis() as u64;
        timings.total_ms = total_start.elapsed().as_millis() as u64;

        tracing::debug!(
            trim_ms = timings.trim_ms,
            fit_ms = timings.fit_ms,
            out_width = fitted.width(),
            out_height = fitted.height(),
            "square-fit pipeline completed"
        );

        metadata.set_timings(timings);

        Ok(FitResult::new(
            fitted,
            original_dimensions,
            trimmed_dimensions,
            metadata,
        ))
    }

    /// Decode an image from raw bytes and process it
    ///
    /// # Errors
    /// - `Image` for undecodable input bytes
    /// - `InvalidImage` for zero-area input
    pub fn process_bytes(&self, image_bytes: &[u8]) -> Result<FitResult> {
        let decode_start = Instant::now();
        let image = image::load_from_memory(image_bytes)?;
        let decode_ms = decode_start.elapsed().as_millis() as u64;

        let mut result = self.process_image(&image)?;
        result.metadata.timings.image_decode_ms = decode_ms;
        result.metadata.timings.total_ms += decode_ms;
        Ok(result)
    }

    /// Load an image from a file and process it
    ///
    /// # Errors
    /// - `Io` / `Image` for unreadable or undecodable files
    /// - `InvalidImage` for zero-area input
    pub fn process_path<P: AsRef<Path>>(&self, input_path: P) -> Result<FitResult> {
        let input_path_str = input_path.as_ref().display().to_string();

        let decode_start = Instant::now();
        let image = crate::services::ImageIOService::load_image(&input_path)?;
        let decode_ms = decode_start.elapsed().as_millis() as u64;

        log::info!("Processing: {} ({})", input_path_str, self.config.mode);

        let mut result = self.process_image(&image)?;
        result.metadata.timings.image_decode_ms = decode_ms;
        result.metadata.timings.total_ms += decode_ms;
        result.input_path = Some(input_path_str);
        Ok(result)
    }

    /// Detect pixel layout of a decoded image, for metadata only
    fn detect_pixel_format(image: &DynamicImage) -> String {
        match image {
            DynamicImage::ImageRgb8(_) => "rgb8".to_string(),
            DynamicImage::ImageRgba8(_) => "rgba8".to_string(),
            DynamicImage::ImageLuma8(_) => "luma8".to_string(),
            DynamicImage::ImageLumaA8(_) => "luma_a8".to_string(),
            _ => "unknown".to_string(),
        }
    }
}
