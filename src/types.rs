//! Core types for square-fit processing

use crate::{
    config::{FitMode, OutputFormat},
    error::Result,
};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a square-fit operation
#[derive(Debug, Clone)]
pub struct FitResult {
    /// The fitted output image
    pub image: RgbaImage,

    /// Original image dimensions before trimming
    pub original_dimensions: (u32, u32),

    /// Dimensions after the alpha trim stage
    pub trimmed_dimensions: (u32, u32),

    /// Processing metadata
    pub metadata: ProcessingMetadata,

    /// Original input path (for logging purposes)
    pub input_path: Option<String>,
}

impl FitResult {
    /// Create a new fit result
    #[must_use]
    pub fn new(
        image: RgbaImage,
        original_dimensions: (u32, u32),
        trimmed_dimensions: (u32, u32),
        metadata: ProcessingMetadata,
    ) -> Self {
        Self {
            image,
            original_dimensions,
            trimmed_dimensions,
            metadata,
            input_path: None,
        }
    }

    /// Create a new fit result carrying the input path
    #[must_use]
    pub fn with_input_path(
        image: RgbaImage,
        original_dimensions: (u32, u32),
        trimmed_dimensions: (u32, u32),
        metadata: ProcessingMetadata,
        input_path: String,
    ) -> Self {
        Self {
            image,
            original_dimensions,
            trimmed_dimensions,
            metadata,
            input_path: Some(input_path),
        }
    }

    /// Get output image dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Save the result as PNG with alpha channel
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Save in the specified format, recording the encode time
    pub fn save<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: OutputFormat,
        quality: u8,
    ) -> Result<()> {
        let encode_start = std::time::Instant::now();
        let bytes = self.to_bytes(format, quality)?;
        crate::services::ImageIOService::save_bytes(path, &bytes)?;
        self.metadata.timings.image_encode_ms = Some(encode_start.elapsed().as_millis() as u64);
        Ok(())
    }

    /// Get the image as encoded bytes in the specified format
    pub fn to_bytes(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        match format {
            OutputFormat::Png => {
                self.image.write_to(&mut cursor, image::ImageFormat::Png)?;
            },
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel; flatten before encoding
                let rgb_image =
                    image::DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
                let mut jpeg_encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
                jpeg_encoder.encode_image(&rgb_image)?;
            },
            OutputFormat::WebP => {
                #[cfg(feature = "webp-support")]
                self.image.write_to(&mut cursor, image::ImageFormat::WebP)?;
                #[cfg(not(feature = "webp-support"))]
                return Err(crate::error::SquareFitError::unsupported_format(
                    "WebP output requires the webp-support feature",
                ));
            },
        }
        Ok(buffer)
    }

    /// Get the image as raw RGBA bytes
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.image.as_raw().clone()
    }

    /// Get detailed timing breakdown
    #[must_use]
    pub fn timings(&self) -> &ProcessingTimings {
        &self.metadata.timings
    }

    /// Get timing summary for display
    #[must_use]
    pub fn timing_summary(&self) -> String {
        let t = &self.metadata.timings;
        let breakdown = t.breakdown_percentages();

        let mut summary = format!(
            "Total: {}ms | Decode: {}ms ({:.1}%) | Trim: {}ms ({:.1}%) | Fit: {}ms ({:.1}%)",
            t.total_ms,
            t.image_decode_ms,
            breakdown.decode_pct,
            t.trim_ms,
            breakdown.trim_pct,
            t.fit_ms,
            breakdown.fit_pct
        );

        if let Some(encode_ms) = t.image_encode_ms {
            summary.push_str(&format!(" | Encode: {}ms ({:.1}%)", encode_ms, breakdown.encode_pct));
        }

        summary
    }
}

/// Detailed timing breakdown for square-fit processing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingTimings {
    /// Image loading and decoding
    pub image_decode_ms: u64,

    /// Alpha trim stage
    pub trim_ms: u64,

    /// Square fit stage (resize plus pad or crop)
    pub fit_ms: u64,

    /// Final image encoding (if saving to file)
    pub image_encode_ms: Option<u64>,

    /// Total end-to-end processing time
    pub total_ms: u64,
}

impl ProcessingTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get breakdown percentages
    #[must_use]
    pub fn breakdown_percentages(&self) -> TimingBreakdown {
        if self.total_ms == 0 {
            return TimingBreakdown::default();
        }

        let total = self.total_ms as f64;
        TimingBreakdown {
            decode_pct: (self.image_decode_ms as f64 / total) * 100.0,
            trim_pct: (self.trim_ms as f64 / total) * 100.0,
            fit_pct: (self.fit_ms as f64 / total) * 100.0,
            encode_pct: (self.image_encode_ms.unwrap_or(0) as f64 / total) * 100.0,
        }
    }
}

/// Percentage breakdown of timing phases
#[derive(Debug, Clone, Default)]
pub struct TimingBreakdown {
    pub decode_pct: f64,
    pub trim_pct: f64,
    pub fit_pct: f64,
    pub encode_pct: f64,
}

/// Metadata about the processing operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Detailed timing breakdown
    pub timings: ProcessingTimings,

    /// Framing mode used
    pub fit_mode: FitMode,

    /// Target canvas size
    pub target_size: u32,

    /// Whether upscaling was permitted
    pub allow_upscale: bool,

    /// Input image format (pixel layout as decoded)
    pub input_format: String,

    /// Output image format
    pub output_format: String,
}

impl ProcessingMetadata {
    /// Create new processing metadata
    #[must_use]
    pub fn new(fit_mode: FitMode, target_size: u32, allow_upscale: bool) -> Self {
        Self {
            timings: ProcessingTimings::new(),
            fit_mode,
            target_size,
            allow_upscale,
            input_format: "unknown".to_string(),
            output_format: "png".to_string(),
        }
    }

    /// Set timing information
    pub fn set_timings(&mut self, timings: ProcessingTimings) {
        self.timings = timings;
    }
}
