//! Output format handling service

use crate::config::{Background, OutputFormat};
use image::{DynamicImage, RgbaImage};

/// Service for handling output format conversions
pub struct OutputFormatHandler;

impl OutputFormatHandler {
    /// Convert an RGBA image to the pixel layout of the target format
    ///
    /// JPEG output drops the alpha channel; the alpha-capable formats keep
    /// the buffer as-is.
    #[must_use]
    pub fn convert_format(rgba_image: RgbaImage, format: OutputFormat) -> DynamicImage {
        match format {
            OutputFormat::Png | OutputFormat::WebP => DynamicImage::ImageRgba8(rgba_image),
            OutputFormat::Jpeg => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba_image).to_rgb8())
            },
        }
    }

    /// Get the appropriate file extension for a given output format
    #[must_use]
    pub fn get_extension(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
        }
    }

    /// Check if a format supports transparency (alpha channel)
    #[must_use]
    pub fn supports_transparency(format: OutputFormat) -> bool {
        match format {
            OutputFormat::Png | OutputFormat::WebP => true,
            OutputFormat::Jpeg => false,
        }
    }

    /// Warn when a Contain fit pairs a transparent padding background with a
    /// format that cannot represent it
    pub fn validate_for_contain(format: OutputFormat, background: Background) {
        if background.is_transparent() && !Self::supports_transparency(format) {
            log::warn!(
                "Output format {:?} does not support transparency; transparent Contain padding will render as a solid color.",
                format
            );
        }
    }

    /// Get the recommended quality settings for a format
    ///
    /// Returns `(default, min, max)` where applicable, `None` for lossless
    /// formats that take no quality setting.
    #[must_use]
    pub fn get_quality_range(format: OutputFormat) -> Option<(u8, u8, u8)> {
        match format {
            OutputFormat::Jpeg => Some((90, 0, 100)),
            OutputFormat::WebP => Some((85, 0, 100)),
            OutputFormat::Png => None, // Lossless
        }
    }
}
