#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Squarefit
//!
//! Alpha-trim and square-fit image geometry: take an image with an alpha
//! channel, trim its fully-transparent border, and fit the content onto a
//! fixed-size square canvas either by padding (`Contain`) or by
//! center-cropping (`Cover`), with an explicit upscaling policy.
//!
//! The crate is the geometry core of a cut-out publishing pipeline: an
//! upstream collaborator produces images with transparent backgrounds (for
//! example a segmentation model), this crate normalizes them to a uniform
//! square frame, and downstream collaborators encode, store, or upload the
//! result.
//!
//! ## Features
//!
//! - **Pure geometry**: `trim_alpha`, `to_square_contain`, `to_square_cover`
//!   are stateless transforms over RGBA buffers
//! - **Upscale policy**: small content is never enlarged unless explicitly
//!   allowed
//! - **Configurable padding**: Contain mode pads with any RGBA color,
//!   including fully transparent
//! - **Format support**: PNG, JPEG, and WebP output via the `image` crate
//! - **CLI integration**: optional batch command-line interface (enable with
//!   the `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use squarefit::{fit_from_path, Background, FitConfig, FitMode};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = FitConfig::builder()
//!     .mode(FitMode::Contain)
//!     .size(600)
//!     .allow_upscale(false)
//!     .background(Background::TRANSPARENT)
//!     .build()?;
//!
//! let result = fit_from_path("cutout.png", &config)?;
//! result.save_png("cutout_600x600.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Geometry only
//!
//! The three core operations are also usable directly, without the
//! processor pipeline:
//!
//! ```rust
//! use image::RgbaImage;
//! use squarefit::{geometry, Background};
//!
//! # fn example() -> squarefit::Result<()> {
//! let image = RgbaImage::from_pixel(300, 100, image::Rgba([0, 0, 0, 255]));
//! let trimmed = geometry::trim_alpha(&image);
//! let square = geometry::to_square_contain(&trimmed, 600, true, Background::TRANSPARENT)?;
//! assert_eq!(square.dimensions(), (600, 600));
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! To use only as a library without CLI dependencies:
//!
//! ```toml
//! [dependencies]
//! squarefit = { version = "0.1", default-features = false, features = ["webp-support"] }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod processor;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;
pub mod utils;

// Public API exports
pub use config::{Background, FitConfig, FitConfigBuilder, FitMode, OutputFormat};
pub use error::{Result, SquareFitError};
pub use geometry::{alpha_bounding_box, to_square_contain, to_square_cover, trim_alpha, BoundingBox};
pub use processor::SquareFitProcessor;
pub use services::{ImageIOService, OutputFormatHandler};
pub use types::{FitResult, ProcessingMetadata, ProcessingTimings, TimingBreakdown};
pub use utils::sanitize_output_name;

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig, TracingFormat};

/// Trim and square-fit an image provided as encoded bytes
///
/// Accepts any format the `image` crate can decode (PNG, JPEG, WebP, ...)
/// and is suitable for web servers and other memory-based callers.
///
/// # Errors
/// - `Image` when the bytes cannot be decoded
/// - `InvalidImage` for zero-area input
/// - `InvalidConfig` when the configuration fails validation
pub fn fit_from_bytes(image_bytes: &[u8], config: &FitConfig) -> Result<FitResult> {
    SquareFitProcessor::new(config.clone())?.process_bytes(image_bytes)
}

/// Trim and square-fit a pre-loaded `DynamicImage`
///
/// The most flexible entry point for in-memory processing; no file I/O is
/// performed.
///
/// # Errors
/// - `InvalidImage` for zero-area input
/// - `InvalidConfig` when the configuration fails validation
pub fn fit_image(image: &image::DynamicImage, config: &FitConfig) -> Result<FitResult> {
    SquareFitProcessor::new(config.clone())?.process_image(image)
}

/// Trim and square-fit an image loaded from a file path
///
/// # Errors
/// - `Io` / `Image` when the file cannot be read or decoded
/// - `InvalidImage` for zero-area input
/// - `InvalidConfig` when the configuration fails validation
pub fn fit_from_path<P: AsRef<std::path::Path>>(
    input_path: P,
    config: &FitConfig,
) -> Result<FitResult> {
    SquareFitProcessor::new(config.clone())?.process_path(input_path)
}
