//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::{Cli, CliFitMode, CliOutputFormat};
use crate::config::{Background, FitConfig, FitMode, OutputFormat};
use anyhow::{Context, Result};

/// Convert CLI arguments to a validated [`FitConfig`]
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build a `FitConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<FitConfig> {
        let background =
            Background::parse(&cli.background).context("Invalid background specification")?;

        let mode = match cli.mode {
            CliFitMode::Contain => FitMode::Contain,
            CliFitMode::Cover => FitMode::Cover,
        };

        let output_format = match cli.format {
            CliOutputFormat::Png => OutputFormat::Png,
            CliOutputFormat::Jpeg => OutputFormat::Jpeg,
            CliOutputFormat::Webp => OutputFormat::WebP,
        };

        let config = FitConfig::builder()
            .mode(mode)
            .size(cli.size)
            .allow_upscale(cli.allow_upscale)
            .background(background)
            .output_format(output_format)
            .jpeg_quality(cli.jpeg_quality)
            .webp_quality(cli.webp_quality)
            .debug(cli.verbose >= 2)
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        Background::parse(&cli.background).context("Invalid background specification")?;

        if cli.size == 0 {
            anyhow::bail!("Target size must be at least 1 pixel");
        }
        if cli.jpeg_quality > 100 {
            anyhow::bail!("JPEG quality must be 0-100, got {}", cli.jpeg_quality);
        }
        if cli.webp_quality > 100 {
            anyhow::bail!("WebP quality must be 0-100, got {}", cli.webp_quality);
        }

        Ok(())
    }
}
