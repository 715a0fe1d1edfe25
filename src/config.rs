//! Configuration types for square-fit operations

use crate::error::{Result, SquareFitError};
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Framing mode for fitting an image into a square canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    /// Fit whole content inside the frame, pad the remainder with a background color
    Contain,
    /// Fill the whole frame with content, crop the remainder
    Cover,
}

impl Default for FitMode {
    fn default() -> Self {
        // Contain never loses content, making it the safer default
        Self::Contain
    }
}

impl std::fmt::Display for FitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contain => write!(f, "contain"),
            Self::Cover => write!(f, "cover"),
        }
    }
}

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency, alpha flattened away)
    Jpeg,
    /// WebP with alpha channel transparency
    WebP,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// RGBA padding color used by Contain mode to fill uncovered canvas area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Background {
    /// Fully transparent white (the alpha channel makes the color irrelevant)
    pub const TRANSPARENT: Self = Self { r: 255, g: 255, b: 255, a: 0 };

    /// Opaque white
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// Opaque black
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// Create a background from RGBA components
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to an `image` crate RGBA pixel
    #[must_use]
    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// Whether this background contributes no visible color
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parse a background specification string
    ///
    /// Accepts the named values `transparent`, `white`, and `black`, or hex
    /// colors in `#rrggbb` / `#rrggbbaa` form.
    ///
    /// # Errors
    /// Returns `SquareFitError::InvalidConfig` for unrecognized names, bad
    /// hex digits, or hex strings of the wrong length.
    pub fn parse(spec: &str) -> Result<Self> {
        match spec.trim().to_ascii_lowercase().as_str() {
            "transparent" | "none" => Ok(Self::TRANSPARENT),
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            other => {
                let hex = other.strip_prefix('#').ok_or_else(|| {
                    SquareFitError::invalid_config(format!(
                        "Unknown background '{}' (expected transparent, white, black, or #rrggbb[aa])",
                        other
                    ))
                })?;

                let parse_channel = |range: std::ops::Range<usize>| -> Result<u8> {
                    let digits = hex.get(range).ok_or_else(|| {
                        SquareFitError::invalid_config(format!(
                            "Background hex '{}' must have 6 or 8 digits",
                            hex
                        ))
                    })?;
                    u8::from_str_radix(digits, 16).map_err(|_| {
                        SquareFitError::invalid_config(format!(
                            "Background hex '{}' contains non-hex digits",
                            hex
                        ))
                    })
                };

                match hex.len() {
                    6 => Ok(Self::new(
                        parse_channel(0..2)?,
                        parse_channel(2..4)?,
                        parse_channel(4..6)?,
                        255,
                    )),
                    8 => Ok(Self::new(
                        parse_channel(0..2)?,
                        parse_channel(2..4)?,
                        parse_channel(4..6)?,
                        parse_channel(6..8)?,
                    )),
                    _ => Err(SquareFitError::invalid_config(format!(
                        "Background hex '{}' must have 6 or 8 digits",
                        hex
                    ))),
                }
            },
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_transparent() {
            write!(f, "transparent")
        } else if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Configuration for square-fit operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Framing mode (contain or cover)
    pub mode: FitMode,

    /// Target canvas edge length in pixels
    pub size: u32,

    /// Allow enlarging content beyond its native resolution
    pub allow_upscale: bool,

    /// Padding color for Contain mode (ignored by Cover)
    pub background: Background,

    /// Output format
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// WebP quality (0-100, only used for WebP output)
    pub webp_quality: u8,

    /// Enable debug mode (additional logging and validation)
    pub debug: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            mode: FitMode::default(),
            size: 600,
            allow_upscale: false, // Never enlarge small images by default
            background: Background::default(),
            output_format: OutputFormat::default(),
            jpeg_quality: 90,
            webp_quality: 85,
            debug: false,
        }
    }
}

impl FitConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use squarefit::{FitConfig, FitMode, Background};
    ///
    /// let config = FitConfig::builder()
    ///     .mode(FitMode::Cover)
    ///     .size(512)
    ///     .allow_upscale(true)
    ///     .background(Background::WHITE)
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> FitConfigBuilder {
        FitConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Errors
    /// - Target size of zero
    /// - JPEG quality above 100
    /// - WebP quality above 100
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SquareFitError::config_value_error(
                "target size",
                self.size,
                "1 or greater",
                Some(600),
            ));
        }
        if self.jpeg_quality > 100 {
            return Err(SquareFitError::config_value_error(
                "JPEG quality",
                self.jpeg_quality,
                "0-100",
                Some(90),
            ));
        }
        if self.webp_quality > 100 {
            return Err(SquareFitError::config_value_error(
                "WebP quality",
                self.webp_quality,
                "0-100",
                Some(85),
            ));
        }
        Ok(())
    }
}

/// Builder for [`FitConfig`] with validation at build time
#[derive(Debug, Default)]
pub struct FitConfigBuilder {
    config: FitConfig,
}

impl FitConfigBuilder {
    /// Create a new builder seeded with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the framing mode
    #[must_use]
    pub fn mode(mut self, mode: FitMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the target canvas edge length
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.config.size = size;
        self
    }

    /// Allow or forbid upscaling of small content
    #[must_use]
    pub fn allow_upscale(mut self, allow: bool) -> Self {
        self.config.allow_upscale = allow;
        self
    }

    /// Set the Contain padding background
    #[must_use]
    pub fn background(mut self, background: Background) -> Self {
        self.config.background = background;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Set JPEG quality (0-100)
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    /// Set WebP quality (0-100)
    #[must_use]
    pub fn webp_quality(mut self, quality: u8) -> Self {
        self.config.webp_quality = quality;
        self
    }

    /// Enable or disable debug mode
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Validate and build the final configuration
    ///
    /// # Errors
    /// See [`FitConfig::validate`].
    pub fn build(self) -> Result<FitConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
