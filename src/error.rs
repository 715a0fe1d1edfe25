//! Error types for square-fit operations

use std::path::Path;
use thiserror::Error;

/// Result type alias for square-fit operations
pub type Result<T> = std::result::Result<T, SquareFitError>;

/// Errors that can occur during square-fit processing
#[derive(Error, Debug)]
pub enum SquareFitError {
    /// File system or stream I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding failure from the `image` crate
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Input image is unusable (zero-area or otherwise degenerate)
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Requested output format is not available in this build
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Pipeline stage failure with context
    #[error("Processing error: {0}")]
    Processing(String),
}

impl SquareFitError {
    /// Create an invalid-image error
    pub fn invalid_image<S: Into<String>>(message: S) -> Self {
        Self::InvalidImage(message.into())
    }

    /// Create an invalid-configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an unsupported-format error
    pub fn unsupported_format<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    /// Create a processing error
    pub fn processing<S: Into<String>>(message: S) -> Self {
        Self::Processing(message.into())
    }

    /// Create an I/O error carrying the failed operation and path
    pub fn file_io_error(operation: &str, path: &Path, error: &std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path.display(), error),
        ))
    }

    /// Create a configuration error for an out-of-range parameter value
    pub fn config_value_error(
        parameter: &str,
        value: impl std::fmt::Display,
        valid_range: &str,
        recommended: Option<impl std::fmt::Display>,
    ) -> Self {
        let message = match recommended {
            Some(rec) => format!(
                "Invalid {}: {} (valid: {}, recommended: {})",
                parameter, value, valid_range, rec
            ),
            None => format!("Invalid {}: {} (valid: {})", parameter, value, valid_range),
        };
        Self::InvalidConfig(message)
    }

    /// Create a processing error with stage context and optional input details
    pub fn processing_stage_error<S: AsRef<str>>(
        stage: &str,
        details: &str,
        input_info: Option<S>,
    ) -> Self {
        let message = match input_info {
            Some(info) => format!("{} failed: {} ({})", stage, details, info.as_ref()),
            None => format!("{} failed: {}", stage, details),
        };
        Self::Processing(message)
    }
}
