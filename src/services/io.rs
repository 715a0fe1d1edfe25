//! Image I/O operations service
//!
//! This module separates file I/O operations from the geometry pipeline,
//! making the system more testable and maintainable.

use crate::error::{Result, SquareFitError};
use image::DynamicImage;
use std::path::Path;

/// File extensions accepted when scanning directories for input images
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first and falls back to
    /// content-based detection for files with missing or lying extensions.
    ///
    /// # Errors
    /// - File does not exist or cannot be read
    /// - Neither detection strategy can decode the data
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(SquareFitError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    SquareFitError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    let extension = path_ref
                        .extension()
                        .and_then(|s| s.to_str())
                        .unwrap_or("unknown");

                    SquareFitError::processing_stage_error(
                        "image loading",
                        &format!(
                            "Failed to load image with both extension-based ({}) and content-based detection. Extension error: {}. Content error: {}",
                            extension, e, content_err
                        ),
                        Some(&format!(
                            "path: {}, size: {} bytes",
                            path_ref.display(),
                            data.len()
                        )),
                    )
                })
            },
        }
    }

    /// Decode an image from an in-memory byte buffer
    ///
    /// # Errors
    /// Returns `Image` when the bytes are not a decodable image.
    pub fn load_from_bytes(data: &[u8]) -> Result<DynamicImage> {
        let image = image::load_from_memory(data)?;
        Ok(image)
    }

    /// Write encoded image bytes to a file, creating parent directories
    ///
    /// # Errors
    /// - Parent directory cannot be created
    /// - File cannot be written
    pub fn save_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SquareFitError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        std::fs::write(path_ref, bytes)
            .map_err(|e| SquareFitError::file_io_error("write output file", path_ref, &e))?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path_ref.display());
        Ok(())
    }

    /// Whether a path carries a supported input image extension
    #[must_use]
    pub fn is_supported_input<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
            })
    }
}
