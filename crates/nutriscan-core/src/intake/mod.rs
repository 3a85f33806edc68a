//! Image intake model and validation rules.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Media types accepted for analysis.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Largest accepted image, in bytes (10 MiB).
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Validation failure reported inline, before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please select a valid image file (JPEG, JPG, or PNG)")]
    UnsupportedType { mime_type: String },

    #[error("File size must be less than 10MB")]
    TooLarge { size: u64 },

    #[error("Could not read the selected image: {0}")]
    Unreadable(String),
}

/// Describes the user-selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Original filename
    pub name: String,
    /// Source path, absent for in-memory selections
    pub path: Option<PathBuf>,
    /// Declared MIME type
    pub mime_type: String,
    /// File size in bytes
    pub size: u64,
}

/// A validated image together with its data URL encoding.
///
/// The data URL serves both as preview and as the payload sent for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub file: ImageFile,
    pub data_url: String,
}

/// Checks the declared media type and size of a candidate image.
pub fn validate(mime_type: &str, size: u64) -> Result<(), IntakeError> {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(IntakeError::UnsupportedType {
            mime_type: mime_type.to_string(),
        });
    }

    if size > MAX_IMAGE_BYTES {
        return Err(IntakeError::TooLarge { size });
    }

    Ok(())
}
