//! Image intake: validation and data URL encoding of user-selected images.
//!
//! Nothing here touches the network. Rejected files are never read.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use nutriscan_core::intake::{EncodedImage, ImageFile, IntakeError, validate};

/// Infers the MIME type from a filename extension using the `mime_guess` library.
pub fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Encodes bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(bytes))
}

/// Validates and encodes an image file on disk.
///
/// The declared type comes from the extension and the size from file
/// metadata; both are checked before the contents are read.
pub async fn load_image(path: &Path) -> Result<EncodedImage, IntakeError> {
    let mime_type = infer_mime_type(path);
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| IntakeError::Unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(IntakeError::Unreadable(format!(
            "{} is not a file",
            path.display()
        )));
    }
    let size = metadata.len();

    validate(&mime_type, size)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IntakeError::Unreadable(e.to_string()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(name = %name, mime_type = %mime_type, size, "Encoded image");

    Ok(EncodedImage {
        data_url: to_data_url(&mime_type, &bytes),
        file: ImageFile {
            name,
            path: Some(path.to_path_buf()),
            mime_type,
            size,
        },
    })
}

/// Validates and encodes an in-memory image with an explicitly declared type.
pub fn encode_bytes(
    name: impl Into<String>,
    mime_type: &str,
    bytes: &[u8],
) -> Result<EncodedImage, IntakeError> {
    let size = bytes.len() as u64;
    validate(mime_type, size)?;

    Ok(EncodedImage {
        data_url: to_data_url(mime_type, bytes),
        file: ImageFile {
            name: name.into(),
            path: None,
            mime_type: mime_type.to_string(),
            size,
        },
    })
}
