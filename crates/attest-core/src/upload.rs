use crate::error::CoreError;

/// Maximum accepted upload size (5 MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A document image selected by the subject, before any network call.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Local checks run before the upload leaves the machine: the file must
    /// be an image and at most [`MAX_UPLOAD_BYTES`] long.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.content_type.starts_with("image/") {
            return Err(CoreError::Validation(format!(
                "expected an image upload, got content type '{}'",
                self.content_type
            )));
        }
        if self.bytes.is_empty() {
            return Err(CoreError::Validation("uploaded file is empty".into()));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(CoreError::Validation(format!(
                "uploaded file is {} bytes, limit is {}",
                self.bytes.len(),
                MAX_UPLOAD_BYTES
            )));
        }
        Ok(())
    }
}

/// Guess an image content type from a file extension.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
