//! Embedded image resources.

use serde::{Deserialize, Serialize};

/// An embedded raster resource in the output document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    /// Raw binary data. Not serialized into the structural output.
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// MIME type (e.g. "image/png").
    pub mime_type: String,

    /// Original filename if known.
    #[serde(default)]
    pub filename: Option<String>,
}

impl Resource {
    /// Create an image resource, sniffing the MIME type from magic bytes.
    pub fn image(data: Vec<u8>) -> Self {
        let mime_type = detect_mime_type(&data).unwrap_or("application/octet-stream").to_string();
        Self {
            data,
            mime_type,
            filename: None,
        }
    }

    /// Set the original filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Detect an image MIME type from magic bytes.
pub(crate) fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.len() < 8 {
        return None;
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
        return Some("image/tiff");
    }
    if data.starts_with(b"BM") {
        return Some("image/bmp");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}
