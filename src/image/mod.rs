//! Uploaded image handling
//!
//! Captures caller-supplied images and converts them into the base64 inline
//! payloads the Gemini API expects.

pub mod data_url;
pub mod mime;

pub use data_url::DataUrl;

use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

/// An uploaded image: raw bytes plus the declared MIME type.
///
/// Immutable once captured. Conversion to base64 only happens in [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Read an image from disk, sniffing its MIME type from the content.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Failed to read image {}: {}", path.display(), e);
            e
        })?;
        let mime_type = mime::detect_image_mime(&bytes, Some(path));

        tracing::debug!(
            "Loaded image {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );

        Ok(Self::new(bytes, mime_type))
    }

    /// Capture an image that is already encoded as a `data:` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let parsed = DataUrl::parse(url)?;
        let bytes = parsed.decode_payload()?;
        Ok(Self::new(bytes, parsed.mime_type))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Transport-ready form of an [`ImageInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Bare base64 payload, without any `data:<mime>;base64,` header.
    pub data: String,
    pub mime_type: String,
}

/// Base64-encode an image for an inline request part.
pub fn encode(image: &ImageInput) -> EncodedImage {
    EncodedImage {
        data: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
        mime_type: image.mime_type().to_string(),
    }
}

pub(crate) fn decode_base64(data: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| Error::Encoding(format!("Failed to decode base64 payload: {}", e)))
}
