//! `data:<mime>;base64,<payload>` strings, the display form of every image result.

use crate::{Error, Result};
use std::fmt;
use std::path::Path;

const BASE64_MARKER: &str = ";base64";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    /// Base64 payload (everything after the first comma).
    pub data: String,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| Error::Encoding("Data URL must start with 'data:'".to_string()))?;

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| Error::Encoding("Data URL is missing its payload".to_string()))?;

        let mime_type = header.strip_suffix(BASE64_MARKER).ok_or_else(|| {
            Error::Encoding("Only base64-encoded data URLs are supported".to_string())
        })?;

        Ok(Self::new(mime_type, data))
    }

    pub fn decode_payload(&self) -> Result<Vec<u8>> {
        super::decode_base64(&self.data)
    }

    /// Decode the payload and write the raw bytes to `path`.
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.decode_payload()?;
        tokio::fs::write(path, &bytes).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{}{},{}", self.mime_type, BASE64_MARKER, self.data)
    }
}

/// Download file name for a result, derived from the prompt that produced it.
///
/// Takes the first 30 UTF-16 code units, replaces anything outside `[a-z0-9]`
/// (case-insensitive) with `_` and lowercases the rest. A character outside
/// the BMP counts as two units and becomes `__`, matching browser downloads.
pub fn suggested_file_name(prompt: &str) -> String {
    let stem: String = prompt
        .encode_utf16()
        .take(30)
        .map(|unit| match u8::try_from(unit) {
            Ok(byte) if byte.is_ascii_alphanumeric() => char::from(byte.to_ascii_lowercase()),
            _ => '_',
        })
        .collect();

    if stem.is_empty() {
        "gemini-image.png".to_string()
    } else {
        format!("{}.png", stem)
    }
}
