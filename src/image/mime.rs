use image::ImageFormat;
use std::path::Path;

/// Best-effort MIME type for an uploaded image.
///
/// Magic bytes win over the file extension; unknown content falls back to `image/png`.
pub fn detect_image_mime(bytes: &[u8], path: Option<&Path>) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }

    if let Some(format) = path.and_then(|p| ImageFormat::from_path(p).ok()) {
        return format.to_mime_type();
    }

    tracing::warn!(
        "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
        &bytes[..bytes.len().min(4)]
    );
    "image/png"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], None),
            "image/png"
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0], None),
            "image/jpeg"
        );
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(
                &[0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50],
                None
            ),
            "image/webp"
        );
    }

    #[test]
    fn test_extension_used_when_content_unknown() {
        assert_eq!(
            detect_image_mime(&[0x00, 0x01, 0x02, 0x03], Some(Path::new("photo.jpg"))),
            "image/jpeg"
        );
    }

    #[test]
    fn test_unknown_falls_back_to_png() {
        assert_eq!(detect_image_mime(&[0x00, 0x01, 0x02, 0x03], None), "image/png");
        assert_eq!(detect_image_mime(&[], Some(Path::new("notes"))), "image/png");
    }
}
