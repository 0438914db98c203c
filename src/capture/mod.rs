//! Image capture domain, public API.
//!
//! Turns the user's chosen file into a base64 data URL. The file is assumed
//! to be image-like; nothing here rejects a non-image, it is only labelled
//! with the best MIME type we can find.

mod data_url;

pub use data_url::DataUrl;

use crate::error::{FortuneError, Result};
use std::path::Path;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Pick a MIME type for the uploaded bytes.
///
/// Magic bytes win over the file name; the extension is only consulted when
/// the content is not a format `image` recognises.
pub fn detect_mime(bytes: &[u8], file_name: &str) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    match image::ImageFormat::from_path(file_name) {
        Ok(format) => format.to_mime_type(),
        Err(_) => FALLBACK_MIME,
    }
}

/// Encode in-memory file contents (from the file input or a drop) as a data URL.
///
/// A zero-byte file is refused: its data URL would have an empty payload,
/// which `DataUrl::parse` rejects.
pub fn encode_upload(bytes: &[u8], file_name: &str) -> Result<DataUrl> {
    if bytes.is_empty() {
        log::warn!("[CAPTURE] Refusing empty upload {}", file_name);
        return Err(FortuneError::EmptyImage(file_name.to_string()));
    }
    let mime = detect_mime(bytes, file_name);
    log::info!(
        "[CAPTURE] Encoded {} ({} bytes) as {}",
        file_name,
        bytes.len(),
        mime
    );
    Ok(DataUrl::encode(bytes, mime))
}

/// Read an image from disk and encode it as a data URL.
pub async fn read_image_as_data_url(path: &Path) -> Result<DataUrl> {
    let start = std::time::Instant::now();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| FortuneError::ImageRead {
            path: path.display().to_string(),
            source,
        })?;
    log::info!(
        "[CAPTURE] Read {} in {}ms",
        path.display(),
        start.elapsed().as_millis()
    );
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    encode_upload(&bytes, &name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn magic_bytes_beat_extension() {
        assert_eq!(detect_mime(PNG_MAGIC, "cup.jpg"), "image/png");
        assert_eq!(detect_mime(JPEG_MAGIC, "cup.png"), "image/jpeg");
    }

    #[test]
    fn extension_used_when_content_unknown() {
        assert_eq!(detect_mime(b"not really an image", "cup.webp"), "image/webp");
    }

    #[test]
    fn unknown_content_and_name_still_encodes() {
        assert_eq!(detect_mime(b"???", "notes.txt"), FALLBACK_MIME);
        let url = encode_upload(b"???", "notes.txt").unwrap();
        assert_eq!(url.mime_type(), FALLBACK_MIME);
        assert_eq!(url.decode().unwrap(), b"???");
    }

    #[test]
    fn empty_upload_is_refused() {
        let err = encode_upload(b"", "cup.png").unwrap_err();
        assert!(matches!(err, FortuneError::EmptyImage(ref name) if name == "cup.png"));
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let path = std::env::temp_dir().join("coffee-fortune-capture-test.jpg");
        std::fs::write(&path, JPEG_MAGIC).unwrap();

        let url = read_image_as_data_url(&path).await.unwrap();
        assert_eq!(url.mime_type(), "image/jpeg");
        assert_eq!(url.decode().unwrap(), JPEG_MAGIC);

        // Cleanup
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_is_image_read_error() {
        let path = std::env::temp_dir().join("coffee-fortune-does-not-exist.png");
        let err = read_image_as_data_url(&path).await.unwrap_err();
        assert!(matches!(err, FortuneError::ImageRead { .. }));
    }
}
