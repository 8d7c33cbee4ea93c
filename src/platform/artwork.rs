use image::DynamicImage;
use std::path::PathBuf;

/// Decodes artwork bytes handed out by a host, whatever their format.
pub fn image_from_bytes(bytes: &[u8]) -> Option<DynamicImage> {
    if bytes.is_empty() {
        return None;
    }
    match image::load_from_memory(bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            log::debug!("Unreadable artwork ({} bytes): {}", bytes.len(), e);
            None
        }
    }
}

/// Loads artwork referenced by URL. Only local `file://` URLs are followed.
pub fn image_from_url(url: &str) -> Option<DynamicImage> {
    let path = file_url_path(url)?;
    match std::fs::read(&path) {
        Ok(bytes) => image_from_bytes(&bytes),
        Err(e) => {
            log::debug!("Cannot read artwork {}: {}", path.display(), e);
            None
        }
    }
}

fn file_url_path(url: &str) -> Option<PathBuf> {
    let raw = url.trim().strip_prefix("file://")?;
    let decoded = urlencoding::decode(raw).ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}
