//! Normalized metadata snapshots for `getMetadata`.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageEncoder};

use super::error::MediaError;
use super::session::{ArtworkEncoder, MediaSession};
use super::types::MediaMetadata;

/// PNG at the strongest compression level. PNG is lossless, so quality is
/// always maximal.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngArtworkEncoder;

impl ArtworkEncoder for PngArtworkEncoder {
    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, MediaError> {
        // The PNG codec has no float pixel formats
        let converted;
        let image = match image {
            DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
                converted = DynamicImage::ImageRgba16(image.to_rgba16());
                &converted
            }
            other => other,
        };

        let mut bytes = Vec::new();
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive)
            .write_image(
                image.as_bytes(),
                image.width(),
                image.height(),
                image.color().into(),
            )
            .map_err(|e| MediaError::Artwork(e.to_string()))?;
        Ok(bytes)
    }
}

/// Builds a snapshot from whatever the session exposes. Absent fields fall
/// back to `None` or `0`; this never fails. Passing `None` as the encoder
/// skips the artwork slots entirely.
pub fn extract_metadata(
    session: &dyn MediaSession,
    encoder: Option<&dyn ArtworkEncoder>,
) -> MediaMetadata {
    let metadata = session.metadata().unwrap_or_default();
    let position = session
        .playback_state()
        .and_then(|snapshot| snapshot.position_ms)
        .unwrap_or(0);

    let album_art = encoder.and_then(|encoder| {
        let image = metadata.album_art.as_ref().or(metadata.art.as_ref())?;
        match encoder.encode(image) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("⚠️ Dropping artwork: {}", e);
                None
            }
        }
    });

    MediaMetadata {
        title: metadata.title,
        artist: metadata.artist,
        duration: metadata.duration_ms.unwrap_or(0),
        position,
        package_name: session.package_name(),
        album_art,
    }
}
