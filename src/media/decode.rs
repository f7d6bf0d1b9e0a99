/// Reading picked files into memory
///
/// Each picked file is decoded by its own single-shot future. The UI
/// adds the result to the catalog when the future completes, so files
/// from one selection land in completion order.

use std::path::{Path, PathBuf};

use tokio::task;
use tracing::debug;

use super::frame::Frame;
use super::mime::{mime_for_path, SVG_MIME};
use crate::error::{GalleryError, Result};
use crate::state::data::{MediaKind, SourceRef};

/// A file read into memory, ready for `Catalog::add`
#[derive(Debug, Clone)]
pub struct DecodedFile {
    /// Filename only
    pub name: String,
    pub byte_size: u64,
    /// Declared MIME type (from the extension), if known
    pub mime_type: Option<String>,
    pub source: SourceRef,
    /// Downscaled raster for the grid. None for videos, SVGs, and
    /// images the `image` crate can't decode.
    pub thumbnail: Option<Frame>,
}

/// Read a file without blocking the UI thread
pub async fn decode_file(path: PathBuf, thumbnail_size: u32) -> Result<DecodedFile> {
    let join_path = path.clone();
    task::spawn_blocking(move || decode_file_blocking(&path, thumbnail_size))
        .await
        .map_err(|e| GalleryError::Decode {
            path: join_path,
            reason: format!("task join error: {}", e),
        })?
}

/// Blocking implementation of file decoding
fn decode_file_blocking(path: &Path, thumbnail_size: u32) -> Result<DecodedFile> {
    let bytes = std::fs::read(path).map_err(|e| GalleryError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let name = display_name(path);
    let mime_type = mime_for_path(path);
    debug!(name = %name, bytes = bytes.len(), mime = ?mime_type, "decoded file");

    let thumbnail = match mime_type.as_deref() {
        Some(SVG_MIME) => None,
        mime if MediaKind::Photo.accepts(mime) => raster_thumbnail(&name, &bytes, thumbnail_size),
        _ => None,
    };

    Ok(DecodedFile {
        name,
        byte_size: bytes.len() as u64,
        mime_type,
        source: SourceRef::new(bytes),
        thumbnail,
    })
}

/// Decode and shrink a raster image, keeping its aspect ratio
fn raster_thumbnail(name: &str, bytes: &[u8], size: u32) -> Option<Frame> {
    match image::load_from_memory(bytes) {
        Ok(img) => {
            let thumbnail = img.thumbnail(size, size).to_rgba8();
            Some(Frame {
                width: thumbnail.width(),
                height: thumbnail.height(),
                rgba: thumbnail.into_raw(),
            })
        }
        Err(e) => {
            debug!(name = %name, error = %e, "no thumbnail");
            None
        }
    }
}

/// Filename shown in the gallery
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, vec![1u8; 2048]).unwrap();

        let decoded = decode_file(path, 64).await.unwrap();
        assert_eq!(decoded.name, "a.png");
        assert_eq!(decoded.byte_size, 2048);
        assert_eq!(decoded.mime_type.as_deref(), Some("image/png"));
        assert_eq!(decoded.source.len(), 2048);
        // Not a real PNG, so there is nothing to show in the grid
        assert_eq!(decoded.thumbnail, None);
    }

    #[tokio::test]
    async fn test_decode_real_image_has_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbImage::from_pixel(200, 100, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let decoded = decode_file(path, 64).await.unwrap();
        let thumbnail = decoded.thumbnail.unwrap();
        assert_eq!((thumbnail.width, thumbnail.height), (64, 32));
        assert_eq!(&thumbnail.rgba[..4], &[10, 20, 30, 255]);
    }

    #[tokio::test]
    async fn test_svg_and_video_have_no_raster_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        std::fs::write(&svg, br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        let video = dir.path().join("clip.mp4");
        std::fs::write(&video, b"mp4").unwrap();

        let svg = decode_file(svg, 64).await.unwrap();
        assert_eq!(svg.mime_type.as_deref(), Some("image/svg+xml"));
        assert_eq!(svg.thumbnail, None);

        let video = decode_file(video, 64).await.unwrap();
        assert_eq!(video.thumbnail, None);
    }

    #[tokio::test]
    async fn test_decode_missing_file() {
        let result = decode_file(PathBuf::from("/nonexistent/path.png"), 64).await;
        assert!(matches!(result, Err(GalleryError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_decoded_file_feeds_catalog() {
        use crate::state::catalog::Catalog;
        use crate::state::data::MediaKind;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.webm");
        std::fs::write(&path, b"webm").unwrap();

        let file = decode_file(path, 64).await.unwrap();
        let mut catalog = Catalog::new();
        let added = catalog
            .add(
                MediaKind::Video,
                &file.name,
                file.byte_size,
                file.source,
                file.mime_type.as_deref(),
            )
            .unwrap();

        assert_eq!(added.record.mime_type, "video/webm");
        assert_eq!(added.record.size_label, "4 Bytes");
    }
}
