/// MIME type detection from file extensions
use std::path::Path;

use image::ImageFormat;

/// iced renders these with its vector widget, not as a raster
pub const SVG_MIME: &str = "image/svg+xml";

/// Video containers the gallery knows about
const VIDEO_TYPES: [(&str, &str); 7] = [
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
];

/// Guess the MIME type of a file from its extension.
/// Returns None for unknown or missing extensions.
pub fn mime_for_path(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();

    if ext == "svg" {
        return Some(SVG_MIME.to_string());
    }

    if let Some(format) = ImageFormat::from_extension(&ext) {
        return Some(format.to_mime_type().to_string());
    }

    VIDEO_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::MediaKind;

    #[test]
    fn test_image_types() {
        assert_eq!(mime_for_path(Path::new("a.png")).as_deref(), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("b.JPG")).as_deref(), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("c.webp")).as_deref(), Some("image/webp"));
        assert_eq!(mime_for_path(Path::new("d.svg")).as_deref(), Some("image/svg+xml"));
    }

    #[test]
    fn test_video_types() {
        assert_eq!(mime_for_path(Path::new("a.mp4")).as_deref(), Some("video/mp4"));
        assert_eq!(mime_for_path(Path::new("b.WebM")).as_deref(), Some("video/webm"));
        assert_eq!(mime_for_path(Path::new("c.mov")).as_deref(), Some("video/quicktime"));
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("README")), None);
    }

    #[test]
    fn test_picker_extensions_are_recognised() {
        for kind in MediaKind::ALL {
            for ext in kind.extensions() {
                let path = format!("file.{}", ext);
                let mime = mime_for_path(Path::new(&path));
                assert!(kind.accepts(mime.as_deref()), "{} -> {:?}", path, mime);
            }
        }
    }
}
