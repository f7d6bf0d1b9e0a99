/// Gallery views
///
/// - `gallery.rs` - thumbnail grid and empty state for one tab
/// - `preview.rs` - the preview modal
/// - `player.rs` - playback state for the video in the modal

pub mod gallery;
pub mod player;
pub mod preview;

use iced::widget::{image, svg};

use crate::media::frame::Frame;
use crate::media::mime::SVG_MIME;
use crate::state::data::{MediaKind, MediaRecord};

/// What a record looks like on screen. Records without one are drawn
/// as a labelled tile.
#[derive(Debug, Clone)]
pub enum Visual {
    /// Raster photo: a small handle for the grid, the original for the modal
    Photo {
        thumbnail: image::Handle,
        full: image::Handle,
    },
    Svg(svg::Handle),
    /// First frame of a video
    Poster(image::Handle),
}

impl Visual {
    /// Pick the visual for a newly added record. Raster photos need a
    /// decoded thumbnail, otherwise iced couldn't decode them either.
    pub fn for_record(record: &MediaRecord, thumbnail: Option<&Frame>) -> Option<Self> {
        match (record.kind, thumbnail) {
            (MediaKind::Photo, _) if record.mime_type.eq_ignore_ascii_case(SVG_MIME) => Some(
                Visual::Svg(svg::Handle::from_memory(record.source.bytes().to_vec())),
            ),
            (MediaKind::Photo, Some(frame)) => Some(Visual::Photo {
                thumbnail: rgba_handle(frame),
                full: image::Handle::from_bytes(record.source.bytes().to_vec()),
            }),
            (MediaKind::Video, Some(frame)) => Some(Visual::Poster(rgba_handle(frame))),
            _ => None,
        }
    }
}

pub fn rgba_handle(frame: &Frame) -> image::Handle {
    image::Handle::from_rgba(frame.width, frame.height, frame.rgba.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::Catalog;
    use crate::state::data::SourceRef;

    fn record(kind: MediaKind, name: &str, mime: &str) -> MediaRecord {
        let mut catalog = Catalog::new();
        catalog
            .add(kind, name, 4, SourceRef::new(vec![0u8; 4]), Some(mime))
            .unwrap()
            .record
    }

    fn pixel() -> Frame {
        Frame {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        }
    }

    #[test]
    fn test_svg_uses_vector_handle() {
        let svg = record(MediaKind::Photo, "logo.svg", "image/svg+xml");
        assert!(matches!(Visual::for_record(&svg, None), Some(Visual::Svg(_))));
    }

    #[test]
    fn test_undecodable_photo_falls_back_to_tile() {
        let avif = record(MediaKind::Photo, "a.avif", "image/avif");
        assert!(Visual::for_record(&avif, None).is_none());
        assert!(matches!(
            Visual::for_record(&avif, Some(&pixel())),
            Some(Visual::Photo { .. })
        ));
    }

    #[test]
    fn test_video_needs_poster_frame() {
        let clip = record(MediaKind::Video, "clip.mp4", "video/mp4");
        assert!(Visual::for_record(&clip, None).is_none());
        assert!(matches!(
            Visual::for_record(&clip, Some(&pixel())),
            Some(Visual::Poster(_))
        ));
    }
}
