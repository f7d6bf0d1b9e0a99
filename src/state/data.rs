/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the catalog, the preview session and the UI layer.

use std::fmt;
use std::sync::Arc;

/// Which gallery a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Photo, MediaKind::Video];

    /// MIME family prefix this kind accepts (e.g. "image/")
    pub fn mime_family(self) -> &'static str {
        match self {
            MediaKind::Photo => "image/",
            MediaKind::Video => "video/",
        }
    }

    /// Check a declared MIME type against this kind.
    /// A missing MIME type never matches.
    pub fn accepts(self, mime: Option<&str>) -> bool {
        mime.map(|m| m.to_ascii_lowercase().starts_with(self.mime_family()))
            .unwrap_or(false)
    }

    /// File extensions offered in the picker for this kind
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Photo => &[
                "png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "tif", "tiff", "avif", "svg",
            ],
            MediaKind::Video => &["mp4", "m4v", "webm", "ogv", "mov", "mkv", "avi"],
        }
    }

    /// "an image" / "a video", used in user-facing warnings
    pub fn article_noun(self) -> &'static str {
        match self {
            MediaKind::Photo => "an image",
            MediaKind::Video => "a video",
        }
    }

    /// Tab / picker title
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Photo => "Photos",
            MediaKind::Video => "Videos",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Unique, monotonic media id.
/// Derived from the wall clock in milliseconds, bumped past the last
/// issued id so records added in the same millisecond never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaId(pub u64);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared reference to decoded file content.
/// Cloning is cheap; the bytes are never copied.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceRef(Arc<[u8]>);

impl SourceRef {
    pub fn new(bytes: Vec<u8>) -> Self {
        SourceRef(bytes.into())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// Printing the bytes would flood the logs
impl fmt::Debug for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceRef({} bytes)", self.0.len())
    }
}

/// A single photo or video in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    /// Unique for the lifetime of the session
    pub id: MediaId,
    /// Filename only (e.g., "IMG_0001.png"). Not unique.
    pub name: String,
    /// Human-readable size, e.g. "2 KB"
    pub size_label: String,
    pub byte_size: u64,
    pub source: SourceRef,
    /// Fixed at creation; decides which collection holds the record
    pub kind: MediaKind,
    /// Declared MIME type, e.g. "video/mp4"
    pub mime_type: String,
}

/// Result of a successful `Catalog::add`
#[derive(Debug, Clone)]
pub struct Added {
    pub record: MediaRecord,
    /// True if this was the first record of its kind
    /// (the empty-state placeholder should go away)
    pub became_non_empty: bool,
}

/// Result of a successful `Catalog::remove`
#[derive(Debug, Clone)]
pub struct RemovedInfo {
    pub record: MediaRecord,
    /// True if the owning collection is now empty
    /// (the empty-state placeholder should come back)
    pub became_empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_mime_family() {
        assert!(MediaKind::Photo.accepts(Some("image/png")));
        assert!(MediaKind::Photo.accepts(Some("IMAGE/JPEG")));
        assert!(!MediaKind::Photo.accepts(Some("video/mp4")));
        assert!(!MediaKind::Photo.accepts(Some("text/plain")));
        assert!(!MediaKind::Photo.accepts(None));

        assert!(MediaKind::Video.accepts(Some("video/webm")));
        assert!(!MediaKind::Video.accepts(Some("image/gif")));
        assert!(!MediaKind::Video.accepts(Some("")));
    }

    #[test]
    fn test_source_ref_debug_hides_bytes() {
        let source = SourceRef::new(b"hi".to_vec());
        assert_eq!(format!("{:?}", source), "SourceRef(2 bytes)");
    }

    #[test]
    fn test_source_ref_clone_shares_bytes() {
        let source = SourceRef::new(vec![1, 2, 3]);
        let copy = source.clone();
        assert_eq!(source.bytes().as_ptr(), copy.bytes().as_ptr());
        assert_eq!(copy.len(), 3);
    }
}
