/// Error types for the gallery
///
/// Every failure here is recoverable: the catalog and preview session
/// stay usable after any of them. Errors are `Clone` so they can be
/// carried inside iced messages.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::state::data::{MediaId, MediaKind};

#[derive(Debug, Clone, Error)]
pub enum GalleryError {
    /// The file's MIME family does not match the gallery it was added to
    #[error("{name} is not {} file (declared type: {})", .kind.article_noun(), .mime.as_deref().unwrap_or("unknown"))]
    InvalidMediaType {
        name: String,
        kind: MediaKind,
        mime: Option<String>,
    },

    /// No record with this id exists in either collection
    #[error("no media with id {0}")]
    NotFound(MediaId),

    /// Reading a picked file failed
    #[error("failed to read {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// Writing a download failed
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The config file exists but could not be used
    #[error("invalid config at {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl GalleryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_media_type_message() {
        let err = GalleryError::InvalidMediaType {
            name: "notes.txt".to_string(),
            kind: MediaKind::Photo,
            mime: Some("text/plain".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "notes.txt is not an image file (declared type: text/plain)"
        );

        let err = GalleryError::InvalidMediaType {
            name: "clip".to_string(),
            kind: MediaKind::Video,
            mime: None,
        };
        assert_eq!(err.to_string(), "clip is not a video file (declared type: unknown)");
    }

    #[test]
    fn test_io_error_is_clone() {
        let err = GalleryError::io(
            "/tmp/x.png",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
        assert!(copy.to_string().contains("denied"));
    }
}
