use chrono::Utc;
use tracing::{debug, info};

use super::data::{Added, MediaId, MediaKind, MediaRecord, RemovedInfo, SourceRef};
use super::size::format_size;
use crate::error::{GalleryError, Result};

/// The Catalog holds every photo and video added during this session.
///
/// Records live in two ordered collections, one per kind. Insertion
/// order is display order. Nothing is persisted; dropping the catalog
/// drops the media.
#[derive(Debug, Default)]
pub struct Catalog {
    photos: Vec<MediaRecord>,
    videos: Vec<MediaRecord>,
    /// Last id handed out, so ids stay unique and increasing
    last_id: u64,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoded file to the gallery matching `kind`.
    ///
    /// Fails with `InvalidMediaType` (and adds nothing) when the declared
    /// MIME type is not in the kind's family.
    pub fn add(
        &mut self,
        kind: MediaKind,
        name: &str,
        byte_size: u64,
        source: SourceRef,
        mime_type: Option<&str>,
    ) -> Result<Added> {
        let mime_type = match mime_type {
            Some(mime) if kind.accepts(Some(mime)) => mime.to_string(),
            other => {
                return Err(GalleryError::InvalidMediaType {
                    name: name.to_string(),
                    kind,
                    mime: other.map(str::to_string),
                })
            }
        };

        let record = MediaRecord {
            id: self.next_id(),
            name: name.to_string(),
            size_label: format_size(byte_size),
            byte_size,
            source,
            kind,
            mime_type,
        };

        let collection = self.collection_mut(kind);
        collection.push(record.clone());
        let became_non_empty = collection.len() == 1;

        info!(id = %record.id, name = %record.name, size = %record.size_label, "added {}", kind);
        if became_non_empty {
            debug!("{} gallery is no longer empty", kind);
        }

        Ok(Added {
            record,
            became_non_empty,
        })
    }

    /// Remove a record from whichever collection holds it
    pub fn remove(&mut self, id: MediaId) -> Result<RemovedInfo> {
        for kind in MediaKind::ALL {
            let collection = self.collection_mut(kind);
            if let Some(index) = collection.iter().position(|r| r.id == id) {
                let record = collection.remove(index);
                let became_empty = collection.is_empty();

                info!(id = %id, name = %record.name, bytes = record.byte_size, "removed {}", kind);
                if became_empty {
                    debug!("{} gallery is now empty", kind);
                }

                return Ok(RemovedInfo {
                    record,
                    became_empty,
                });
            }
        }

        Err(GalleryError::NotFound(id))
    }

    /// All records of one kind, in insertion order
    pub fn list_by_kind(&self, kind: MediaKind) -> &[MediaRecord] {
        match kind {
            MediaKind::Photo => &self.photos,
            MediaKind::Video => &self.videos,
        }
    }

    /// Look up a record by id in either collection
    pub fn get(&self, id: MediaId) -> Option<&MediaRecord> {
        self.photos
            .iter()
            .chain(self.videos.iter())
            .find(|r| r.id == id)
    }

    pub fn len(&self, kind: MediaKind) -> usize {
        self.list_by_kind(kind).len()
    }

    pub fn is_empty(&self, kind: MediaKind) -> bool {
        self.list_by_kind(kind).is_empty()
    }

    /// Number of records across both collections
    pub fn total(&self) -> usize {
        self.photos.len() + self.videos.len()
    }

    fn collection_mut(&mut self, kind: MediaKind) -> &mut Vec<MediaRecord> {
        match kind {
            MediaKind::Photo => &mut self.photos,
            MediaKind::Video => &mut self.videos,
        }
    }

    fn next_id(&mut self) -> MediaId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        MediaId(id)
    }
}
