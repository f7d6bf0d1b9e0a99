use tracing::debug;

use super::catalog::Catalog;
use super::data::{MediaId, MediaRecord, RemovedInfo, SourceRef};
use crate::error::Result;

/// Observable state of the preview modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open(MediaId),
}

/// Everything needed to save a record to disk
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub file_name: String,
    pub source: SourceRef,
}

/// Tracks which record (if any) is shown in the preview modal.
///
/// The session only holds the record's id; the catalog owns the record.
#[derive(Debug, Default)]
pub struct PreviewSession {
    open: Option<MediaId>,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match self.open {
            Some(id) => SessionState::Open(id),
            None => SessionState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Show `record`, replacing whatever was open
    pub fn open(&mut self, record: &MediaRecord) {
        if let Some(previous) = self.open.replace(record.id) {
            debug!(previous = %previous, id = %record.id, "preview switched");
        } else {
            debug!(id = %record.id, name = %record.name, "preview opened");
        }
    }

    /// Close the preview. Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        match self.open.take() {
            Some(id) => {
                debug!(id = %id, "preview closed");
                true
            }
            None => false,
        }
    }

    /// Resolve the open record against the catalog
    pub fn current<'a>(&self, catalog: &'a Catalog) -> Option<&'a MediaRecord> {
        self.open.and_then(|id| catalog.get(id))
    }

    /// Describe a download of `record`. Touches no state.
    pub fn download(&self, record: &MediaRecord) -> DownloadRequest {
        DownloadRequest {
            file_name: record.name.clone(),
            source: record.source.clone(),
        }
    }

    /// Remove `record` from the catalog, then close the preview
    /// whether or not the removal succeeded.
    pub fn delete(&mut self, catalog: &mut Catalog, record: &MediaRecord) -> Result<RemovedInfo> {
        let removed = catalog.remove(record.id);
        self.close();
        removed
    }
}
