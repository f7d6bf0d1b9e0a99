/// Saving media to the download directory
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{GalleryError, Result};
use crate::state::session::DownloadRequest;

/// Write the requested media into `dir`.
/// Existing files are never overwritten; a free "name (n).ext" is
/// picked instead. Returns the path written.
pub async fn save(request: DownloadRequest, dir: PathBuf) -> Result<PathBuf> {
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| GalleryError::io(&dir, e))?;

    let (mut file, target) = create_free(&dir, &request.file_name).await?;
    file.write_all(request.source.bytes())
        .await
        .map_err(|e| GalleryError::io(&target, e))?;
    file.flush().await.map_err(|e| GalleryError::io(&target, e))?;

    info!(path = %target.display(), bytes = request.source.len(), "saved download");
    Ok(target)
}

/// Create the first free "name", "name (1)", ... in `dir`.
/// `create_new` makes claiming a name atomic, so concurrent saves of
/// the same name each get their own file.
async fn create_free(dir: &Path, file_name: &str) -> Result<(File, PathBuf)> {
    let file_name = sanitize(file_name);
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{}", ext)),
        _ => (file_name.clone(), String::new()),
    };

    let mut n = 0;
    loop {
        let candidate = if n == 0 {
            dir.join(&file_name)
        } else {
            dir.join(format!("{} ({}){}", stem, n, ext))
        };

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(GalleryError::io(&candidate, e)),
        }
    }
}

/// Keep only the final path component so a name can't escape `dir`
fn sanitize(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if name.is_empty() {
        "download".to_string()
    } else {
        name
    }
}
