/// Video posters and playback
///
/// Both run an ffmpeg child process that writes raw RGB24 frames to
/// stdout. ffmpeg is taken from PATH, or downloaded once into the
/// sidecar directory. Input comes from a temporary copy of the record's
/// bytes, since containers like mp4 can't be read from a pipe.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

use ffmpeg_sidecar::command::{ffmpeg_is_installed, FfmpegCommand};
use ffmpeg_sidecar::event::OutputVideoFrame;
use iced::futures::{SinkExt, Stream};
use iced::stream;
use tempfile::NamedTempFile;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, warn};

use super::frame::Frame;
use crate::error::{GalleryError, Result};
use crate::state::data::{MediaId, SourceRef};

/// Poster width in pixels (height keeps the aspect ratio)
const POSTER_WIDTH: u32 = 320;

/// Playback frames are scaled down to at most this width
const PLAYBACK_MAX_WIDTH: u32 = 960;

static FFMPEG_INIT: Once = Once::new();

/// Make sure an ffmpeg binary is available, downloading it if needed
pub fn ensure_ffmpeg() {
    FFMPEG_INIT.call_once(|| {
        if ffmpeg_is_installed() {
            debug!("ffmpeg: using installed binary");
            return;
        }

        debug!("ffmpeg: not installed, downloading sidecar");
        if let Err(e) = ffmpeg_sidecar::download::auto_download() {
            warn!(error = %e, "ffmpeg download failed");
        }
    });
}

/// What a running playback stream reports
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// A new frame, `position` seconds into the video
    Frame {
        id: MediaId,
        position: f32,
        frame: Frame,
    },
    /// The video played to the end
    Finished(MediaId),
    Failed(MediaId, String),
}

/// Extract the first frame of a video as a poster
pub async fn poster(source: SourceRef, file_name: String) -> Result<Frame> {
    let join_name = file_name.clone();
    task::spawn_blocking(move || poster_blocking(&source, &file_name))
        .await
        .map_err(|e| GalleryError::Decode {
            path: PathBuf::from(join_name),
            reason: format!("task join error: {}", e),
        })?
}

/// Blocking implementation of poster extraction
fn poster_blocking(source: &SourceRef, file_name: &str) -> Result<Frame> {
    let decode_error = |reason: String| GalleryError::Decode {
        path: PathBuf::from(file_name),
        reason,
    };

    ensure_ffmpeg();
    let input = input_file(source, file_name).map_err(|e| decode_error(e.to_string()))?;

    let mut child = FfmpegCommand::new()
        .hide_banner()
        .input(input.path())
        .args(["-frames:v", "1"])
        .arg("-vf")
        .arg(format!("scale={}:-2", POSTER_WIDTH))
        .rawvideo()
        .spawn()
        .map_err(|e| decode_error(format!("ffmpeg failed to start: {}", e)))?;

    let frame = child
        .iter()
        .map_err(|e| decode_error(e.to_string()))?
        .filter_frames()
        .next();
    let _ = child.wait();

    let frame = frame.ok_or_else(|| decode_error("no video frames".to_string()))?;
    debug!(name = %file_name, width = frame.width, height = frame.height, "extracted poster");
    Ok(to_frame(frame))
}

/// Stream the video in real time, starting `start` seconds in.
///
/// Dropping the stream stops ffmpeg: the worker notices the closed
/// channel on its next frame and kills the child.
pub fn playback(
    id: MediaId,
    source: SourceRef,
    file_name: String,
    start: f32,
) -> impl Stream<Item = PlaybackEvent> {
    stream::channel(4, move |mut output| async move {
        let (tx, mut rx) = mpsc::channel(2);
        let worker = task::spawn_blocking(move || play_blocking(&source, &file_name, start, tx));

        while let Some((position, frame)) = rx.recv().await {
            if output
                .send(PlaybackEvent::Frame {
                    id,
                    position,
                    frame,
                })
                .await
                .is_err()
            {
                return;
            }
        }

        let event = match worker.await {
            Ok(Ok(())) => PlaybackEvent::Finished(id),
            Ok(Err(reason)) => PlaybackEvent::Failed(id, reason),
            Err(e) => PlaybackEvent::Failed(id, format!("task join error: {}", e)),
        };
        let _ = output.send(event).await;
    })
}

/// Blocking playback loop. Returns when the video ends or the
/// receiver goes away.
fn play_blocking(
    source: &SourceRef,
    file_name: &str,
    start: f32,
    tx: mpsc::Sender<(f32, Frame)>,
) -> std::result::Result<(), String> {
    ensure_ffmpeg();
    let input = input_file(source, file_name).map_err(|e| e.to_string())?;

    let mut child = FfmpegCommand::new()
        .hide_banner()
        // Read at native frame rate so frames arrive in real time
        .arg("-re")
        .arg("-ss")
        .arg(format!("{:.3}", start))
        .input(input.path())
        .arg("-vf")
        .arg(format!("scale='min({},iw)':-2", PLAYBACK_MAX_WIDTH))
        .rawvideo()
        .spawn()
        .map_err(|e| format!("ffmpeg failed to start: {}", e))?;

    let frames = child.iter().map_err(|e| e.to_string())?.filter_frames();
    for frame in frames {
        let position = start + frame.timestamp;
        if tx.blocking_send((position, to_frame(frame))).is_err() {
            debug!(name = %file_name, position, "playback stopped");
            break;
        }
    }

    let _ = child.kill();
    let _ = child.wait();
    Ok(())
}

fn to_frame(frame: OutputVideoFrame) -> Frame {
    Frame::from_rgb(frame.width, frame.height, &frame.data)
}

/// Copy the record's bytes into a temporary file ffmpeg can seek in.
/// The file is removed when the returned handle drops.
fn input_file(source: &SourceRef, file_name: &str) -> std::io::Result<NamedTempFile> {
    let suffix = Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("media-gallery-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(source.bytes())?;
    file.flush()?;
    Ok(file)
}
