/// Media file I/O
///
/// This module handles:
/// - Guessing MIME types from file names
/// - Reading picked files into memory (off the UI thread)
/// - Saving media back to disk for downloads
/// - Video posters and playback through ffmpeg

pub mod decode;
pub mod download;
pub mod frame;
pub mod mime;
pub mod video;
