/// Decoded RGBA pixels (photo thumbnails, video frames)
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel
    pub rgba: Vec<u8>,
}

impl Frame {
    /// Expand packed RGB24 (what ffmpeg's rawvideo output gives us) to RGBA
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Self {
        let rgba = rgb
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect();

        Self {
            width,
            height,
            rgba,
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({}x{})", self.width, self.height)
    }
}
