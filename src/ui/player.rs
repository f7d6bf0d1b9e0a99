/// Playback state for the video shown in the preview modal
///
/// The player only holds state. Frames come from the stream returned
/// by `subscription`, which iced keeps alive while the player is
/// playing. Pausing, closing the modal or deleting the record drops
/// the subscription, and with it the ffmpeg process.
use iced::widget::image::Handle;
use iced::Subscription;
use tracing::{debug, warn};

use super::rgba_handle;
use crate::media::video::{self, PlaybackEvent};
use crate::state::data::{MediaId, MediaRecord};

#[derive(Debug, Clone)]
pub struct Player {
    id: MediaId,
    playing: bool,
    /// Where the current (or next) run starts, in seconds
    start: f32,
    /// Timestamp of the last frame shown
    position: f32,
    frame: Option<Handle>,
    finished: bool,
}

impl Player {
    /// A paused player for `id`, showing nothing until played
    pub fn new(id: MediaId) -> Self {
        Self {
            id,
            playing: false,
            start: 0.0,
            position: 0.0,
            frame: None,
            finished: false,
        }
    }

    pub fn id(&self) -> MediaId {
        self.id
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Last frame received, if playback has started
    pub fn frame(&self) -> Option<&Handle> {
        self.frame.as_ref()
    }

    /// Play from where we paused, or from the top after the video ended
    pub fn toggle(&mut self) {
        if self.playing {
            self.playing = false;
            debug!(id = %self.id, position = self.position, "paused");
            return;
        }

        if self.finished {
            self.finished = false;
            self.position = 0.0;
        }
        self.start = self.position;
        self.playing = true;
        debug!(id = %self.id, start = self.start, "playing");
    }

    pub fn on_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Frame {
                id,
                position,
                frame,
            } if id == self.id && self.playing => {
                self.position = position;
                self.frame = Some(rgba_handle(&frame));
            }
            PlaybackEvent::Finished(id) if id == self.id => {
                self.playing = false;
                self.finished = true;
            }
            PlaybackEvent::Failed(id, reason) if id == self.id => {
                warn!(id = %id, reason = %reason, "playback failed");
                self.playing = false;
            }
            // Late events from a stream that was already dropped
            _ => {}
        }
    }

    /// The frame stream for `record`, while playing
    pub fn subscription(&self, record: &MediaRecord) -> Subscription<PlaybackEvent> {
        if !self.playing || record.id != self.id {
            return Subscription::none();
        }

        // A new start position is a new stream
        Subscription::run_with_id(
            (self.id.0, self.start.to_bits()),
            video::playback(self.id, record.source.clone(), record.name.clone(), self.start),
        )
    }
}
