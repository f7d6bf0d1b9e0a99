use std::collections::HashMap;

use iced::widget::{button, container, row, text, Column, Row};
use iced::{keyboard, Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod config;
mod error;
mod logging;
mod media;
mod state;
mod ui;

use config::GalleryConfig;
use error::GalleryError;
use media::decode::{decode_file, display_name, DecodedFile};
use media::frame::Frame;
use media::mime::mime_for_path;
use media::video::{self, PlaybackEvent};
use state::catalog::Catalog;
use state::data::{MediaId, MediaKind};
use state::session::{PreviewSession, SessionState};
use ui::player::Player;
use ui::Visual;

/// Main application state
struct Gallery {
    config: GalleryConfig,
    /// Every photo and video added this session
    catalog: Catalog,
    /// Which record the preview modal shows
    session: PreviewSession,
    active_tab: MediaKind,
    /// Thumbnails, SVGs and video posters, keyed by record id
    visuals: HashMap<MediaId, Visual>,
    /// Playback state of the video in the open preview
    player: Option<Player>,
    /// Per-file warnings waiting to be dismissed
    warnings: Vec<String>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(MediaKind),
    /// User clicked "Add photos" / "Add videos"
    AddRequested(MediaKind),
    /// Background read of one picked file finished
    FileDecoded(MediaKind, Result<DecodedFile, GalleryError>),
    /// First frame of a newly added video
    PosterReady(MediaId, Result<Frame, GalleryError>),
    /// User clicked a gallery card
    PreviewRequested(MediaId),
    PreviewClosed,
    DownloadRequested,
    DownloadFinished(Result<PathBuf, GalleryError>),
    DeleteRequested,
    WarningsDismissed,
    /// Play/Pause in the preview of a video
    PlaybackToggled,
    Playback(PlaybackEvent),
}

impl Gallery {
    /// Create a new instance of the application
    fn new(config: GalleryConfig) -> (Self, Task<Message>) {
        info!(download_dir = %config.download_dir().display(), "media gallery started");

        (
            Gallery {
                config,
                catalog: Catalog::new(),
                session: PreviewSession::new(),
                active_tab: MediaKind::Photo,
                visuals: HashMap::new(),
                player: None,
                warnings: Vec::new(),
                status: "Ready.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(kind) => {
                self.active_tab = kind;
                Task::none()
            }
            Message::AddRequested(kind) => {
                let Some(paths) = FileDialog::new()
                    .set_title(format!("Add {}", kind.label()))
                    .add_filter(kind.label(), kind.extensions())
                    .pick_files()
                else {
                    return Task::none();
                };

                // Each accepted file decodes on its own; they are added
                // to the catalog in whatever order they finish.
                let mut tasks = Vec::new();
                for path in paths {
                    let mime = mime_for_path(&path);
                    if !kind.accepts(mime.as_deref()) {
                        let name = display_name(&path);
                        warn!(name = %name, mime = ?mime, "rejected {}", kind);
                        self.warnings
                            .push(format!("{} is not {} file.", name, kind.article_noun()));
                        continue;
                    }

                    let thumbnail_size = u32::from(self.config.thumbnail_size);
                    tasks.push(Task::perform(decode_file(path, thumbnail_size), move |result| {
                        Message::FileDecoded(kind, result)
                    }));
                }

                if !tasks.is_empty() {
                    self.status = format!("Reading {} file(s)...", tasks.len());
                }
                Task::batch(tasks)
            }
            Message::FileDecoded(kind, Ok(file)) => {
                let added = match self.catalog.add(
                    kind,
                    &file.name,
                    file.byte_size,
                    file.source,
                    file.mime_type.as_deref(),
                ) {
                    Ok(added) => added,
                    Err(e) => {
                        warn!(error = %e, "file not added");
                        self.warnings.push(e.to_string());
                        return Task::none();
                    }
                };

                let record = &added.record;
                self.status = if added.became_non_empty {
                    format!("Added the first {}: {} ({}).", kind, record.name, record.size_label)
                } else {
                    format!("Added {} ({}).", record.name, record.size_label)
                };

                match record.kind {
                    MediaKind::Photo => {
                        if let Some(visual) = Visual::for_record(record, file.thumbnail.as_ref()) {
                            self.visuals.insert(record.id, visual);
                        }
                        Task::none()
                    }
                    MediaKind::Video => {
                        let id = record.id;
                        Task::perform(
                            video::poster(record.source.clone(), record.name.clone()),
                            move |result| Message::PosterReady(id, result),
                        )
                    }
                }
            }
            Message::PosterReady(id, Ok(frame)) => {
                // The video may have been deleted while ffmpeg was running
                match self.catalog.get(id) {
                    Some(record) => {
                        if let Some(visual) = Visual::for_record(record, Some(&frame)) {
                            self.visuals.insert(id, visual);
                        }
                    }
                    None => debug!(id = %id, "poster for a removed video"),
                }
                Task::none()
            }
            Message::PosterReady(id, Err(e)) => {
                warn!(id = %id, error = %e, "no poster");
                Task::none()
            }
            Message::FileDecoded(_, Err(e)) => {
                warn!(error = %e, "file could not be read");
                self.warnings.push(e.to_string());
                Task::none()
            }
            Message::PreviewRequested(id) => {
                if let Some(record) = self.catalog.get(id) {
                    self.session.open(record);
                    self.player = (record.kind == MediaKind::Video).then(|| Player::new(id));
                }
                Task::none()
            }
            Message::PreviewClosed => {
                // Dropping the player drops its stream, which stops playback
                self.player = None;
                self.session.close();
                Task::none()
            }
            Message::DownloadRequested => {
                let Some(record) = self.session.current(&self.catalog) else {
                    return Task::none();
                };

                let request = self.session.download(record);
                Task::perform(
                    media::download::save(request, self.config.download_dir()),
                    Message::DownloadFinished,
                )
            }
            Message::DownloadFinished(Ok(path)) => {
                self.status = format!("Saved to {}.", path.display());
                Task::none()
            }
            Message::DownloadFinished(Err(e)) => {
                warn!(error = %e, "download failed");
                Task::none()
            }
            Message::DeleteRequested => {
                self.player = None;
                let Some(record) = self.session.current(&self.catalog).cloned() else {
                    self.session.close();
                    return Task::none();
                };

                match self.session.delete(&mut self.catalog, &record) {
                    Ok(removed) => {
                        self.visuals.remove(&removed.record.id);
                        self.status = if removed.became_empty {
                            format!("Deleted {}. No {} left.", removed.record.name, removed.record.kind.label().to_lowercase())
                        } else {
                            format!("Deleted {}.", removed.record.name)
                        };
                    }
                    Err(e) => warn!(error = %e, "delete failed"),
                }
                Task::none()
            }
            Message::WarningsDismissed => {
                self.warnings.clear();
                Task::none()
            }
            Message::PlaybackToggled => {
                if let Some(player) = self.player.as_mut() {
                    player.toggle();
                }
                Task::none()
            }
            Message::Playback(event) => {
                if let Some(player) = self.player.as_mut() {
                    player.on_event(event);
                }
                Task::none()
            }
        }
    }

    /// Window title with the number of items in the gallery
    fn title(&self) -> String {
        match self.catalog.total() {
            0 => "Media Gallery".to_string(),
            total => format!("Media Gallery ({})", total),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let tabs = Row::with_children(MediaKind::ALL.iter().map(|&kind| {
            let style: fn(&Theme, button::Status) -> button::Style = if kind == self.active_tab {
                button::primary
            } else {
                button::secondary
            };

            button(text(format!("{} ({})", kind.label(), self.catalog.len(kind))))
                .style(style)
                .on_press(Message::TabSelected(kind))
                .padding(10)
                .into()
        }))
        .spacing(10);

        let gallery = ui::gallery::view(
            self.active_tab,
            &self.catalog,
            &self.visuals,
            f32::from(self.config.thumbnail_size),
        );

        let mut content = Column::new()
            .spacing(20)
            .padding(30)
            .push(text("Media Gallery").size(36))
            .push(tabs);

        if !self.warnings.is_empty() {
            content = content.push(self.warnings_banner());
        }

        let content = content.push(gallery).push(text(&self.status).size(14));

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill);

        let record = match self.session.state() {
            SessionState::Open(id) => self.catalog.get(id),
            SessionState::Closed => None,
        };

        match record {
            Some(record) => ui::preview::modal(
                base,
                ui::preview::view(
                    record,
                    self.visuals.get(&record.id),
                    self.player.as_ref().filter(|player| player.id() == record.id),
                ),
                Message::PreviewClosed,
            ),
            None => base.into(),
        }
    }

    fn warnings_banner(&self) -> Element<Message> {
        let lines = Column::with_children(
            self.warnings
                .iter()
                .map(|warning| text(warning.as_str()).size(14).into()),
        )
        .spacing(4)
        .width(Length::Fill);

        container(
            row![
                lines,
                button("Dismiss")
                    .on_press(Message::WarningsDismissed)
                    .style(button::secondary),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
        .padding(12)
        .style(container::rounded_box)
        .into()
    }

    /// Escape closes the preview while it is open; a playing video
    /// streams frames until it is paused or the preview closes.
    fn subscription(&self) -> Subscription<Message> {
        if !self.session.is_open() {
            return Subscription::none();
        }

        let escape = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::PreviewClosed),
            _ => None,
        });

        let playback = match (&self.player, self.session.current(&self.catalog)) {
            (Some(player), Some(record)) => player.subscription(record).map(Message::Playback),
            _ => Subscription::none(),
        };

        Subscription::batch([escape, playback])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    // A broken config shouldn't stop the gallery; fall back to defaults
    let (config, config_error) = match GalleryConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (GalleryConfig::default(), Some(e)),
    };

    logging::init_tracing(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "using default config");
    }

    iced::application(Gallery::title, Gallery::update, Gallery::view)
        .subscription(Gallery::subscription)
        .theme(Gallery::theme)
        .centered()
        .run_with(move || Gallery::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::SourceRef;

    fn gallery() -> Gallery {
        Gallery::new(GalleryConfig::default()).0
    }

    fn decoded(name: &str, mime: &str, thumbnail: Option<Frame>) -> DecodedFile {
        DecodedFile {
            name: name.to_string(),
            byte_size: 2048,
            mime_type: Some(mime.to_string()),
            source: SourceRef::new(vec![1u8; 2048]),
            thumbnail,
        }
    }

    fn pixel() -> Frame {
        Frame::from_rgb(1, 1, &[200, 100, 50])
    }

    fn only_id(gallery: &Gallery, kind: MediaKind) -> MediaId {
        let records = gallery.catalog.list_by_kind(kind);
        assert_eq!(records.len(), 1);
        records[0].id
    }

    #[test]
    fn test_wrong_type_becomes_warning() {
        let mut gallery = gallery();
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Photo,
            Ok(decoded("notes.txt", "text/plain", None)),
        ));

        assert_eq!(gallery.warnings.len(), 1);
        assert!(gallery.warnings[0].contains("notes.txt"));
        assert!(gallery.catalog.is_empty(MediaKind::Photo));
        assert_eq!(gallery.title(), "Media Gallery");
    }

    #[test]
    fn test_read_error_becomes_warning() {
        let mut gallery = gallery();
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Photo,
            Err(GalleryError::Decode {
                path: PathBuf::from("/gone/a.png"),
                reason: "No such file or directory".to_string(),
            }),
        ));

        assert_eq!(gallery.warnings.len(), 1);
        assert!(gallery.warnings[0].contains("a.png"));

        let _ = gallery.update(Message::WarningsDismissed);
        assert!(gallery.warnings.is_empty());
    }

    #[test]
    fn test_added_photo_gets_visual() {
        let mut gallery = gallery();
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Photo,
            Ok(decoded("a.png", "image/png", Some(pixel()))),
        ));
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Photo,
            Ok(decoded("b.avif", "image/avif", None)),
        ));

        let records = gallery.catalog.list_by_kind(MediaKind::Photo);
        assert_eq!(records.len(), 2);
        assert!(matches!(
            gallery.visuals.get(&records[0].id),
            Some(Visual::Photo { .. })
        ));
        // Undecodable images are drawn as a tile
        assert!(!gallery.visuals.contains_key(&records[1].id));
        assert_eq!(gallery.title(), "Media Gallery (2)");
        assert!(gallery.warnings.is_empty());
    }

    #[test]
    fn test_delete_clears_visual_and_closes() {
        let mut gallery = gallery();
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Photo,
            Ok(decoded("a.png", "image/png", Some(pixel()))),
        ));
        let id = only_id(&gallery, MediaKind::Photo);
        assert!(gallery.visuals.contains_key(&id));

        let _ = gallery.update(Message::PreviewRequested(id));
        assert_eq!(gallery.session.state(), SessionState::Open(id));
        assert!(gallery.player.is_none());

        let _ = gallery.update(Message::DeleteRequested);
        assert!(!gallery.visuals.contains_key(&id));
        assert_eq!(gallery.session.state(), SessionState::Closed);
        assert!(gallery.catalog.is_empty(MediaKind::Photo));
    }

    #[test]
    fn test_closing_preview_stops_video() {
        let mut gallery = gallery();
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Video,
            Ok(decoded("clip.mp4", "video/mp4", None)),
        ));
        let id = only_id(&gallery, MediaKind::Video);

        let _ = gallery.update(Message::PreviewRequested(id));
        let _ = gallery.update(Message::PlaybackToggled);
        assert!(gallery.player.as_ref().is_some_and(Player::is_playing));

        let _ = gallery.update(Message::PreviewClosed);
        assert!(gallery.player.is_none());
        assert_eq!(gallery.session.state(), SessionState::Closed);
    }

    #[test]
    fn test_poster_for_deleted_video_is_dropped() {
        let mut gallery = gallery();
        let _ = gallery.update(Message::FileDecoded(
            MediaKind::Video,
            Ok(decoded("clip.mp4", "video/mp4", None)),
        ));
        let id = only_id(&gallery, MediaKind::Video);

        let _ = gallery.update(Message::PosterReady(id, Ok(pixel())));
        assert!(matches!(gallery.visuals.get(&id), Some(Visual::Poster(_))));

        let _ = gallery.update(Message::PreviewRequested(id));
        let _ = gallery.update(Message::DeleteRequested);
        assert!(gallery.visuals.is_empty());

        let _ = gallery.update(Message::PosterReady(id, Ok(pixel())));
        assert!(gallery.visuals.is_empty());
    }
}
