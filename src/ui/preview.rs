/// Preview modal: the open record plus Download / Delete / Close
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, stack, svg, text,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use super::player::Player;
use super::Visual;
use crate::state::data::{MediaKind, MediaRecord};
use crate::Message;

const PREVIEW_HEIGHT: f32 = 520.0;

/// Modal content for `record`. Videos get a Play/Pause button driving
/// `player`; until the first frame arrives the poster is shown.
pub fn view<'a>(
    record: &'a MediaRecord,
    visual: Option<&Visual>,
    player: Option<&Player>,
) -> Element<'a, Message> {
    let playing_frame = player.and_then(Player::frame);

    let content: Element<'a, Message> = match (playing_frame, visual) {
        (Some(handle), _)
        | (None, Some(Visual::Photo { full: handle, .. }))
        | (None, Some(Visual::Poster(handle))) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(PREVIEW_HEIGHT)
            .content_fit(ContentFit::Contain)
            .into(),
        (None, Some(Visual::Svg(handle))) => svg(handle.clone())
            .width(Length::Fill)
            .height(PREVIEW_HEIGHT)
            .content_fit(ContentFit::Contain)
            .into(),
        (None, None) => container(
            column![
                text(record.name.as_str()).size(20),
                text(record.mime_type.as_str()).size(14),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(PREVIEW_HEIGHT)
        .center_x(Length::Fill)
        .center_y(PREVIEW_HEIGHT)
        .style(container::rounded_box)
        .into(),
    };

    let mut actions = row![].spacing(10).align_y(Alignment::Center);
    if record.kind == MediaKind::Video {
        let label = match player {
            Some(player) if player.is_playing() => "Pause",
            _ => "Play",
        };
        actions = actions.push(
            button(label)
                .on_press(Message::PlaybackToggled)
                .style(button::secondary)
                .padding(10),
        );
        if let Some(player) = player {
            actions = actions.push(text(format!("{:.1} s", player.position())).size(14));
        }
    }

    let actions = actions
        .push(
            button("Download")
                .on_press(Message::DownloadRequested)
                .padding(10),
        )
        .push(
            button("Delete")
                .on_press(Message::DeleteRequested)
                .style(button::danger)
                .padding(10),
        )
        .push(horizontal_space())
        .push(
            button("Close")
                .on_press(Message::PreviewClosed)
                .style(button::secondary)
                .padding(10),
        );

    let panel = column![
        content,
        text(format!("{} ({})", record.name, record.size_label)).size(16),
        actions,
    ]
    .spacing(16)
    .padding(20)
    .max_width(900);

    container(panel).style(container::rounded_box).into()
}

/// Lay `content` over `base` on a dimmed backdrop.
/// Clicking the backdrop emits `on_blur`; `base` gets no input while open.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
