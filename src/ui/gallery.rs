/// Thumbnail grid for one gallery tab
use std::collections::HashMap;

use iced::widget::{button, column, container, scrollable, svg, text};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;

use super::Visual;
use crate::state::catalog::Catalog;
use crate::state::data::{MediaId, MediaKind, MediaRecord};
use crate::Message;

/// Build the gallery for `kind`: an add button, then either the grid
/// or the empty-state placeholder.
pub fn view<'a>(
    kind: MediaKind,
    catalog: &'a Catalog,
    visuals: &'a HashMap<MediaId, Visual>,
    card_size: f32,
) -> Element<'a, Message> {
    let add_button = button(text(match kind {
        MediaKind::Photo => "Add photos",
        MediaKind::Video => "Add videos",
    }))
    .on_press(Message::AddRequested(kind))
    .padding(10);

    let body: Element<'a, Message> = if catalog.is_empty(kind) {
        empty_state(kind)
    } else {
        let cards = catalog
            .list_by_kind(kind)
            .iter()
            .map(|record| card(record, visuals.get(&record.id), card_size))
            .collect();

        scrollable(Wrap::with_elements(cards).spacing(12.0).line_spacing(12.0))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    };

    column![add_button, body].spacing(20).into()
}

/// One clickable card. Clicking opens the preview for this record's id.
fn card<'a>(record: &'a MediaRecord, visual: Option<&Visual>, size: f32) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match visual {
        Some(Visual::Photo { thumbnail: handle, .. }) | Some(Visual::Poster(handle)) => {
            iced::widget::image(handle.clone())
                .width(size)
                .height(size)
                .content_fit(ContentFit::Cover)
                .into()
        }
        Some(Visual::Svg(handle)) => svg(handle.clone())
            .width(size)
            .height(size)
            .content_fit(ContentFit::Contain)
            .into(),
        // Posters still loading, and files nothing could decode
        None => container(text(record.mime_type.as_str()).size(12))
            .width(size)
            .height(size)
            .center_x(size)
            .center_y(size)
            .style(container::rounded_box)
            .into(),
    };

    button(column![preview, text(record.name.as_str()).size(14)].spacing(6).width(size))
        .on_press(Message::PreviewRequested(record.id))
        .style(button::text)
        .padding(4)
        .into()
}

/// Placeholder shown while a gallery has no records
fn empty_state<'a>(kind: MediaKind) -> Element<'a, Message> {
    let message = match kind {
        MediaKind::Photo => "No photos added yet",
        MediaKind::Video => "No videos added yet",
    };

    container(text(message).size(18))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
