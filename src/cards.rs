use iced::widget::{container, image, mouse_area, text, tooltip, Column, Row};
use iced::{Border, Color, Element, Length, Shadow};

use crate::media::{Message, Movie, PosterSize, Thumbnail, SURFACE_DARK_GRAY, TEXT_WHITE};
use crate::CineGrid;

const CARDS_PER_ROW: usize = 4;
const GRID_SPACING: f32 = 10.0;

const CARD_WIDTH: f32 = PosterSize::THUMBNAIL.width as f32;
const CARD_HEIGHT: f32 = PosterSize::THUMBNAIL.height as f32;

/// A clickable poster. `on_activate` turns the card's movie into the message
/// emitted when the card is pressed.
pub fn poster_card<'a>(
    thumbnail: &'a Thumbnail,
    on_activate: impl Fn(Movie) -> Message,
) -> Element<'a, Message> {
    let poster = image(thumbnail.poster.handle.clone())
        .width(Length::Fixed(CARD_WIDTH))
        .height(Length::Fixed(CARD_HEIGHT));

    let card = container(poster)
        .width(Length::Fixed(CARD_WIDTH))
        .height(Length::Fixed(CARD_HEIGHT))
        .style(|_| container::Style {
            background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: 8.0,
            },
            ..Default::default()
        });

    let clickable = mouse_area(card)
        .interaction(iced::mouse::Interaction::Pointer)
        .on_press(on_activate(thumbnail.movie.clone()));

    let label = container(text(&thumbnail.movie.title).size(12).color(TEXT_WHITE))
        .padding(6)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.85))),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    tooltip(clickable, label, tooltip::Position::Bottom).into()
}

impl CineGrid {
    pub fn view_thumbnail_grid(&self) -> Element<'_, Message> {
        let thumbnails = self.grid.thumbnails();
        if thumbnails.is_empty() {
            return self.view_grid_placeholder();
        }

        let mut rows: Vec<Element<Message>> = Vec::new();
        for chunk in thumbnails.chunks(CARDS_PER_ROW) {
            let cards: Vec<Element<Message>> = chunk
                .iter()
                .map(|thumbnail| poster_card(thumbnail, Message::OpenDetail))
                .collect();
            rows.push(
                Row::with_children(cards)
                    .spacing(GRID_SPACING)
                    .align_y(iced::Alignment::Start)
                    .into(),
            );
        }

        Column::with_children(rows)
            .spacing(GRID_SPACING)
            .width(Length::Fill)
            .into()
    }
}
