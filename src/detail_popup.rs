use iced::widget::{button, column, container, image, opaque, row, scrollable, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{accent_button_style, icon, ICON_ARROW_LEFT};
use crate::detail::DetailView;
use crate::media::{Message, PosterSize, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::CineGrid;

const POPUP_WIDTH: f32 = 760.0;
const SUMMARY_HEIGHT: f32 = 140.0;

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 12.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 25.0),
            blur_radius: 50.0,
        },
        ..Default::default()
    }
}

fn text_region_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgb(0.12, 0.12, 0.12))),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

/// Read-only wrapped text in its own scrollable box.
fn text_region<'a>(content: String, height: Length) -> Element<'a, Message> {
    container(
        scrollable(
            text(content)
                .size(14)
                .color(TEXT_WHITE)
                .width(Length::Fill),
        )
        .height(Length::Fill),
    )
    .padding(8)
    .width(Length::Fill)
    .height(height)
    .style(text_region_style)
    .into()
}

impl CineGrid {
    pub fn view_detail_overlay(&self) -> Element<'_, Message> {
        let Some(detail) = self.detail.view() else {
            return Space::new().into();
        };

        let popup = container(self.view_detail_content(detail))
            .width(Length::Fixed(POPUP_WIDTH))
            .max_height(900.0)
            .padding(Padding::new(20.0))
            .clip(true)
            .style(popup_container_style);

        // the grid underneath receives no input while the dialog is open
        let overlay_bg = opaque(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.85,
                    ))),
                    ..Default::default()
                }),
        );

        let centered_popup = container(opaque(popup))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(Padding::new(16.0));

        iced::widget::stack![overlay_bg, centered_popup]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_detail_content<'a>(&'a self, detail: &'a DetailView) -> Element<'a, Message> {
        let title = text(&detail.movie.title)
            .size(22)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let lists = column![
            text_region(detail.actors_text(), Length::FillPortion(1)),
            text_region(detail.similar_text(), Length::FillPortion(1)),
        ]
        .spacing(12)
        .width(Length::Fill)
        .height(Length::Fixed(PosterSize::DETAIL.height as f32));

        let body = row![self.view_detail_poster(detail), lists].spacing(16);

        let content = column![
            title,
            text_region(detail.summary_text(), Length::Fixed(SUMMARY_HEIGHT)),
            body,
        ]
        .spacing(16)
        .width(Length::Fill);

        column![
            scrollable(content).height(Length::Fill),
            self.view_detail_back_button()
        ]
        .spacing(16)
        .align_x(iced::Alignment::Center)
        .into()
    }

    fn view_detail_poster<'a>(&'a self, detail: &'a DetailView) -> Element<'a, Message> {
        let width = Length::Fixed(PosterSize::DETAIL.width as f32);
        let height = Length::Fixed(PosterSize::DETAIL.height as f32);

        match &detail.poster {
            Some(poster) => image(poster.handle.clone())
                .width(Length::Fixed(poster.width as f32))
                .height(Length::Fixed(poster.height as f32))
                .into(),
            None => container(text("No image").size(14).color(TEXT_GRAY))
                .width(width)
                .height(height)
                .center_x(width)
                .center_y(height)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    ..Default::default()
                })
                .into(),
        }
    }

    fn view_detail_back_button(&self) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_ARROW_LEFT).size(14).color(TEXT_WHITE),
                text("Back").size(14).color(TEXT_WHITE)
            ]
            .spacing(6)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(8.0).left(18.0).right(18.0))
        .style(accent_button_style)
        .on_press(Message::CloseDetail)
        .into()
    }
}
