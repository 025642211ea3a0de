use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    GridRequest, Message, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::CineGrid;

pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_ARROW_LEFT: char = '\u{F12F}';

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn accent_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => Color::from_rgb(0.7, 0.02, 0.06),
        _ => ACCENT_RED,
    };
    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: TEXT_WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 4.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

impl CineGrid {
    pub fn view_header(&self) -> Element<'_, Message> {
        let label = text("Search: ").size(14).color(TEXT_WHITE);

        let search_input = text_input("Movie title...", &self.search_query)
            .on_input(Message::SearchQueryChanged)
            .on_submit(Message::SearchSubmit)
            .padding(8)
            .width(Length::Fixed(240.0))
            .style(|_theme, _status| text_input::Style {
                background: iced::Background::Color(SURFACE_DARK_GRAY),
                border: Border {
                    color: TEXT_GRAY,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                icon: TEXT_GRAY,
                placeholder: TEXT_GRAY,
                value: TEXT_WHITE,
                selection: ACCENT_RED,
            });

        let search_button = button(
            row![
                icon(ICON_SEARCH).size(14).color(TEXT_WHITE),
                text("Search").size(14).color(TEXT_WHITE)
            ]
            .spacing(6)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(8.0).left(14.0).right(14.0))
        .style(accent_button_style)
        .on_press(Message::SearchSubmit);

        let controls = row![label, search_input, search_button]
            .spacing(8)
            .align_y(iced::Alignment::Center);

        container(controls)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(Padding::new(12.0))
            .into()
    }

    fn view_result_caption(&self) -> Element<'_, Message> {
        let caption = match &self.grid.current().request {
            Some(GridRequest::Popular) => String::from("Popular movies"),
            Some(GridRequest::Search(query)) => format!("Results for \"{}\"", query),
            None => String::new(),
        };
        text(caption).size(16).color(TEXT_GRAY).into()
    }

    pub fn view_grid_placeholder(&self) -> Element<'_, Message> {
        let message = if self.grid.is_loading() {
            "Loading…"
        } else {
            "No movies to show"
        };

        container(text(message).size(18).color(TEXT_GRAY))
            .width(Length::Fill)
            .height(Length::Fixed(300.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    pub fn view_main_content(&self) -> Element<'_, Message> {
        let body = column![self.view_result_caption(), self.view_thumbnail_grid()]
            .spacing(12)
            .padding(Padding::new(16.0).top(0.0))
            .width(Length::Fill);

        column![
            self.view_header(),
            scrollable(body).width(Length::Fill).height(Length::Fill),
            Space::new().height(4)
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
