mod cards;
mod components;
mod detail;
mod detail_handlers;
mod detail_popup;
mod grid;
mod handlers;
mod mapper;
mod media;
mod poster;
mod settings;
mod tmdb;

use std::sync::Arc;

use iced::widget::container;
use iced::{Element, Font, Length, Size, Task, Theme};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use detail::DetailController;
use grid::GridController;
use media::{Message, BACKGROUND_BLACK};
use settings::{AppSettings, SetupPage};
use tmdb::{TmdbApi, TmdbClient};

#[derive(Default)]
pub struct CineGrid {
    pub setup_page: Option<SetupPage>,
    pub tmdb_client: Option<Arc<dyn TmdbApi>>,
    pub search_query: String,
    pub grid: GridController,
    pub detail: DetailController,
}

impl CineGrid {
    fn new() -> (Self, Task<Message>) {
        let settings = AppSettings::load();
        if !settings.is_valid() {
            info!("No TMDB API key configured, showing setup page");
            return (
                Self {
                    setup_page: Some(SetupPage::from_settings(settings)),
                    ..Default::default()
                },
                Task::none(),
            );
        }

        let mut app = Self::default();
        let load = app.initialize_with_settings(settings);
        (app, load)
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        info!("Using TMDB at {} ({})", settings.api_base_url, settings.language);
        self.tmdb_client = Some(Arc::new(TmdbClient::from_settings(&settings)));
        self.setup_page = None;
        Task::done(Message::LoadPopular)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let main_content = container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            });

        if self.detail.is_open() {
            return iced::widget::stack![main_content, self.view_detail_overlay()]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,wgpu=warn,iced_wgpu=warn,cosmic_text=warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file loaded ({})", e),
    }

    iced::application(CineGrid::new, CineGrid::update, CineGrid::view)
        .title("Movies from TMDb")
        .theme(CineGrid::theme)
        .window_size(Size::new(800.0, 600.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
