use std::path::PathBuf;

use iced::widget::{button, column, container, row, text, text_input, Space, TextInput};
use iced::{Alignment, Border, Element, Length, Padding};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::components::accent_button_style;
use crate::media::{ACCENT_RED, BACKGROUND_BLACK, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};

pub const DEFAULT_LANGUAGE: &str = "es-ES";
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const API_KEY_VAR: &str = "TMDB_API_KEY";
const LANGUAGE_VAR: &str = "TMDB_LANGUAGE";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

fn default_api_base_url() -> String {
    String::from(DEFAULT_API_BASE_URL)
}

fn default_image_base_url() -> String {
    String::from(DEFAULT_IMAGE_BASE_URL)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cinegrid").join("config.json"))
    }

    /// Settings file merged with environment overrides. Missing or unreadable
    /// files fall back to defaults.
    pub fn load() -> Self {
        let from_file = Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| match serde_json::from_str::<AppSettings>(&content) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    warn!("Ignoring malformed settings file: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        from_file.with_overrides(
            std::env::var(API_KEY_VAR).ok(),
            std::env::var(LANGUAGE_VAR).ok(),
        )
    }

    pub fn with_overrides(mut self, api_key: Option<String>, language: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            info!("Using API key from {}", API_KEY_VAR);
            self.api_key = key.trim().to_string();
        }
        if let Some(lang) = language.filter(|l| !l.trim().is_empty()) {
            self.language = lang.trim().to_string();
        }
        self
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum SetupMessage {
    ApiKeyChanged(String),
    LanguageChanged(String),
    Submit,
}

pub struct SetupPage {
    pub api_key: String,
    pub language: String,
    pub error: Option<String>,
    base: AppSettings,
}

impl Default for SetupPage {
    fn default() -> Self {
        Self::from_settings(AppSettings::default())
    }
}

impl SetupPage {
    /// Starts the form from `base`, which keeps any URLs or language already
    /// configured.
    pub fn from_settings(base: AppSettings) -> Self {
        Self {
            api_key: base.api_key.clone(),
            language: base.language.clone(),
            error: None,
            base,
        }
    }

    fn submitted_settings(&self) -> Option<AppSettings> {
        if self.api_key.trim().is_empty() {
            return None;
        }
        Some(AppSettings {
            api_key: self.api_key.trim().to_string(),
            language: if self.language.trim().is_empty() {
                default_language()
            } else {
                self.language.trim().to_string()
            },
            ..self.base.clone()
        })
    }

    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::ApiKeyChanged(key) => {
                self.api_key = key;
                self.error = None;
                None
            }
            SetupMessage::LanguageChanged(lang) => {
                self.language = lang;
                None
            }
            SetupMessage::Submit => {
                let Some(settings) = self.submitted_settings() else {
                    self.error = Some(String::from("API key is required"));
                    return None;
                };
                let saved = settings.save();
                Some(Self::after_save(settings, saved))
            }
        }
    }

    /// Settings that could not be written still start the session; they just
    /// won't survive a restart.
    fn after_save(settings: AppSettings, saved: Result<(), SettingsError>) -> AppSettings {
        if let Err(e) = saved {
            warn!("Could not persist settings, continuing for this session: {}", e);
        }
        settings
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let heading = column![
            text("Movies from TMDb").size(26).color(TEXT_WHITE),
            text("A TMDB API key is needed before browsing.")
                .size(13)
                .color(TEXT_GRAY),
        ]
        .spacing(6);

        let api_key = setup_field(
            "API key",
            None,
            text_input("TMDB v3 API key", &self.api_key)
                .on_input(SetupMessage::ApiKeyChanged)
                .on_submit(SetupMessage::Submit)
                .secure(true),
        );
        let language = setup_field(
            "Language",
            Some("Used for titles and overviews, e.g. en-US"),
            text_input(DEFAULT_LANGUAGE, &self.language)
                .on_input(SetupMessage::LanguageChanged)
                .on_submit(SetupMessage::Submit),
        );

        let mut actions = row![].spacing(12).align_y(Alignment::Center);
        if let Some(err) = &self.error {
            actions = actions.push(text(err).size(13).color(ACCENT_RED));
        }
        actions = actions.push(Space::new().width(Length::Fill)).push(
            button(text("Continue").size(14).color(TEXT_WHITE))
                .padding(Padding::new(8.0).left(20.0).right(20.0))
                .style(accent_button_style)
                .on_press(SetupMessage::Submit),
        );

        let card = container(column![heading, api_key, language, actions].spacing(20))
            .width(Length::Fixed(420.0))
            .padding(24)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border::default().rounded(8),
                ..Default::default()
            });

        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }
}

fn setup_field<'a>(
    label: &'a str,
    hint: Option<&'a str>,
    input: TextInput<'a, SetupMessage>,
) -> Element<'a, SetupMessage> {
    let mut field = column![text(label).size(14).color(TEXT_WHITE)].spacing(6);
    if let Some(hint) = hint {
        field = field.push(text(hint).size(12).color(TEXT_GRAY));
    }
    field
        .push(input.padding(8).size(14).width(Length::Fill))
        .into()
}
