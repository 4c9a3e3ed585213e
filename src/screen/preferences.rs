use crate::config::{get_settings, get_settings_mut};
use iced::widget::{Column, Container, PickList, Scrollable, Text, Toggler};
use iced::{Element, Length, Task};
use iced_modern_theme::Modern;
use log::{error, info};

pub enum Action {
    None,
    UpdateUI(),
}

#[derive(Debug, Clone)]
pub enum Message {
    LanguageChanged(String),
    ThemeChanged(String),
    LoggingToggled(bool),
}

pub struct Preferences {
    available_languages: Vec<String>,
    selected_language: String,
    pub theme: String,
    pub enable_logging: bool,
    environment: String,
}

const THEMES: [&str; 2] = ["Light", "Dark"];

impl Preferences {
    pub fn new() -> (Self, Task<Message>) {
        let settings = get_settings();
        let available_languages = rust_i18n::available_locales!()
            .iter()
            .map(|l| l.to_string())
            .collect();
        (
            Self {
                available_languages,
                selected_language: settings.config.language.clone(),
                theme: settings.config.theme.clone(),
                enable_logging: settings.config.api.features.enable_logging,
                environment: settings.config.api.environment.to_string(),
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Action {
        let mut settings = get_settings_mut();

        let action = match message {
            Message::LanguageChanged(language) => {
                rust_i18n::set_locale(&language);
                settings.config.language = language;
                self.selected_language = settings.config.language.clone();
                Action::UpdateUI()
            }
            Message::ThemeChanged(theme) => {
                settings.config.theme = theme;
                self.theme = settings.config.theme.clone();
                Action::UpdateUI()
            }
            Message::LoggingToggled(enabled) => {
                info!("API logging {}", if enabled { "enabled" } else { "disabled" });
                settings.config.api.features.enable_logging = enabled;
                self.enable_logging = enabled;
                Action::UpdateUI()
            }
        };

        if let Err(err) = settings.save() {
            error!("Failed to save settings: {}", err);
        }
        action
    }

    pub fn view(&self) -> Element<'_, Message> {
        let language_section = section(
            t!("preferences.label.language").to_string(),
            PickList::new(
                self.available_languages.clone(),
                Some(self.selected_language.clone()),
                Message::LanguageChanged,
            )
            .placeholder(t!("preferences.select.language"))
            .style(Modern::pick_list())
            .width(Length::Fill),
        );

        let theme_section = section(
            t!("preferences.label.theme").to_string(),
            PickList::new(THEMES, Some(self.theme.as_str()), |theme| {
                Message::ThemeChanged(theme.to_string())
            })
            .placeholder(t!("preferences.select.theme"))
            .style(Modern::pick_list())
            .width(Length::Fill),
        );

        let logging_section = section(
            t!("preferences.label.logging").to_string(),
            Toggler::new(self.enable_logging)
                .label(t!("preferences.logging.description"))
                .on_toggle(Message::LoggingToggled),
        );

        let environment_section = section(
            t!("preferences.label.environment").to_string(),
            Text::new(self.environment.clone())
                .size(16)
                .style(Modern::secondary_text()),
        );

        let scrollable = Scrollable::new(
            Column::new()
                .padding(20)
                .spacing(30)
                .push(
                    Text::new(t!("preferences.title"))
                        .size(32)
                        .style(Modern::primary_text()),
                )
                .push(
                    Text::new(t!("preferences.subtitle"))
                        .size(16)
                        .style(Modern::secondary_text()),
                )
                .push(
                    Column::new()
                        .spacing(25)
                        .push(language_section)
                        .push(theme_section)
                        .push(logging_section)
                        .push(environment_section),
                ),
        );

        Container::new(scrollable)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn section<'a>(title: String, widget: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(12)
            .push(Text::new(title).size(18).style(Modern::primary_text()))
            .push(widget),
    )
    .padding(20)
    .style(Modern::card_container())
    .width(Length::Fill)
    .into()
}
