#[macro_use]
extern crate rust_i18n;
mod components;
mod config;
mod models;
mod screen;
mod services;
mod utils;

use crate::components::navbar::{NavButton, Navbar};
use crate::components::toast::{DEFAULT_DURATION, Toast, ToastKind};
use crate::components::{navbar, toast};
use crate::config::get_settings;
use crate::screen::{Preferences, Screen, Viewer, preferences, viewer};
use crate::services::apod_source::NasaApod;
use crate::services::logger_service;
use iced::widget::{Column, Row, container, stack};
use iced::{Alignment, Element, Length, Subscription, Task, Theme, time};
use iced_modern_theme::Modern;
use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};

i18n!("locales", fallback = "en");

#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Viewer(viewer::Message),
    Preferences(preferences::Message),
    SettingsUpdated,
    Toast(toast::Message),
    Tick(Instant),
    HandleToast {
        kind: ToastKind,
        message: String,
        duration: Option<Duration>,
    },
}

pub struct SpaceViewer {
    theme: Theme,
    screen: Screen,
    viewer: Viewer,
    navbar: Navbar,
    toasts: Vec<Toast>,
    next_toast_id: u32,
}

fn theme_for(name: &str) -> Theme {
    if name == "Dark" {
        Modern::dark_theme()
    } else {
        Modern::light_theme()
    }
}

impl SpaceViewer {
    pub fn new() -> (Self, Task<Message>) {
        let settings = get_settings();
        let source = Arc::new(NasaApod::new(settings.config.api.clone()));
        info!(
            "Using {} ({} environment)",
            source.config().base_url,
            source.config().environment
        );

        let (viewer, task) = Viewer::new(source);
        (
            Self {
                theme: theme_for(&settings.config.theme),
                screen: Screen::Viewer,
                viewer,
                navbar: Navbar::new(),
                toasts: vec![],
                next_toast_id: 0,
            },
            task.map(Message::Viewer),
        )
    }

    pub fn title(&self) -> String {
        t!("app.title").to_string()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn viewer_task(&mut self, action: viewer::Action) -> Task<Message> {
        match action {
            viewer::Action::None => Task::none(),
            viewer::Action::Run(task) => task.map(Message::Viewer),
            viewer::Action::ShowToast {
                kind,
                message,
                duration,
            } => self.update(Message::HandleToast {
                kind,
                message,
                duration,
            }),
            viewer::Action::Batch(batch) => {
                let tasks: Vec<Task<Message>> =
                    batch.into_iter().map(|a| self.viewer_task(a)).collect();
                Task::batch(tasks)
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::HandleToast {
                kind,
                message,
                duration,
            } => {
                self.toasts.push(Toast {
                    id: self.next_toast_id,
                    message,
                    kind,
                    created: Instant::now(),
                    duration: duration.unwrap_or(DEFAULT_DURATION),
                });
                self.next_toast_id += 1;
                Task::none()
            }
            Message::Viewer(message) => {
                let action = self.viewer.update(message);
                self.viewer_task(action)
            }
            Message::Preferences(message) => {
                if let Screen::Preferences(preferences) = &mut self.screen {
                    match preferences.update(message) {
                        preferences::Action::None => Task::none(),
                        preferences::Action::UpdateUI() => self.update(Message::SettingsUpdated),
                    }
                } else {
                    Task::none()
                }
            }
            Message::SettingsUpdated => {
                let settings = get_settings();
                self.theme = theme_for(&settings.config.theme);
                self.viewer
                    .set_source(Arc::new(NasaApod::new(settings.config.api.clone())));
                self.navbar.update(navbar::Message::NoOps);
                Task::none()
            }
            Message::Navbar(navbar_msg) => match self.navbar.update(navbar_msg) {
                navbar::Action::Run(task) => task.map(Message::Navbar),
                navbar::Action::Navigate(NavButton::Viewer) => {
                    self.screen = Screen::Viewer;
                    Task::none()
                }
                navbar::Action::Navigate(NavButton::Preferences) => {
                    let (preferences, task) = Preferences::new();
                    self.screen = Screen::Preferences(preferences);
                    task.map(Message::Preferences)
                }
                navbar::Action::None => Task::none(),
            },
            Message::Tick(now) => {
                self.toasts.retain(|toast| !toast.is_expired(now));
                Task::none()
            }
            Message::Toast(toast::Message::Dismiss(id)) => {
                self.toasts.retain(|toast| toast.id != id);
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.toasts.is_empty() {
            Subscription::none()
        } else {
            time::every(Duration::from_millis(500)).map(Message::Tick)
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let navbar = self.navbar.view().map(Message::Navbar);

        let content = match &self.screen {
            Screen::Viewer => self.viewer.view().map(Message::Viewer),
            Screen::Preferences(preferences) => preferences.view().map(Message::Preferences),
        };

        let layout = Row::new().push(navbar).push(content);

        let toast_widgets: Vec<_> = self
            .toasts
            .iter()
            .map(|toast| toast.view().map(Message::Toast))
            .collect();

        let toast_overlay = container(Column::with_children(toast_widgets).spacing(10))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .align_x(Alignment::Start)
            .align_y(Alignment::End);

        stack![layout, toast_overlay].into()
    }
}

fn main() -> iced::Result {
    dotenv::dotenv().ok();
    logger_service::init().expect("Failed to initialize logger");

    info!("Starting application");
    info!("{:?}", _rust_i18n_available_locales());

    {
        let settings = get_settings();
        rust_i18n::set_locale(settings.config.language.as_str());
    }

    iced::application(SpaceViewer::title, SpaceViewer::update, SpaceViewer::view)
        .theme(SpaceViewer::theme)
        .subscription(SpaceViewer::subscription)
        .run_with(SpaceViewer::new)
}
