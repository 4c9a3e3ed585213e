use crate::components::toast::ToastKind;
use crate::components::{
    CardMedia, ImageCardConfig, empty_state, error_message, header, image_card, loading_spinner,
};
use crate::models::api_response::ApiResponse;
use crate::models::apod::ApodImage;
use crate::models::favorite::{Favorites, Toggle};
use crate::models::fetch_state::{CancelToken, FetchState, Fetcher, Pending, Settled};
use crate::services::apod_source::ApodSource;
use crate::services::thumbnail_service::{self, Thumbnail};
use crate::services::{clipboard_service, link_service};
use crate::utils::{format_date, is_future_date, parse_date, today};
use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use iced::alignment::Horizontal;
use iced::futures::future::BoxFuture;
use iced::widget::image::Handle;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Color, Element, Length, Task};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const THUMBNAIL_SIZE: u32 = 480;
const ERROR_RED: Color = Color::from_rgb(0.97, 0.44, 0.44);

pub enum Action {
    None,
    Run(Task<Message>),
    ShowToast {
        kind: ToastKind,
        message: String,
        duration: Option<Duration>,
    },
    Batch(Vec<Action>),
}

#[derive(Debug, Clone)]
pub enum Message {
    DateInputChanged(String),
    DateSubmitted,
    PreviousDay,
    NextDay,
    ApodSettled(Settled<ApodImage>),
    MediaSettled(Settled<Vec<u8>>),
    ToggleFavorite(ApodImage),
    ToggleFavoritesOnly,
    Retry,
    CopyUrl(String),
    Copied(Result<(), String>),
    OpenLink(String),
    ThumbnailReady(String, Result<Thumbnail, String>),
}

/// Outcome of a date selection.
#[derive(Debug)]
pub enum DateChange {
    Rejected,
    Unchanged,
    Fetch(Pending<ApodImage>),
}

pub struct Viewer {
    source: Arc<dyn ApodSource>,
    selected_date: NaiveDate,
    date_input: String,
    date_error: Option<String>,
    favorites: Favorites,
    show_favorites_only: bool,
    apod: Fetcher<ApodImage, NaiveDate>,
    media: Fetcher<Vec<u8>, String>,
    media_handle: Option<Handle>,
    thumbnails: HashMap<String, Handle>,
}

impl Viewer {
    pub fn new(source: Arc<dyn ApodSource>) -> (Self, Task<Message>) {
        let (viewer, pending) = Self::with_date(source, today());
        let task = pending.map(apod_task).unwrap_or_else(Task::none);
        (viewer, task)
    }

    /// Builds the viewer on `date` and starts the first fetch.
    pub fn with_date(source: Arc<dyn ApodSource>, date: NaiveDate) -> (Self, Option<Pending<ApodImage>>) {
        let mut viewer = Self {
            source,
            selected_date: date,
            date_input: format_date(date),
            date_error: None,
            favorites: Favorites::new(),
            show_favorites_only: false,
            apod: Fetcher::new(),
            media: Fetcher::new(),
            media_handle: None,
            thumbnails: HashMap::new(),
        };
        let pending = viewer.fetch_selected();
        (viewer, pending)
    }

    /// Swaps the backend, e.g. after the API settings changed. Takes effect on the next fetch.
    pub fn set_source(&mut self, source: Arc<dyn ApodSource>) {
        self.source = source;
    }

    pub fn state(&self) -> &FetchState<ApodImage> {
        self.apod.state()
    }

    pub fn current_record(&self) -> Option<&ApodImage> {
        self.apod.state().data.as_ref()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn date_error(&self) -> Option<&str> {
        self.date_error.as_deref()
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn show_favorites_only(&self) -> bool {
        self.show_favorites_only
    }

    fn apod_producer(
        source: Arc<dyn ApodSource>,
        date: NaiveDate,
    ) -> impl FnOnce(CancelToken) -> BoxFuture<'static, ApiResponse<ApodImage>> {
        move |token| {
            debug!("Fetching APOD for {} (run #{})", date, token.generation());
            source.fetch_apod(format_date(date))
        }
    }

    fn fetch_selected(&mut self) -> Option<Pending<ApodImage>> {
        let producer = Self::apod_producer(Arc::clone(&self.source), self.selected_date);
        self.apod.watch(self.selected_date, producer)
    }

    /// Validates `input` and moves the selection there. Future and malformed dates are refused.
    pub fn select_date(&mut self, input: &str, today: NaiveDate) -> DateChange {
        let Some(date) = parse_date(input) else {
            self.date_error = Some(t!("viewer.date.invalid").to_string());
            return DateChange::Rejected;
        };

        if is_future_date(date, today) {
            self.date_error = Some(t!("viewer.date.future").to_string());
            return DateChange::Rejected;
        }

        self.date_error = None;
        self.selected_date = date;
        self.date_input = format_date(date);

        match self.fetch_selected() {
            Some(pending) => DateChange::Fetch(pending),
            None => DateChange::Unchanged,
        }
    }

    pub fn step_day(&mut self, forward: bool, today: NaiveDate) -> DateChange {
        let next = if forward {
            self.selected_date.checked_add_days(Days::new(1))
        } else {
            self.selected_date.checked_sub_days(Days::new(1))
        };

        match next {
            Some(date) => self.select_date(&format_date(date), today),
            None => DateChange::Rejected,
        }
    }

    pub fn toggle_favorite(&mut self, image: &ApodImage, now: DateTime<Utc>) -> Toggle {
        let toggle = self.favorites.toggle(image, now);
        if toggle == Toggle::Removed {
            self.thumbnails.remove(&image.date);
        }
        toggle
    }

    /// Back to today, re-fetching even when today is already selected.
    pub fn retry(&mut self, today: NaiveDate) -> Option<Pending<ApodImage>> {
        self.date_error = None;
        self.selected_date = today;
        self.date_input = format_date(today);

        let producer = Self::apod_producer(Arc::clone(&self.source), today);
        if self.apod.deps() == Some(&today) {
            self.apod.restart(producer)
        } else {
            self.apod.watch(today, producer)
        }
    }

    /// Applies a record fetch and, for pictures, starts downloading the image.
    pub fn on_apod_settled(&mut self, settled: Settled<ApodImage>) -> Option<Pending<Vec<u8>>> {
        if !self.apod.apply(settled) {
            return None;
        }

        let url = match self.current_record() {
            Some(image) if image.is_image() && !image.url.is_empty() => image.url.clone(),
            _ => return None,
        };

        let source = Arc::clone(&self.source);
        let target = url.clone();
        let producer = move |_: CancelToken| source.fetch_media(target);

        // A failed download of the same picture is tried again.
        let failed = self.media.state().error.is_some() && !self.media.is_in_flight();
        let pending = if failed && self.media.deps() == Some(&url) {
            self.media.restart(producer)
        } else {
            self.media.watch(url, producer)
        };
        if pending.is_some() {
            self.media_handle = None;
        }
        pending
    }

    /// Applies a picture download. Returns a thumbnail job when the record is already a favorite.
    pub fn on_media_settled(&mut self, settled: Settled<Vec<u8>>) -> Option<(String, Vec<u8>)> {
        if !self.media.apply(settled) {
            return None;
        }

        match &self.media.state().data {
            Some(bytes) => {
                self.media_handle = Some(Handle::from_bytes(bytes.clone()));
                let date = self.current_record()?.date.clone();
                self.thumbnail_job(&date)
            }
            None => {
                if let Some(error) = &self.media.state().error {
                    warn!("Picture unavailable: {}", error);
                }
                None
            }
        }
    }

    fn thumbnail_job(&self, date: &str) -> Option<(String, Vec<u8>)> {
        if !self.favorites.contains(date) || self.thumbnails.contains_key(date) {
            return None;
        }

        let image = self.current_record().filter(|image| image.date == date)?;
        if self.media.deps() != Some(&image.url) {
            return None;
        }

        let bytes = self.media.state().data.clone()?;
        Some((date.to_string(), bytes))
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::DateInputChanged(input) => {
                self.date_input = input.clone();
                // Complete dates apply right away, partial ones wait for Enter.
                if input.trim().len() == 10 {
                    date_action(self.select_date(&input, today()))
                } else {
                    Action::None
                }
            }

            Message::DateSubmitted => {
                let input = self.date_input.clone();
                date_action(self.select_date(&input, today()))
            }

            Message::PreviousDay => date_action(self.step_day(false, today())),

            Message::NextDay => date_action(self.step_day(true, today())),

            Message::ApodSettled(settled) => match self.on_apod_settled(settled) {
                Some(pending) => Action::Run(media_task(pending)),
                None => Action::None,
            },

            Message::MediaSettled(settled) => match self.on_media_settled(settled) {
                Some((date, bytes)) => Action::Run(thumbnail_task(date, bytes)),
                None => Action::None,
            },

            Message::ToggleFavorite(image) => {
                let toggle = self.toggle_favorite(&image, Utc::now());
                info!("Favorite {:?}: {}", toggle, image.date);

                let message = match toggle {
                    Toggle::Added => t!("message.favorite.added"),
                    Toggle::Removed => t!("message.favorite.removed"),
                };
                let toast = Action::ShowToast {
                    kind: ToastKind::Success,
                    message: message.to_string(),
                    duration: None,
                };

                match self.thumbnail_job(&image.date) {
                    Some((date, bytes)) => {
                        Action::Batch(vec![toast, Action::Run(thumbnail_task(date, bytes))])
                    }
                    None => toast,
                }
            }

            Message::ToggleFavoritesOnly => {
                self.show_favorites_only = !self.show_favorites_only;
                Action::None
            }

            Message::Retry => match self.retry(today()) {
                Some(pending) => Action::Run(apod_task(pending)),
                None => Action::None,
            },

            Message::CopyUrl(url) => {
                let task = Task::perform(
                    async move {
                        clipboard_service::copy_text_to_clipboard(&url).map_err(|e| e.to_string())
                    },
                    Message::Copied,
                );
                Action::Run(task)
            }

            Message::Copied(Ok(())) => Action::ShowToast {
                kind: ToastKind::Success,
                message: t!("message.copy.success").to_string(),
                duration: None,
            },

            Message::Copied(Err(err)) => {
                error!("Error copying URL to clipboard: {}", err);
                Action::ShowToast {
                    kind: ToastKind::Error,
                    message: t!("message.copy.error").to_string(),
                    duration: None,
                }
            }

            Message::OpenLink(url) => match link_service::open_in_browser(&url) {
                Ok(()) => Action::None,
                Err(err) => {
                    error!("Error opening {}: {}", url, err);
                    Action::ShowToast {
                        kind: ToastKind::Error,
                        message: t!("message.open.error").to_string(),
                        duration: None,
                    }
                }
            },

            Message::ThumbnailReady(date, Ok(thumb)) => {
                if self.favorites.contains(&date) {
                    let handle = Handle::from_rgba(thumb.width, thumb.height, thumb.pixels);
                    self.thumbnails.insert(date, handle);
                }
                Action::None
            }

            Message::ThumbnailReady(date, Err(err)) => {
                warn!("Could not build thumbnail for {}: {}", date, err);
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let state = self.apod.state();

        if state.loading && state.data.is_none() {
            return loading_spinner(t!("viewer.loading").to_string());
        }

        if let (Some(error), None) = (&state.error, &state.data) {
            return error_message(error.clone(), Some(Message::Retry));
        }

        let body = if self.show_favorites_only {
            self.favorites_view()
        } else {
            match &state.data {
                Some(image) => self.record_view(image),
                None => Space::with_height(Length::Fixed(0.0)).into(),
            }
        };

        let mut content = Column::new()
            .spacing(30)
            .padding(20)
            .align_x(Alignment::Center)
            .push(header(
                t!("app.title").to_string(),
                t!("app.subtitle").to_string(),
            ))
            .push(self.controls_view())
            .push(body);

        if state.loading && state.data.is_some() {
            content = content.push(
                Text::new(t!("viewer.loading_new"))
                    .size(14)
                    .style(Modern::secondary_text()),
            );
        }

        content = content.push(
            Text::new(t!("app.footer"))
                .size(12)
                .style(Modern::secondary_text()),
        );

        Scrollable::new(
            Container::new(content)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .height(Length::Fill)
        .into()
    }

    fn controls_view(&self) -> Element<'_, Message> {
        let day_button = |icon: &'static str, message: Message| {
            Button::new(fa_icon_solid(icon).size(16.0))
                .style(Modern::blue_tinted_button())
                .padding([10, 14])
                .on_press(message)
        };

        let favorites_only = self.show_favorites_only;
        let favorites_label = t!("viewer.button.favorites", count = self.favorites.len());
        let favorites_button = Button::new(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(fa_icon_solid("heart").size(16.0))
                .push(Text::new(favorites_label).size(16)),
        )
        .style(move |theme, status| {
            if favorites_only {
                Modern::danger_button()(theme, status)
            } else {
                Modern::secondary_button()(theme, status)
            }
        })
        .padding([10, 20])
        .on_press(Message::ToggleFavoritesOnly);

        let picker = Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(day_button("chevron-left", Message::PreviousDay))
            .push(
                TextInput::new(&t!("viewer.date.placeholder"), &self.date_input)
                    .on_input(Message::DateInputChanged)
                    .on_submit(Message::DateSubmitted)
                    .style(Modern::text_input())
                    .padding([10, 14])
                    .width(Length::Fixed(180.0)),
            )
            .push(day_button("chevron-right", Message::NextDay))
            .push(Space::with_width(Length::Fill))
            .push(favorites_button);

        let mut controls = Column::new()
            .spacing(8)
            .push(
                Text::new(t!("viewer.date.label"))
                    .size(16)
                    .style(Modern::primary_text()),
            )
            .push(picker)
            .push(
                Text::new(t!("viewer.date.hint"))
                    .size(13)
                    .style(Modern::secondary_text()),
            );

        if let Some(error) = &self.date_error {
            controls = controls.push(
                Row::new()
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .push(fa_icon_solid("circle-xmark").size(16.0))
                    .push(Text::new(error).size(14).color(ERROR_RED)),
            );
        }

        Container::new(controls)
            .padding(20)
            .max_width(760.0)
            .style(Modern::card_container())
            .into()
    }

    fn record_view<'a>(&'a self, image: &'a ApodImage) -> Element<'a, Message> {
        let media = if !image.is_image() {
            CardMedia::External
        } else if self.media.deps() == Some(&image.url) {
            match (&self.media_handle, &self.media.state().error) {
                (Some(handle), _) => CardMedia::Picture(handle),
                (None, Some(error)) => CardMedia::Unavailable(error),
                (None, None) => CardMedia::Loading,
            }
        } else {
            CardMedia::Loading
        };

        image_card(ImageCardConfig {
            image,
            media,
            media_height: 420.0,
            is_favorite: self.favorites.contains(&image.date),
            saved_at: None,
            on_favorite: Message::ToggleFavorite(image.clone()),
            on_copy: Message::CopyUrl(image.best_url().to_string()),
            on_open: open_link(image),
        })
    }

    fn favorites_view(&self) -> Element<'_, Message> {
        if self.favorites.is_empty() {
            return empty_state(
                "star",
                t!("viewer.favorites.empty_title").to_string(),
                t!("viewer.favorites.empty_subtitle").to_string(),
            );
        }

        let cards = self.favorites.iter().map(|fav| {
            let image = &fav.image;
            let media = match self.thumbnails.get(&image.date) {
                Some(handle) => CardMedia::Picture(handle),
                None if image.is_image() => CardMedia::NoPreview,
                None => CardMedia::External,
            };
            let saved_at = fav
                .saved_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();

            image_card(ImageCardConfig {
                image,
                media,
                media_height: 240.0,
                is_favorite: fav.is_favorite,
                saved_at: Some(saved_at),
                on_favorite: Message::ToggleFavorite(image.clone()),
                on_copy: Message::CopyUrl(image.best_url().to_string()),
                on_open: open_link(image),
            })
        });

        Column::with_children(cards)
            .spacing(30)
            .align_x(Alignment::Center)
            .into()
    }
}

fn open_link(image: &ApodImage) -> Option<Message> {
    match image.hd_url() {
        Some(hd) => Some(Message::OpenLink(hd.to_string())),
        None if !image.is_image() && !image.url.is_empty() => {
            Some(Message::OpenLink(image.url.clone()))
        }
        None => None,
    }
}

fn date_action(change: DateChange) -> Action {
    match change {
        DateChange::Fetch(pending) => Action::Run(apod_task(pending)),
        DateChange::Rejected | DateChange::Unchanged => Action::None,
    }
}

fn apod_task(pending: Pending<ApodImage>) -> Task<Message> {
    debug!("Waiting on APOD run #{}", pending.token().generation());
    Task::perform(pending.settle(), Message::ApodSettled)
}

fn media_task(pending: Pending<Vec<u8>>) -> Task<Message> {
    Task::perform(pending.settle(), Message::MediaSettled)
}

fn thumbnail_task(date: String, bytes: Vec<u8>) -> Task<Message> {
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || {
                thumbnail_service::generate_thumbnail(&bytes, THUMBNAIL_SIZE, THUMBNAIL_SIZE)
                    .map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| e.to_string())
            .and_then(|result| result)
        },
        move |result| Message::ThumbnailReady(date.clone(), result),
    )
}
