use crate::models::apod::ApodImage;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::{Button, Column, Container, Image, Row, Space, Text};
use iced::{Alignment, ContentFit, Length};
use iced_font_awesome::{fa_icon, fa_icon_solid};
use iced_modern_theme::Modern;

/// What to show in the picture area of a card.
#[derive(Debug, Clone, Copy)]
pub enum CardMedia<'a> {
    Picture(&'a Handle),
    Loading,
    Unavailable(&'a str),
    /// Videos and other web-only entries.
    External,
    NoPreview,
}

pub struct ImageCardConfig<'a, M> {
    pub image: &'a ApodImage,
    pub media: CardMedia<'a>,
    pub media_height: f32,
    pub is_favorite: bool,
    pub saved_at: Option<String>,
    pub on_favorite: M,
    pub on_copy: M,
    pub on_open: Option<M>,
}

pub fn image_card<'a, M: 'a + Clone>(config: ImageCardConfig<'a, M>) -> iced::Element<'a, M> {
    let image = config.image;

    let favorite_icon = if config.is_favorite {
        fa_icon_solid("heart").size(20.0)
    } else {
        fa_icon("heart").size(20.0)
    };

    let favorite_button = Button::new(
        Container::new(favorite_icon)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center),
    )
    .width(Length::Fixed(40.0))
    .height(Length::Fixed(40.0))
    .style(Modern::danger_button())
    .on_press(config.on_favorite);

    let media = Container::new(media_view(config.media))
        .width(Length::Fill)
        .height(Length::Fixed(config.media_height))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(Modern::sheet_container());

    let title_row = Row::new()
        .spacing(10)
        .align_y(Alignment::Center)
        .push(
            Text::new(&image.title)
                .size(24)
                .style(Modern::primary_text())
                .width(Length::Fill),
        )
        .push(favorite_button);

    let mut meta_row = Row::new()
        .spacing(10)
        .push(Text::new(&image.date).size(14).style(Modern::secondary_text()))
        .push(Space::with_width(Length::Fill));

    if let Some(copyright) = image.copyright_line() {
        meta_row = meta_row.push(
            Text::new(format!("© {}", copyright))
                .size(14)
                .style(Modern::secondary_text()),
        );
    }

    let mut buttons = Row::new().spacing(10).push(
        Button::new(
            Row::new()
                .spacing(6)
                .align_y(Alignment::Center)
                .push(fa_icon_solid("clipboard").size(16.0))
                .push(Text::new(t!("card.button.copy")).size(14)),
        )
        .style(Modern::secondary_button())
        .padding([8, 16])
        .on_press(config.on_copy),
    );

    if let Some(on_open) = config.on_open {
        let label = if image.is_image() {
            t!("card.button.hd")
        } else {
            t!("card.button.video")
        };
        buttons = buttons.push(
            Button::new(
                Row::new()
                    .spacing(6)
                    .align_y(Alignment::Center)
                    .push(fa_icon_solid("up-right-from-square").size(16.0))
                    .push(Text::new(label).size(14)),
            )
            .style(Modern::primary_button())
            .padding([8, 16])
            .on_press(on_open),
        );
    }

    let mut content = Column::new()
        .spacing(12)
        .push(media)
        .push(title_row)
        .push(meta_row)
        .push(Text::new(&image.explanation).size(15));

    if let Some(saved_at) = config.saved_at {
        content = content.push(
            Text::new(t!("viewer.favorites.saved_at", time = saved_at))
                .size(12)
                .style(Modern::secondary_text()),
        );
    }

    Container::new(content.push(buttons))
        .padding(20)
        .max_width(760.0)
        .style(Modern::card_container())
        .into()
}

fn media_view<'a, M: 'a>(media: CardMedia<'a>) -> iced::Element<'a, M> {
    match media {
        CardMedia::Picture(handle) => Image::new(handle)
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        CardMedia::Loading => placeholder("hourglass-half", t!("card.media.loading").to_string()),
        CardMedia::Unavailable(error) => placeholder(
            "image",
            t!("card.media.unavailable", error = error).to_string(),
        ),
        CardMedia::External => placeholder("film", t!("card.media.external").to_string()),
        CardMedia::NoPreview => placeholder("image", t!("card.media.no_preview").to_string()),
    }
}

fn placeholder<'a, M: 'a>(icon: &'a str, label: String) -> iced::Element<'a, M> {
    Column::new()
        .spacing(10)
        .align_x(Alignment::Center)
        .push(fa_icon_solid(icon).size(40.0))
        .push(Text::new(label).size(14).style(Modern::secondary_text()))
        .into()
}
