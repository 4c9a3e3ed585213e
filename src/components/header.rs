use iced::widget::{Column, Container, Row, Text};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;

pub fn header<'a, M: 'a>(title: String, subtitle: String) -> iced::Element<'a, M> {
    let titles = Column::new()
        .spacing(4)
        .push(Text::new(title).size(28).style(Modern::primary_text()))
        .push(Text::new(subtitle).size(14).style(Modern::secondary_text()));

    Container::new(
        Row::new()
            .spacing(16)
            .align_y(Alignment::Center)
            .push(fa_icon_solid("user-astronaut").size(36.0))
            .push(titles),
    )
    .padding(iced::Padding {
        top: 20.0,
        right: 22.5,
        bottom: 10.0,
        left: 22.5,
    })
    .width(Length::Fill)
    .into()
}
