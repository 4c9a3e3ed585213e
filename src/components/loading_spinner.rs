use iced::widget::{Column, Container, Text};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;

/// Full-screen busy indicator.
pub fn loading_spinner<'a, M: 'a>(message: String) -> iced::Element<'a, M> {
    let column = Column::new()
        .spacing(16)
        .align_x(Alignment::Center)
        .push(fa_icon_solid("spinner").size(64.0))
        .push(Text::new(message).size(18).style(Modern::primary_text()));

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .into()
}
