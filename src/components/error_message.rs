use iced::widget::{Button, Column, Container, Text};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;

/// Full-screen error panel. The retry button only shows up when `on_retry` is set.
pub fn error_message<'a, M: 'a + Clone>(message: String, on_retry: Option<M>) -> iced::Element<'a, M> {
    let mut panel = Column::new()
        .spacing(16)
        .align_x(Alignment::Center)
        .push(fa_icon_solid("circle-exclamation").size(64.0))
        .push(Text::new(t!("error.title")).size(24).style(Modern::primary_text()))
        .push(Text::new(message).size(16).style(Modern::secondary_text()));

    if let Some(on_retry) = on_retry {
        panel = panel.push(
            Button::new(Text::new(t!("error.button.retry")).size(16))
                .style(Modern::danger_button())
                .padding([8, 24])
                .on_press(on_retry),
        );
    }

    Container::new(
        Container::new(panel)
            .padding(32)
            .max_width(480.0)
            .style(Modern::card_container()),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(Alignment::Center)
    .align_y(Alignment::Center)
    .into()
}
