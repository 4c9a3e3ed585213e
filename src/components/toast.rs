use iced::alignment::Vertical;
use iced::widget::{Column, Container, Row, Space, Text, button};
use iced::{Alignment, Length, alignment};
use iced_font_awesome::{fa_icon, fa_icon_solid};
use iced_modern_theme::Modern;
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub enum Message {
    Dismiss(u32),
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= self.duration
    }

    pub fn view(&self) -> iced::Element<'_, Message> {
        let close_button = button(
            Container::new(fa_icon("circle-xmark").size(17.5))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Alignment::Center)
                .align_y(Alignment::Center),
        )
        .width(Length::Fixed(25.0))
        .height(Length::Fixed(25.0))
        .on_press(Message::Dismiss(self.id))
        .style(Modern::danger_button());

        let kind_icon = match self.kind {
            ToastKind::Success => fa_icon_solid("circle-check").size(17.5),
            ToastKind::Error => fa_icon_solid("triangle-exclamation").size(17.5),
        };

        let header = Row::new()
            .width(Length::Fill)
            .push(kind_icon)
            .push(Space::with_width(Length::Fill))
            .push(close_button);

        let message = Container::new(
            Text::new(&self.message)
                .size(14)
                .style(Modern::primary_text()),
        )
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(Vertical::Center);

        let content = Column::new()
            .push(
                Container::new(header)
                    .height(Length::FillPortion(1))
                    .align_y(Vertical::Center),
            )
            .push(
                Container::new(message)
                    .height(Length::FillPortion(1))
                    .align_y(Vertical::Center),
            )
            .push(Space::with_height(Length::FillPortion(1)))
            .width(Length::Fill)
            .height(Length::Fill);

        Container::new(content)
            .padding(5)
            .width(Length::Fixed(300.0))
            .height(Length::Fixed(85.0))
            .style(Modern::sheet_container())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_its_duration() {
        let created = Instant::now();
        let toast = Toast {
            id: 1,
            message: "Saved".to_string(),
            kind: ToastKind::Success,
            created,
            duration: Duration::from_secs(3),
        };

        assert!(!toast.is_expired(created + Duration::from_secs(2)));
        assert!(toast.is_expired(created + Duration::from_secs(3)));
    }
}
