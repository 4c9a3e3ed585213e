use iced::alignment::Horizontal;
use iced::widget::{Column, button, container, text};
use iced::{Element, Length, Task};
use iced_modern_theme::Modern;
use log::debug;
use rust_i18n::t;

pub enum Action {
    Run(Task<Message>),
    Navigate(NavButton),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Viewer,
    Preferences,
}

#[derive(Debug, Clone)]
pub enum Message {
    ButtonSignal(NavButton),
    ButtonPressed(NavButton),
    NoOps,
}

pub struct Navbar {
    pub selected: NavButton,
}

impl Navbar {
    pub fn new() -> Self {
        Navbar {
            selected: NavButton::Viewer,
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::ButtonSignal(id) => {
                self.selected = id;
                Action::Run(Task::perform(async {}, move |_| Message::ButtonPressed(id)))
            }
            Message::ButtonPressed(id) => {
                self.selected = id;
                Action::Navigate(id)
            }
            Message::NoOps => {
                debug!("navbar refreshed");
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        fn styled_button(
            label: String,
            id: NavButton,
            selected: NavButton,
        ) -> iced::widget::Button<'static, Message> {
            let base = button(text(label).width(Length::Fill).align_x(Horizontal::Center))
                .width(Length::Fill)
                .height(Length::Fixed(45.0))
                .padding(10)
                .on_press(Message::ButtonSignal(id));

            if id == selected {
                base.style(Modern::green_tinted_button())
            } else {
                base.style(Modern::blue_tinted_button())
            }
        }

        let navbar = Column::new()
            .push(styled_button(
                t!("navbar.button.viewer").to_string(),
                NavButton::Viewer,
                self.selected,
            ))
            .spacing(5);

        let settings_button = Column::new().push(styled_button(
            t!("navbar.button.settings").to_string(),
            NavButton::Preferences,
            self.selected,
        ));

        let layout = Column::new()
            .push(navbar.height(Length::Fill))
            .push(settings_button.height(Length::Fixed(45.0)))
            .spacing(10);

        container(layout)
            .width(Length::Fixed(200.0))
            .height(Length::Fill)
            .padding(5)
            .style(Modern::sidebar_container())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressing_a_button_navigates() {
        let mut navbar = Navbar::new();
        assert_eq!(navbar.selected, NavButton::Viewer);

        assert!(matches!(
            navbar.update(Message::ButtonSignal(NavButton::Preferences)),
            Action::Run(_)
        ));
        assert_eq!(navbar.selected, NavButton::Preferences);

        assert!(matches!(
            navbar.update(Message::ButtonPressed(NavButton::Viewer)),
            Action::Navigate(NavButton::Viewer)
        ));
        assert_eq!(navbar.selected, NavButton::Viewer);
    }
}
