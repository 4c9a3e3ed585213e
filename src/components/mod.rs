pub mod empty_state;
pub mod error_message;
pub mod header;
pub mod image_card;
pub mod loading_spinner;
pub mod navbar;
pub mod toast;

pub use empty_state::empty_state;
pub use error_message::error_message;
pub use header::header;
pub use image_card::{CardMedia, ImageCardConfig, image_card};
pub use loading_spinner::loading_spinner;
