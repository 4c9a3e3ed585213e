pub mod apod_service;
pub mod apod_source;
pub mod clipboard_service;
pub mod link_service;
pub mod logger_service;
pub mod media_service;
pub mod thumbnail_service;
