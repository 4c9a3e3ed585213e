pub mod api_response;
pub mod apod;
pub mod favorite;
pub mod fetch_state;
