use chrono::{Local, NaiveDate};
use std::env;
use std::path::PathBuf;

/// Calendar format used by the APOD API for every date parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn get_exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the base path for config assets depending on the build mode
pub fn get_assets_path() -> PathBuf {
    if cfg!(debug_assertions) {
        // Development mode
        PathBuf::from("./src/config/")
    } else {
        // Release mode: use path relative to the executable
        let exe_dir = get_exe_dir();
        exe_dir.join("config")
    }
}

/// Today in the user's local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a strict, zero-padded `YYYY-MM-DD` string.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn is_future_date(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}
