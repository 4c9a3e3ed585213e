use crate::models::apod::ApodImage;
use chrono::{DateTime, Utc};

/// A record the user chose to keep for this session.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub image: ApodImage,
    pub saved_at: DateTime<Utc>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Favorites in insertion order, unique by date.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    items: Vec<FavoriteRecord>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, image: &ApodImage, now: DateTime<Utc>) -> Toggle {
        if self.contains(&image.date) {
            self.items.retain(|fav| fav.image.date != image.date);
            Toggle::Removed
        } else {
            self.items.push(FavoriteRecord {
                image: image.clone(),
                saved_at: now,
                is_favorite: true,
            });
            Toggle::Added
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.items.iter().any(|fav| fav.image.date == date)
    }

    pub fn get(&self, date: &str) -> Option<&FavoriteRecord> {
        self.items.iter().find(|fav| fav.image.date == date)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteRecord> {
        self.items.iter()
    }
}
