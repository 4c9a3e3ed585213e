use serde::{Deserialize, Serialize};
use std::fmt;

/// One Astronomy Picture of the Day entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub date: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub service_version: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl ApodImage {
    pub fn is_image(&self) -> bool {
        self.media_type == MediaType::Image
    }

    /// HD link when the entry is an image that has one.
    pub fn hd_url(&self) -> Option<&str> {
        if self.is_image() {
            self.hdurl.as_deref().filter(|url| !url.is_empty())
        } else {
            None
        }
    }

    /// Link worth sharing: the HD picture if any, otherwise the regular URL.
    pub fn best_url(&self) -> &str {
        self.hd_url().unwrap_or(&self.url)
    }

    /// The API pads copyright lines with newlines.
    pub fn copyright_line(&self) -> Option<String> {
        self.copyright
            .as_deref()
            .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Other => "other",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "copyright": "\nJohn Doe\n",
        "date": "2024-01-01",
        "explanation": "A galaxy far away.",
        "hdurl": "https://apod.nasa.gov/apod/image/2401/galaxy_hd.jpg",
        "media_type": "image",
        "service_version": "v1",
        "title": "Galaxy",
        "url": "https://apod.nasa.gov/apod/image/2401/galaxy.jpg"
    }"#;

    #[test]
    fn deserializes_api_payload() {
        let image: ApodImage = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(image.date, "2024-01-01");
        assert_eq!(image.media_type, MediaType::Image);
        assert_eq!(image.copyright_line().as_deref(), Some("John Doe"));
        assert_eq!(image.best_url(), "https://apod.nasa.gov/apod/image/2401/galaxy_hd.jpg");
    }

    #[test]
    fn videos_have_no_hd_link() {
        let image: ApodImage = serde_json::from_str(
            r#"{
                "date": "2024-01-02",
                "explanation": "Clip.",
                "hdurl": "https://example.com/ignored.jpg",
                "media_type": "video",
                "service_version": "v1",
                "title": "Launch",
                "url": "https://www.youtube.com/embed/xyz"
            }"#,
        )
        .unwrap();

        assert!(!image.is_image());
        assert_eq!(image.hd_url(), None);
        assert_eq!(image.best_url(), "https://www.youtube.com/embed/xyz");
        assert_eq!(image.copyright_line(), None);
    }

    #[test]
    fn unknown_media_kinds_are_kept() {
        let image: ApodImage = serde_json::from_str(
            r#"{ "date": "2024-01-03", "explanation": "", "media_type": "other", "title": "?" }"#,
        )
        .unwrap();

        assert_eq!(image.media_type, MediaType::Other);
        assert_eq!(image.url, "");
    }
}
