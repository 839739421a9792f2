//! Media item schema: kinds, categories, and validation helpers.
//!
//! [`MediaItem`] is the unit of the feed. Items are created through
//! [`FeedStore::add_media_item`](crate::feed::FeedStore::add_media_item)
//! or loaded from a [`FeedSource`](crate::feed::FeedSource); nothing in
//! this crate ever deletes one outside the retention cleanup.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ItemId, Timestamp};

// ---------------------------------------------------------------------------
// Kinds and categories
// ---------------------------------------------------------------------------

/// The renderable kind of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Pdf,
}

/// The six fixed event categories.
///
/// Serialized in kebab-case (`guest-talks`, `inter-college`, ...), which
/// is also the form used by category filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Technical,
    Cultural,
    GuestTalks,
    InterCollege,
    InterDepartment,
    Sports,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Technical,
        Category::Cultural,
        Category::GuestTalks,
        Category::InterCollege,
        Category::InterDepartment,
        Category::Sports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Cultural => "cultural",
            Category::GuestTalks => "guest-talks",
            Category::InterCollege => "inter-college",
            Category::InterDepartment => "inter-department",
            Category::Sports => "sports",
        }
    }
}

// ---------------------------------------------------------------------------
// MediaItem
// ---------------------------------------------------------------------------

/// A single entry in the media feed.
///
/// The engagement counters (`view_count`, `engagement_secs`) are
/// monotonically non-decreasing; they are only ever bumped through
/// [`FeedStore::update_engagement`](crate::feed::FeedStore::update_engagement).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: ItemId,
    pub kind: MediaKind,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Category,
    /// Date of the event this media belongs to.
    pub event_date: chrono::NaiveDate,
    pub event_title: Option<String>,
    pub description: Option<String>,
    /// Playback length in seconds; videos only.
    pub duration_secs: Option<u32>,
    /// Number of pages; PDFs only.
    pub page_count: Option<u32>,
    /// Cover image URL; PDFs only.
    pub cover_image: Option<String>,
    /// Display aspect ratio in `W:H` form, e.g. `"16:9"`.
    pub aspect_ratio: String,
    pub is_bookmarked: bool,
    pub view_count: u64,
    /// Accumulated watch/read time in seconds.
    pub engagement_secs: u64,
    pub uploaded_at: Timestamp,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
}

/// Caller-supplied fields for a new media item.
///
/// Identity, upload timestamp, bookmark flag, and the engagement
/// counters are assigned by the store at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMediaItem {
    pub kind: MediaKind,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub category: Category,
    pub event_date: chrono::NaiveDate,
    pub event_title: Option<String>,
    pub description: Option<String>,
    pub duration_secs: Option<u32>,
    pub page_count: Option<u32>,
    pub cover_image: Option<String>,
    pub aspect_ratio: String,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub organizer: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the `W:H` aspect-ratio form (both sides positive integers).
pub fn validate_aspect_ratio(aspect_ratio: &str) -> Result<(), CoreError> {
    let valid = match aspect_ratio.split_once(':') {
        Some((w, h)) => {
            w.parse::<u32>().map(|n| n > 0).unwrap_or(false)
                && h.parse::<u32>().map(|n| n > 0).unwrap_or(false)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid aspect ratio '{aspect_ratio}'. Expected 'W:H' with positive integers"
        )))
    }
}

/// Validate a new item before it enters the store.
///
/// Rejects an empty media URL and a zero-length video; other optional
/// fields (page count, cover image) are schema-optional and unchecked.
pub fn validate_new_item(item: &NewMediaItem) -> Result<(), CoreError> {
    if item.media_url.trim().is_empty() {
        return Err(CoreError::Validation("Media URL must not be empty".into()));
    }
    if item.kind == MediaKind::Video && item.duration_secs == Some(0) {
        return Err(CoreError::Validation(
            "Video duration must be greater than zero".into(),
        ));
    }
    validate_aspect_ratio(&item.aspect_ratio)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item() -> NewMediaItem {
        NewMediaItem {
            kind: MediaKind::Image,
            media_url: "https://cdn.example.com/a.jpg".into(),
            thumbnail_url: None,
            category: Category::Technical,
            event_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            event_title: Some("Hackathon finals".into()),
            description: None,
            duration_secs: None,
            page_count: None,
            cover_image: None,
            aspect_ratio: "4:3".into(),
            tags: None,
            location: None,
            organizer: None,
        }
    }

    #[test]
    fn category_serializes_kebab_case() {
        let json = serde_json::to_string(&Category::GuestTalks).unwrap();
        assert_eq!(json, "\"guest-talks\"");
        let json = serde_json::to_string(&Category::InterDepartment).unwrap();
        assert_eq!(json, "\"inter-department\"");
    }

    #[test]
    fn category_as_str_round_trips_through_serde() {
        for cat in Category::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
        }
    }

    #[test]
    fn media_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Pdf).unwrap(), "\"pdf\"");
    }

    #[test]
    fn valid_aspect_ratios_pass() {
        assert!(validate_aspect_ratio("16:9").is_ok());
        assert!(validate_aspect_ratio("1:1").is_ok());
        assert!(validate_aspect_ratio("9:16").is_ok());
    }

    #[test]
    fn malformed_aspect_ratios_fail() {
        assert!(validate_aspect_ratio("16x9").is_err());
        assert!(validate_aspect_ratio("0:9").is_err());
        assert!(validate_aspect_ratio(":9").is_err());
        assert!(validate_aspect_ratio("").is_err());
    }

    #[test]
    fn new_item_with_empty_url_is_rejected() {
        let mut item = new_item();
        item.media_url = "   ".into();
        assert!(validate_new_item(&item).is_err());
    }

    #[test]
    fn zero_length_video_is_rejected() {
        let mut item = new_item();
        item.kind = MediaKind::Video;
        item.duration_secs = Some(0);
        assert!(validate_new_item(&item).is_err());
    }

    #[test]
    fn well_formed_item_passes() {
        assert!(validate_new_item(&new_item()).is_ok());
    }
}
