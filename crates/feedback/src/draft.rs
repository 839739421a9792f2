//! In-progress feedback form state.

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// Maximum length for the title field (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for the description field (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// FeedbackKind
// ---------------------------------------------------------------------------

/// The kind of report the user is filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Bug,
    Feedback,
    FeatureRequest,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Bug => "bug",
            FeedbackKind::Feedback => "feedback",
            FeedbackKind::FeatureRequest => "feature_request",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Unsaved form state, held only while the widget is open.
///
/// A draft is never persisted; it either becomes a submitted report or
/// is discarded when the widget closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub kind: FeedbackKind,
    pub title: String,
    pub description: String,
    /// PNG data URL, present only if a capture succeeded.
    pub screenshot: Option<String>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            kind: FeedbackKind::Feedback,
            title: String::new(),
            description: String::new(),
            screenshot: None,
        }
    }
}

impl Draft {
    /// Whether the draft passes client-side validation for submission.
    pub fn is_submittable(&self) -> bool {
        validate_title(&self.title).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the title: trimmed non-empty, within the length bound.
pub fn validate_title(title: &str) -> Result<(), FeedbackError> {
    if title.trim().is_empty() {
        return Err(FeedbackError::Validation("Please add a title".into()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(FeedbackError::Validation(format!(
            "Title exceeds maximum length of {} characters (got {})",
            MAX_TITLE_LENGTH,
            title.len()
        )));
    }
    Ok(())
}

/// Validate the description length.
pub fn validate_description(description: &str) -> Result<(), FeedbackError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(FeedbackError::Validation(format!(
            "Description exceeds maximum length of {} characters (got {})",
            MAX_DESCRIPTION_LENGTH,
            description.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FeedbackKind::FeatureRequest).unwrap(),
            "\"feature_request\""
        );
        assert_eq!(serde_json::to_string(&FeedbackKind::Bug).unwrap(), "\"bug\"");
    }

    #[test]
    fn kind_as_str_matches_serde_form() {
        for kind in [
            FeedbackKind::Bug,
            FeedbackKind::Feedback,
            FeedbackKind::FeatureRequest,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn default_draft_is_empty_feedback() {
        let draft = Draft::default();
        assert_eq!(draft.kind, FeedbackKind::Feedback);
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());
        assert!(draft.screenshot.is_none());
    }

    #[test]
    fn whitespace_only_title_is_invalid() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("\t\n").is_err());
        assert!(validate_title("Crash on save").is_ok());
    }

    #[test]
    fn overlong_title_is_invalid() {
        let title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&title).is_err());
        let title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn overlong_description_is_invalid() {
        assert!(validate_description(&"a".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
        assert!(validate_description(&"a".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn submittable_tracks_title_validity() {
        let mut draft = Draft::default();
        assert!(!draft.is_submittable());
        draft.title = "Playback stutters".into();
        assert!(draft.is_submittable());
    }
}
