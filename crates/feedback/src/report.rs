//! The finalized feedback record.
//!
//! [`FeedbackReport`] is the one bit-exact wire contract this crate
//! owns: the serde field names below are what the remote collection
//! stores. The creation timestamp is assigned server-side and is
//! deliberately absent from the struct.

use serde::Serialize;

use campusreel_core::types::Timestamp;

use crate::draft::{Draft, FeedbackKind};
use crate::env::EnvironmentSample;

/// Device context captured at submit time.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub platform: String,
    pub language: String,
    pub online: bool,
}

/// Application-state snapshot embedded in the report.
#[derive(Debug, Clone, Serialize)]
pub struct AppStateSnapshot {
    #[serde(rename = "currentPage")]
    pub current_page: String,
    /// ISO-8601 submit-time timestamp (client clock; informational only).
    pub timestamp: String,
    /// Viewport in `WxH` form.
    pub viewport: String,
    pub theme: Option<String>,
}

/// A submitted feedback record.
///
/// Either fully assembled and written, or never created at all; there
/// is no partial or draft persistence.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub title: String,
    pub description: String,
    pub screenshot_url: Option<String>,
    pub page_url: String,
    pub user_agent: String,
    pub device_info: DeviceInfo,
    pub app_state: AppStateSnapshot,
    /// Anonymous analytics identity, when one exists locally.
    pub user_id: Option<String>,
}

impl FeedbackReport {
    /// Assemble a report from the draft and a single environment
    /// sample. Pure; all inputs are passed in, including the clock.
    pub fn assemble(
        draft: &Draft,
        env: &EnvironmentSample,
        user_id: Option<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            kind: draft.kind,
            title: draft.title.clone(),
            description: draft.description.clone(),
            screenshot_url: draft.screenshot.clone(),
            page_url: env.page_url.clone(),
            user_agent: env.user_agent.clone(),
            device_info: DeviceInfo {
                platform: env.platform.clone(),
                language: env.language.clone(),
                online: env.online,
            },
            app_state: AppStateSnapshot {
                current_page: env.page_path.clone(),
                timestamp: now.to_rfc3339(),
                viewport: env.viewport_string(),
                theme: env.theme.clone(),
            },
            user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_env() -> EnvironmentSample {
        EnvironmentSample {
            page_path: "/feed".into(),
            page_url: "https://campusreel.example.edu/feed".into(),
            viewport_width: 1280,
            viewport_height: 800,
            theme: Some("dark".into()),
            user_agent: "Mozilla/5.0 (test)".into(),
            platform: "MacIntel".into(),
            language: "en-GB".into(),
            online: true,
        }
    }

    #[test]
    fn wire_field_names_are_exact() {
        let draft = Draft {
            kind: FeedbackKind::Bug,
            title: "Crash on save".into(),
            description: String::new(),
            screenshot: None,
        };
        let report = FeedbackReport::assemble(
            &draft,
            &sample_env(),
            Some("anon-123".into()),
            chrono::Utc::now(),
        );

        let json = serde_json::to_value(&report).unwrap();
        let obj = json.as_object().unwrap();

        let expected_keys = [
            "type",
            "title",
            "description",
            "screenshot_url",
            "page_url",
            "user_agent",
            "device_info",
            "app_state",
            "user_id",
        ];
        assert_eq!(obj.len(), expected_keys.len());
        for key in expected_keys {
            assert!(obj.contains_key(key), "missing wire key '{key}'");
        }

        assert_eq!(json["type"], "bug");
        assert_eq!(json["title"], "Crash on save");
        assert_eq!(json["screenshot_url"], serde_json::Value::Null);
        assert_eq!(json["device_info"]["platform"], "MacIntel");
        assert_eq!(json["device_info"]["online"], true);
        assert_eq!(json["app_state"]["currentPage"], "/feed");
        assert_eq!(json["app_state"]["viewport"], "1280x800");
        assert_eq!(json["app_state"]["theme"], "dark");
        assert_eq!(json["user_id"], "anon-123");
        // created_at is server-assigned, never client-set.
        assert!(!obj.contains_key("created_at"));
    }

    #[test]
    fn screenshot_flows_into_screenshot_url() {
        let draft = Draft {
            kind: FeedbackKind::Feedback,
            title: "Love the PDF viewer".into(),
            description: "Page flips feel great".into(),
            screenshot: Some("data:image/png;base64,AAAA".into()),
        };
        let report = FeedbackReport::assemble(&draft, &sample_env(), None, chrono::Utc::now());

        assert_eq!(
            report.screenshot_url.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["user_id"], serde_json::Value::Null);
    }
}
