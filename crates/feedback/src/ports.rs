//! Collaborator interfaces consumed by the widget workflow.
//!
//! The workflow drives every side effect through the narrow traits
//! below. The fire-and-forget sinks (notification, haptic, analytics)
//! return nothing; their failures are the implementation's problem and
//! never influence workflow state.

use async_trait::async_trait;

use crate::error::FeedbackError;
use crate::screenshot::{CaptureOptions, RasterFrame};

/// Remote collection that feedback reports are written to.
pub const COLLECTION_FEEDBACK_REPORTS: &str = "feedback_reports";

/// Local identity-store key holding the anonymous analytics id.
pub const ANALYTICS_USER_ID_KEY: &str = "analytics_user_id";

/// Analytics event emitted after a successful submission.
pub const EVENT_FEEDBACK_SUBMITTED: &str = "feedback_submitted";

// ---------------------------------------------------------------------------
// Async collaborators
// ---------------------------------------------------------------------------

/// Renders the current visual surface to a raster image.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Capture the full document surface with the given options.
    async fn capture(&self, options: &CaptureOptions) -> Result<RasterFrame, FeedbackError>;
}

/// Remote document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document in `collection`, returning its id.
    ///
    /// The store assigns the creation timestamp server-side; the
    /// payload never carries one.
    async fn create_document(
        &self,
        collection: &str,
        document: serde_json::Value,
    ) -> Result<String, FeedbackError>;
}

// ---------------------------------------------------------------------------
// Fire-and-forget sinks
// ---------------------------------------------------------------------------

/// Kind of a user-facing toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-facing toast surface.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Kind of a haptic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    Tap,
    Success,
    Error,
}

/// Device haptic surface.
pub trait HapticSink: Send + Sync {
    fn signal(&self, kind: HapticKind);
}

/// Analytics event sink. Must never block or fail the caller.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &str, properties: serde_json::Value);
}

/// Local persisted key-value identity store.
pub trait IdentityStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
}
