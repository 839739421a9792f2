//! The feedback widget workflow.
//!
//! [`FeedbackWidget`] owns a small state machine
//! (closed → open → capturing/submitting → success → closed) and drives
//! the side-effecting collaborators behind the [`ports`](crate::ports)
//! traits. It is a cheaply cloneable handle designed to be shared with
//! the rendering layer and with the background reset task.
//!
//! Error policy: nothing escapes this module as an `Err`. Validation
//! and external failures are logged, surfaced through the notification
//! and haptic sinks, and reported to the caller as outcome values; the
//! draft survives every failure unchanged.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;

use crate::draft::{validate_title, Draft, FeedbackKind};
use crate::env::{EnvironmentProbe, EnvironmentSample};
use crate::ports::{
    AnalyticsSink, DocumentStore, HapticKind, HapticSink, IdentityStore, NotificationKind,
    NotificationSink, Rasterizer, ANALYTICS_USER_ID_KEY, COLLECTION_FEEDBACK_REPORTS,
    EVENT_FEEDBACK_SUBMITTED,
};
use crate::report::FeedbackReport;
use crate::screenshot::{encode_data_url, CaptureOptions};

/// Delay between hiding the widget and rasterizing, so the hide
/// visually commits and the widget does not capture itself.
pub const CAPTURE_SETTLE: Duration = Duration::from_millis(100);

/// How long the success confirmation stays up before the widget
/// resets itself to closed.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Workflow state, carrying only the data valid in that state.
///
/// `CapturingScreenshot` is rendered as not-visible by the embedding
/// UI; the draft travels inside the variant so "submitting while
/// closed" and friends are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Closed,
    Open(Draft),
    CapturingScreenshot(Draft),
    Submitting(Draft),
    Success,
}

/// Result of a [`FeedbackWidget::capture_screenshot`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Screenshot captured and attached to the draft.
    Captured,
    /// Rasterization or encoding failed; the draft is unchanged.
    Failed,
    /// The widget was not open (or was closed mid-capture).
    Rejected,
}

/// Result of a [`FeedbackWidget::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The report was written; carries the new document id.
    Submitted(String),
    /// Client-side validation failed; no remote call was made.
    EmptyTitle,
    /// The widget was not open, or a submit was already in flight.
    Rejected,
    /// The remote write failed; the draft is preserved.
    Failed,
}

// ---------------------------------------------------------------------------
// FeedbackWidget
// ---------------------------------------------------------------------------

/// Collaborators the widget drives. All are shared trait objects so the
/// embedding application wires in platform implementations.
pub struct WidgetDeps {
    pub rasterizer: Arc<dyn Rasterizer>,
    pub store: Arc<dyn DocumentStore>,
    pub notifications: Arc<dyn NotificationSink>,
    pub haptics: Arc<dyn HapticSink>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub identity: Arc<dyn IdentityStore>,
    pub env: Arc<dyn EnvironmentProbe>,
}

struct Inner {
    state: Mutex<WorkflowState>,
    deps: WidgetDeps,
}

/// Handle to the single feedback widget instance.
#[derive(Clone)]
pub struct FeedbackWidget {
    inner: Arc<Inner>,
}

impl FeedbackWidget {
    pub fn new(deps: WidgetDeps) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(WorkflowState::Closed),
                deps,
            }),
        }
    }

    fn state_guard(&self) -> MutexGuard<'_, WorkflowState> {
        self.inner.state.lock().expect("widget state lock poisoned")
    }

    /// Snapshot of the current workflow state.
    pub fn state(&self) -> WorkflowState {
        self.state_guard().clone()
    }

    /// Whether the submit affordance should be enabled: open, not
    /// already submitting, and the title passes validation.
    pub fn can_submit(&self) -> bool {
        matches!(&*self.state_guard(), WorkflowState::Open(draft) if draft.is_submittable())
    }

    // -- open / close -------------------------------------------------------

    /// Open the widget with an empty draft. No-op unless closed.
    pub fn open(&self) {
        let mut state = self.state_guard();
        if *state == WorkflowState::Closed {
            *state = WorkflowState::Open(Draft::default());
            drop(state);
            self.inner.deps.haptics.signal(HapticKind::Tap);
            tracing::debug!("Feedback widget opened");
        }
    }

    /// Dismiss the widget, discarding any draft.
    ///
    /// Valid from any non-closed state; a capture or submit still in
    /// flight will find the widget closed and drop its result.
    pub fn close(&self) {
        let mut state = self.state_guard();
        if *state != WorkflowState::Closed {
            *state = WorkflowState::Closed;
            tracing::debug!("Feedback widget closed");
        }
    }

    // -- draft edits --------------------------------------------------------

    pub fn set_kind(&self, kind: FeedbackKind) {
        self.edit_draft(|draft| draft.kind = kind);
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit_draft(move |draft| draft.title = title);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.edit_draft(move |draft| draft.description = description);
    }

    /// Detach the captured screenshot from the draft.
    pub fn remove_screenshot(&self) {
        self.edit_draft(|draft| draft.screenshot = None);
    }

    /// Apply a pure draft mutation; only valid while open.
    fn edit_draft(&self, f: impl FnOnce(&mut Draft)) {
        let mut state = self.state_guard();
        if let WorkflowState::Open(draft) = &mut *state {
            f(draft);
        }
    }

    // -- screenshot capture -------------------------------------------------

    /// Capture a screenshot of the document surface into the draft.
    ///
    /// The widget hides itself for the duration of the capture and
    /// always returns to `Open`, with or without a screenshot. All
    /// failure is absorbed and surfaced as a notification.
    pub async fn capture_screenshot(&self) -> CaptureOutcome {
        {
            let mut state = self.state_guard();
            let draft = match &*state {
                WorkflowState::Open(draft) => draft.clone(),
                _ => return CaptureOutcome::Rejected,
            };
            *state = WorkflowState::CapturingScreenshot(draft);
        }
        self.inner.deps.haptics.signal(HapticKind::Tap);

        // Let the hide visually commit before rasterizing.
        tokio::time::sleep(CAPTURE_SETTLE).await;

        let options = CaptureOptions::default();
        let result = match self.inner.deps.rasterizer.capture(&options).await {
            Ok(frame) => encode_data_url(&frame),
            Err(e) => Err(e),
        };

        let mut state = self.state_guard();
        let draft = match &*state {
            WorkflowState::CapturingScreenshot(draft) => draft.clone(),
            // Closed while capturing: the result is stale, drop it.
            _ => {
                tracing::debug!("Discarding screenshot result, widget no longer capturing");
                return CaptureOutcome::Rejected;
            }
        };

        match result {
            Ok(data_url) => {
                *state = WorkflowState::Open(Draft {
                    screenshot: Some(data_url),
                    ..draft
                });
                drop(state);
                self.inner
                    .deps
                    .notifications
                    .notify(NotificationKind::Success, "Screenshot captured!");
                CaptureOutcome::Captured
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to capture screenshot");
                *state = WorkflowState::Open(draft);
                drop(state);
                self.inner
                    .deps
                    .notifications
                    .notify(NotificationKind::Error, "Failed to capture screenshot");
                CaptureOutcome::Failed
            }
        }
    }

    // -- submit -------------------------------------------------------------

    /// Validate, assemble, and write the report.
    ///
    /// Re-entry is a no-op while a submit is in flight. On success the
    /// widget shows the success state and resets itself to closed after
    /// [`SUCCESS_RESET_DELAY`]; on failure it returns to `Open` with
    /// the draft exactly as it was.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = {
            let mut state = self.state_guard();
            let draft = match &*state {
                WorkflowState::Open(draft) => draft.clone(),
                WorkflowState::Submitting(_) => {
                    tracing::debug!("Submit ignored, already in flight");
                    return SubmitOutcome::Rejected;
                }
                _ => return SubmitOutcome::Rejected,
            };

            if let Err(e) = validate_title(&draft.title) {
                drop(state);
                tracing::debug!(error = %e, "Submit rejected by validation");
                self.inner
                    .deps
                    .notifications
                    .notify(NotificationKind::Error, "Please add a title");
                return SubmitOutcome::EmptyTitle;
            }

            *state = WorkflowState::Submitting(draft.clone());
            draft
        };
        self.inner.deps.haptics.signal(HapticKind::Tap);

        // One environment sample per submission, taken here and nowhere
        // else; the report assembly itself is pure.
        let env = EnvironmentSample::capture(self.inner.deps.env.as_ref());
        let user_id = self.inner.deps.identity.read(ANALYTICS_USER_ID_KEY);
        let report = FeedbackReport::assemble(&draft, &env, user_id, Utc::now());
        let document =
            serde_json::to_value(&report).expect("FeedbackReport is always serialisable");

        match self
            .inner
            .deps
            .store
            .create_document(COLLECTION_FEEDBACK_REPORTS, document)
            .await
        {
            Ok(document_id) => {
                // Fire-and-forget; must never affect the outcome.
                self.inner.deps.analytics.track(
                    EVENT_FEEDBACK_SUBMITTED,
                    serde_json::json!({
                        "feedback_type": draft.kind.as_str(),
                        "has_screenshot": draft.screenshot.is_some(),
                    }),
                );

                tracing::info!(
                    document_id = %document_id,
                    kind = draft.kind.as_str(),
                    "Feedback submitted"
                );

                let mut state = self.state_guard();
                if matches!(&*state, WorkflowState::Submitting(_)) {
                    *state = WorkflowState::Success;
                    drop(state);
                    self.inner.deps.haptics.signal(HapticKind::Success);
                    self.spawn_success_reset();
                } else {
                    // Closed mid-write: the record exists, but the UI
                    // state must not be resurrected.
                    tracing::debug!("Widget closed during submit, skipping success state");
                }
                SubmitOutcome::Submitted(document_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to submit feedback");

                let mut state = self.state_guard();
                if matches!(&*state, WorkflowState::Submitting(_)) {
                    // Return to Open with the draft untouched.
                    *state = WorkflowState::Open(draft);
                }
                drop(state);

                self.inner
                    .deps
                    .notifications
                    .notify(NotificationKind::Error, "Failed to submit feedback");
                self.inner.deps.haptics.signal(HapticKind::Error);
                SubmitOutcome::Failed
            }
        }
    }

    /// After the success confirmation has been shown for
    /// [`SUCCESS_RESET_DELAY`], close the widget with a fresh draft.
    /// Skipped if the user closed it first.
    fn spawn_success_reset(&self) {
        let widget = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_RESET_DELAY).await;
            let mut state = widget.state_guard();
            if *state == WorkflowState::Success {
                *state = WorkflowState::Closed;
                tracing::debug!("Success confirmation auto-dismissed");
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedbackError;
    use crate::ports::{NotificationKind, NotificationSink};
    use crate::screenshot::RasterFrame;
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    struct NoopRasterizer;
    #[async_trait]
    impl Rasterizer for NoopRasterizer {
        async fn capture(&self, _options: &CaptureOptions) -> Result<RasterFrame, FeedbackError> {
            Err(FeedbackError::Capture("no display".into()))
        }
    }

    struct NoopStore;
    #[async_trait]
    impl DocumentStore for NoopStore {
        async fn create_document(
            &self,
            _collection: &str,
            _document: serde_json::Value,
        ) -> Result<String, FeedbackError> {
            Ok("doc-1".into())
        }
    }

    struct NoopSink;
    impl NotificationSink for NoopSink {
        fn notify(&self, _kind: NotificationKind, _message: &str) {}
    }
    impl HapticSink for NoopSink {
        fn signal(&self, _kind: HapticKind) {}
    }
    impl AnalyticsSink for NoopSink {
        fn track(&self, _event: &str, _properties: serde_json::Value) {}
    }
    impl IdentityStore for NoopSink {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }
    }
    impl EnvironmentProbe for NoopSink {
        fn page_path(&self) -> String {
            "/".into()
        }
        fn page_url(&self) -> String {
            "https://example.edu/".into()
        }
        fn viewport(&self) -> (u32, u32) {
            (800, 600)
        }
        fn theme(&self) -> Option<String> {
            None
        }
        fn user_agent(&self) -> String {
            "test".into()
        }
        fn platform(&self) -> String {
            "test".into()
        }
        fn language(&self) -> String {
            "en".into()
        }
        fn online(&self) -> bool {
            true
        }
    }

    fn widget() -> FeedbackWidget {
        let sink = Arc::new(NoopSink);
        FeedbackWidget::new(WidgetDeps {
            rasterizer: Arc::new(NoopRasterizer),
            store: Arc::new(NoopStore),
            notifications: sink.clone(),
            haptics: sink.clone(),
            analytics: sink.clone(),
            identity: sink.clone(),
            env: sink,
        })
    }

    #[test]
    fn starts_closed() {
        assert_eq!(widget().state(), WorkflowState::Closed);
    }

    #[test]
    fn open_installs_an_empty_draft() {
        let w = widget();
        w.open();
        assert_matches!(w.state(), WorkflowState::Open(draft) => {
            assert_eq!(draft, Draft::default());
        });
    }

    #[test]
    fn open_is_a_noop_when_already_open() {
        let w = widget();
        w.open();
        w.set_title("Typed something");
        w.open();
        assert_matches!(w.state(), WorkflowState::Open(draft) => {
            assert_eq!(draft.title, "Typed something");
        });
    }

    #[test]
    fn close_discards_the_draft() {
        let w = widget();
        w.open();
        w.set_title("Will be discarded");
        w.close();
        assert_eq!(w.state(), WorkflowState::Closed);

        w.open();
        assert_matches!(w.state(), WorkflowState::Open(draft) => {
            assert!(draft.title.is_empty());
        });
    }

    #[test]
    fn edits_are_ignored_while_closed() {
        let w = widget();
        w.set_title("ghost");
        assert_eq!(w.state(), WorkflowState::Closed);
    }

    #[test]
    fn remove_screenshot_clears_the_attachment() {
        let w = widget();
        w.open();
        {
            let mut state = w.state_guard();
            if let WorkflowState::Open(draft) = &mut *state {
                draft.screenshot = Some("data:image/png;base64,AAAA".into());
            }
        }
        w.remove_screenshot();
        assert_matches!(w.state(), WorkflowState::Open(draft) => {
            assert!(draft.screenshot.is_none());
        });
    }

    #[test]
    fn can_submit_requires_open_and_valid_title() {
        let w = widget();
        assert!(!w.can_submit());
        w.open();
        assert!(!w.can_submit());
        w.set_title("   ");
        assert!(!w.can_submit());
        w.set_title("Feed scroll jitter");
        assert!(w.can_submit());
    }

    #[tokio::test]
    async fn capture_is_rejected_while_closed() {
        let w = widget();
        assert_eq!(w.capture_screenshot().await, CaptureOutcome::Rejected);
        assert_eq!(w.state(), WorkflowState::Closed);
    }

    #[tokio::test]
    async fn submit_is_rejected_while_closed() {
        let w = widget();
        assert_eq!(w.submit().await, SubmitOutcome::Rejected);
    }
}
