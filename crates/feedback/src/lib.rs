//! CampusReel feedback widget workflow.
//!
//! This crate implements the in-app feedback submission flow: a modal
//! widget whose state machine drives screenshot capture and report
//! submission against a set of narrow collaborator interfaces.
//!
//! - [`widget`] — [`FeedbackWidget`], the workflow state machine.
//! - [`draft`] / [`report`] — the in-progress form state and the
//!   finalized wire record.
//! - [`ports`] — collaborator traits (rasterizer, document store,
//!   notification/haptic/analytics sinks, identity store).
//! - [`env`] — the read-only environment probe sampled at submit time.
//! - [`screenshot`] — capture options and PNG data-URL encoding.
//! - [`remote`] — the HTTP document-store implementation.
//! - [`analytics`] — an in-process broadcast-backed analytics sink.
//!
//! The rendering layer itself is out of scope: the embedding UI
//! observes [`WorkflowState`] and calls the widget's operations.

pub mod analytics;
pub mod draft;
pub mod env;
pub mod error;
pub mod ports;
pub mod remote;
pub mod report;
pub mod screenshot;
pub mod widget;

pub use analytics::{AnalyticsBus, AnalyticsEvent};
pub use draft::{Draft, FeedbackKind};
pub use env::{EnvironmentProbe, EnvironmentSample};
pub use error::FeedbackError;
pub use ports::{
    AnalyticsSink, DocumentStore, HapticKind, HapticSink, IdentityStore, NotificationKind,
    NotificationSink, Rasterizer,
};
pub use remote::{HttpDocumentStore, RemoteStoreConfig};
pub use report::FeedbackReport;
pub use screenshot::{CaptureOptions, RasterFrame};
pub use widget::{CaptureOutcome, FeedbackWidget, SubmitOutcome, WidgetDeps, WorkflowState};
