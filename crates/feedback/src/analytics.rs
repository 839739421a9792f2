//! In-process analytics bus.
//!
//! [`AnalyticsBus`] is a lossy publish/subscribe hub backed by
//! `tokio::sync::broadcast`. It implements
//! [`AnalyticsSink`](crate::ports::AnalyticsSink), so the widget can
//! emit events without knowing who (if anyone) is listening; the
//! embedding application subscribes and forwards to its real analytics
//! backend.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use campusreel_core::types::Timestamp;

use crate::ports::AnalyticsSink;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A tracked analytics event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `"feedback_submitted"`.
    pub name: String,
    /// Free-form JSON properties.
    pub properties: serde_json::Value,
    /// When the event was tracked (UTC).
    pub timestamp: Timestamp,
}

/// Lossy in-process fan-out for analytics events.
///
/// Publishing never fails: with zero subscribers the event is silently
/// dropped, and slow subscribers observe `RecvError::Lagged` rather
/// than back-pressuring the widget.
pub struct AnalyticsBus {
    sender: broadcast::Sender<AnalyticsEvent>,
}

impl AnalyticsBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all events tracked on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<AnalyticsEvent> {
        self.sender.subscribe()
    }
}

impl Default for AnalyticsBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl AnalyticsSink for AnalyticsBus {
    fn track(&self, event: &str, properties: serde_json::Value) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(AnalyticsEvent {
            name: event.to_string(),
            properties,
            timestamp: Utc::now(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
