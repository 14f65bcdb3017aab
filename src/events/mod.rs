//! Analytics events
//!
//! The wizard reports when a driver starts filling the appeal form. Sinks
//! are fire-and-forget: a failing sink logs and moves on, the caller never
//! sees the failure.

use crate::config::persistence::EventLogStorage;
use crate::models::AppealType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Name of the event emitted when the appeal form is opened
pub const FORM_STARTED: &str = "form_started";

/// Structured analytics notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    FormStarted {
        #[serde(rename = "type")]
        appeal_type: AppealType,
        #[serde(rename = "usedQuiz")]
        used_quiz: bool,
    },
}

impl AnalyticsEvent {
    /// Event name as seen by listeners
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::FormStarted { .. } => FORM_STARTED,
        }
    }
}

/// An event with the time it was emitted, as stored in the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AnalyticsEvent,
}

impl RecordedEvent {
    pub fn now(event: AnalyticsEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Listener for analytics events
pub trait AnalyticsSink: Send + Sync {
    /// Deliver one event. Must not block on or report delivery failures.
    fn emit(&self, event: &AnalyticsEvent);
}

/// Writes events to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn emit(&self, event: &AnalyticsEvent) {
        match event {
            AnalyticsEvent::FormStarted {
                appeal_type,
                used_quiz,
            } => info!(
                event = event.name(),
                appeal_type = %appeal_type,
                used_quiz,
                "analytics event"
            ),
        }
    }
}

/// Keeps every event in memory; cloned handles share the same buffer
#[derive(Debug, Default, Clone)]
pub struct MemoryAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MemoryAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalyticsSink for MemoryAnalytics {
    fn emit(&self, event: &AnalyticsEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

/// Appends events to the on-disk event log
#[derive(Debug)]
pub struct EventLogAnalytics {
    storage: EventLogStorage,
}

impl EventLogAnalytics {
    pub fn new(storage: EventLogStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &EventLogStorage {
        &self.storage
    }
}

impl AnalyticsSink for EventLogAnalytics {
    fn emit(&self, event: &AnalyticsEvent) {
        if let Err(e) = self.storage.append_event(RecordedEvent::now(event.clone())) {
            warn!(error = %e, event = event.name(), "failed to record analytics event");
        }
    }
}

/// Forwards every event to each inner sink in order
#[derive(Default)]
pub struct FanoutAnalytics {
    sinks: Vec<Box<dyn AnalyticsSink>>,
}

impl FanoutAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl AnalyticsSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AnalyticsSink for FanoutAnalytics {
    fn emit(&self, event: &AnalyticsEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}

/// Hands events to a background task so slow sinks never hold up input
/// handling. Dropping every handle lets the task drain and finish.
#[derive(Debug, Clone)]
pub struct BackgroundAnalytics {
    tx: mpsc::UnboundedSender<AnalyticsEvent>,
}

impl BackgroundAnalytics {
    /// Spawn the delivery task on the current tokio runtime
    pub fn spawn(inner: impl AnalyticsSink + 'static) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<AnalyticsEvent>();
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                inner.emit(&event);
            }
            debug!("analytics delivery task finished");
        });
        (Self { tx }, handle)
    }
}

impl AnalyticsSink for BackgroundAnalytics {
    fn emit(&self, event: &AnalyticsEvent) {
        if self.tx.send(event.clone()).is_err() {
            warn!(event = event.name(), "analytics delivery task is gone");
        }
    }
}
