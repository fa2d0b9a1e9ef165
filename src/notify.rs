//! Notifications sent back to the host while an operation runs
//!
//! The host (e.g. a chat assistant) receives the generated document as a `message`, and warnings or failures as a `status`.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Progress of the operation a `status` notification is about.
/// Hosts only expect `"complete"`: warnings and failures are both reported once the step they are about is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    Complete,
}

/// An event sent to a [`NotificationSink`]
///
/// Its serde form is the one hosts expect, e.g. `{"type": "message", "data": {"content": "..."}}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Notification {
    /// The final output of an operation
    Message { content: String },
    /// A warning, or the report of a failure
    Status {
        description: String,
        status: Progress,
        /// Whether this ends the visible interaction. The host decides what to do with it.
        done: bool,
    },
}

impl Notification {
    pub fn message<S: Into<String>>(content: S) -> Self {
        Notification::Message { content: content.into() }
    }

    /// A `status` notification that marks the end of the interaction
    pub fn terminal_status<S: Into<String>>(description: S) -> Self {
        Notification::Status {
            description: description.into(),
            status: Progress::Complete,
            done: true,
        }
    }

    pub fn is_message(&self) -> bool {
        match self {
            Notification::Message { .. } => true,
            _ => false,
        }
    }

    pub fn is_status(&self) -> bool {
        match self {
            Notification::Status { .. } => true,
            _ => false,
        }
    }
}


/// Something that receives notifications (usually the host's event emitter)
///
/// Notifications are awaited one after the other: a call does not proceed before its notification has been handed over.
/// Delivery failures are the sink's business.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// A sink that keeps every notification it receives, in order
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the notifications received so far
    pub fn notifications(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn notify(&self, notification: Notification) {
        match self.received.lock() {
            Ok(mut received) => received.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

/// A sink that forwards notifications to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, notification: Notification) {
        match notification {
            Notification::Message { content } => log::info!("{}", content),
            Notification::Status { description, .. } => log::warn!("{}", description),
        }
    }
}
