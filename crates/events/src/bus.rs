//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] carries the outcome messages of mutations (created,
//! updated, deleted, failed) from the state layer to whatever front end is
//! rendering. Share it via `Arc<NotificationBus>`.

use chrono::{DateTime, Utc};
use projdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A message for the user about something that just happened.
///
/// Constructed via [`Notification::success`], [`Notification::error`] or
/// [`Notification::info`] and optionally tagged with
/// [`with_subject`](Notification::with_subject).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,

    /// Short heading, e.g. `"Módulo creado"`.
    pub title: String,

    /// One-sentence body.
    pub text: String,

    /// Entity kind the message is about (e.g. `"module"`).
    pub subject_kind: Option<String>,

    /// Entity id the message is about.
    pub subject_id: Option<DbId>,

    pub timestamp: DateTime<Utc>,
}

impl Notification {
    fn new(level: NotificationLevel, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            text: text.into(),
            subject_kind: None,
            subject_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, text)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, text)
    }

    /// Attach the entity the notification concerns.
    pub fn with_subject(mut self, kind: impl Into<String>, id: DbId) -> Self {
        self.subject_kind = Some(kind.into());
        self.subject_id = Some(id);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out notification bus.
///
/// # Usage
///
/// ```rust
/// use projdesk_events::{Notification, NotificationBus};
///
/// let bus = NotificationBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(Notification::success("Fase creada", "La fase Diseño ha sido creada."));
/// ```
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread notifications are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if nobody listens.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            level = ?notification.level,
            title = %notification.title,
            "Publishing notification",
        );
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            Notification::success("Módulo creado", "El módulo ha sido creado exitosamente")
                .with_subject("module", 12),
        );

        let received = rx.recv().await.expect("should receive the notification");
        assert_eq!(received.level, NotificationLevel::Success);
        assert_eq!(received.title, "Módulo creado");
        assert_eq!(received.subject_kind.as_deref(), Some("module"));
        assert_eq!(received.subject_id, Some(12));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_notification() {
        let bus = NotificationBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Notification::error("Error", "No se pudo eliminar el módulo"));

        assert!(rx1.recv().await.unwrap().is_error());
        assert!(rx2.recv().await.unwrap().is_error());
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NotificationBus::default();
        bus.publish(Notification::info("Nada", "sin oyentes"));
    }

    #[test]
    fn level_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationLevel::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
