//! Notification feed for asynchronous user-facing events.
//!
//! The feed is kept newest-first: new entries are prepended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sportswear_store_core::{NotificationId, NotificationKind};

/// A notification as shown in the notification centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

/// Producer-side payload; the feed assigns id, timestamp and read state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub action_url: Option<String>,
}

impl NewNotification {
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            action_url: None,
        }
    }

    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    /// Attach a link the notification opens when clicked.
    #[must_use]
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}

/// Ordered, newest-first list of notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFeed {
    entries: Vec<Notification>,
}

impl NotificationFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a notification, assigning id and timestamp. Returns its id.
    pub fn add(&mut self, notification: NewNotification) -> NotificationId {
        let id = NotificationId::generate();
        self.entries.insert(
            0,
            Notification {
                id: id.clone(),
                kind: notification.kind,
                title: notification.title,
                message: notification.message,
                timestamp: Utc::now(),
                read: false,
                action_url: notification.action_url,
            },
        );
        id
    }

    /// Remove one notification; unknown ids are ignored.
    pub fn remove(&mut self, id: &NotificationId) {
        self.entries.retain(|n| &n.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Mark one notification as read; unknown ids are ignored.
    pub fn mark_read(&mut self, id: &NotificationId) {
        if let Some(entry) = self.entries.iter_mut().find(|n| &n.id == id) {
            entry.read = true;
        }
    }

    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| &n.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
