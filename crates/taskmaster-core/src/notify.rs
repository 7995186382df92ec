//! User-facing notifications.
//!
//! The platform channel is abstracted behind [`Notifier`]. [`deliver`] is the
//! only entry point the board uses: it shows the notification when allowed
//! and otherwise falls back to a synchronous alert, so a message is never
//! silently dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::TaskId;

/// Notification permission state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// The user has not been asked yet.
    Default,
    Granted,
    Denied,
    /// The platform has no notification channel.
    Unsupported,
}

/// What happens when the user clicks a notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClickAction {
    FocusTask { id: TaskId },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub on_click: Option<ClickAction>,
}

/// Errors raised by a notification channel.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification permission not granted")]
    NotPermitted,

    #[error("Notification channel failed: {0}")]
    Channel(String),
}

/// Platform notification channel.
pub trait Notifier {
    fn permission(&self) -> Permission;

    /// Ask the user for permission. Implementations only prompt while the
    /// state is [`Permission::Default`] and return the resulting state.
    fn request_permission(&mut self) -> Permission;

    fn show(&mut self, notification: &Notification) -> Result<(), NotifyError>;

    /// Synchronous, always-visible fallback.
    fn alert(&mut self, message: &str);
}

/// How a notification reached the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Shown,
    Alerted,
}

/// Show `notification`, falling back to an alert when notifications are not
/// permitted or the channel fails.
pub fn deliver<N: Notifier + ?Sized>(notifier: &mut N, notification: &Notification) -> Delivery {
    let permission = match notifier.permission() {
        Permission::Default => notifier.request_permission(),
        other => other,
    };

    if permission == Permission::Granted {
        match notifier.show(notification) {
            Ok(()) => return Delivery::Shown,
            Err(e) => tracing::warn!(error = %e, "notification failed, falling back to alert"),
        }
    } else {
        tracing::debug!(?permission, "notifications unavailable, falling back to alert");
    }

    notifier.alert(&format!("{}: {}", notification.title, notification.body));
    Delivery::Alerted
}

/// Notifier that never shows anything and swallows alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn permission(&self) -> Permission {
        Permission::Unsupported
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Unsupported
    }

    fn show(&mut self, _notification: &Notification) -> Result<(), NotifyError> {
        Err(NotifyError::NotPermitted)
    }

    fn alert(&mut self, _message: &str) {}
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    fn sample() -> Notification {
        Notification {
            title: "TaskMaster".into(),
            body: "Nova tarefa: x".into(),
            icon: "/icon-192.png".into(),
            on_click: Some(ClickAction::FocusTask { id: TaskId(7) }),
        }
    }

    #[test]
    fn granted_permission_shows_notification() {
        let mut notifier = RecordingNotifier::new(Permission::Granted);
        assert_eq!(deliver(&mut notifier, &sample()), Delivery::Shown);
        assert_eq!(notifier.shown, vec![sample()]);
        assert!(notifier.alerts.is_empty());
    }

    #[test]
    fn default_permission_prompts_once() {
        let mut notifier = RecordingNotifier::new(Permission::Default);
        deliver(&mut notifier, &sample());
        deliver(&mut notifier, &sample());
        assert_eq!(notifier.prompts, 1);
        assert_eq!(notifier.shown.len(), 2);
    }

    #[test]
    fn denied_permission_falls_back_to_alert() {
        let mut notifier = RecordingNotifier::new(Permission::Denied);
        assert_eq!(deliver(&mut notifier, &sample()), Delivery::Alerted);
        assert_eq!(notifier.alerts, vec!["TaskMaster: Nova tarefa: x".to_string()]);
        assert!(notifier.shown.is_empty());
    }

    #[test]
    fn failing_channel_falls_back_to_alert() {
        let mut notifier = RecordingNotifier::new(Permission::Granted);
        notifier.fail_show = true;
        assert_eq!(deliver(&mut notifier, &sample()), Delivery::Alerted);
        assert_eq!(notifier.alerts.len(), 1);
    }

    #[test]
    fn unsupported_platform_still_alerts() {
        let mut notifier = RecordingNotifier::new(Permission::Unsupported);
        assert_eq!(deliver(&mut notifier, &sample()), Delivery::Alerted);
        assert_eq!(deliver(&mut NullNotifier, &sample()), Delivery::Alerted);
    }
}
