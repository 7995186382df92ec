//! Terminal notification channel.

use taskmaster_core::{Notification, Notifier, NotifyError, Permission};

/// Writes notifications and alerts to stderr so stdout stays parseable.
///
/// There is no prompt on a terminal: permission is decided up front by
/// `notifications.enabled`.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    permission: Permission,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        Self {
            permission: if enabled {
                Permission::Granted
            } else {
                Permission::Denied
            },
        }
    }
}

impl Notifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        self.permission
    }

    fn show(&mut self, notification: &Notification) -> Result<(), NotifyError> {
        if self.permission != Permission::Granted {
            return Err(NotifyError::NotPermitted);
        }
        eprintln!("[{}] {}", notification.title, notification.body);
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        eprintln!("ALERT: {message}");
    }
}
