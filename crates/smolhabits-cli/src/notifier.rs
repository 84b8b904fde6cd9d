//! Desktop notifications through notify-rust.

#[cfg(all(unix, not(target_os = "macos")))]
use std::collections::HashMap;
#[cfg(all(unix, not(target_os = "macos")))]
use std::sync::Mutex;

use notify_rust::Notification as DesktopNotification;
#[cfg(all(unix, not(target_os = "macos")))]
use notify_rust::{Hint, NotificationHandle, Urgency};
#[cfg(all(unix, not(target_os = "macos")))]
use smolhabits_core::Importance;
use smolhabits_core::{Channel, Notification, Notifier, NotifyError};
use tracing::debug;

pub struct DesktopNotifier {
    app_name: String,
    /// Handles of ongoing notifications, kept so they can be closed.
    #[cfg(all(unix, not(target_os = "macos")))]
    ongoing: Mutex<HashMap<u32, NotificationHandle>>,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            #[cfg(all(unix, not(target_os = "macos")))]
            ongoing: Mutex::new(HashMap::new()),
        }
    }
}

impl Notifier for DesktopNotifier {
    // Desktop notification servers have no channel concept.
    fn ensure_channel(&self, channel: &Channel) -> Result<(), NotifyError> {
        debug!(channel = channel.id, name = channel.name, "desktop channel ready");
        Ok(())
    }

    fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut desktop = DesktopNotification::new();
        desktop
            .summary(&notification.title)
            .body(&notification.body)
            .appname(&self.app_name)
            .icon("alarm-clock");

        // Same id replaces the previous notification on XDG servers.
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            desktop
                .id(notification.id)
                .urgency(urgency_for(notification.importance));
            if notification.ongoing {
                desktop.hint(Hint::Resident(true));
            }
        }

        let handle = desktop.show().map_err(|e| NotifyError::ShowFailed {
            id: notification.id,
            message: e.to_string(),
        })?;

        #[cfg(all(unix, not(target_os = "macos")))]
        if notification.ongoing {
            if let Ok(mut ongoing) = self.ongoing.lock() {
                ongoing.insert(notification.id, handle);
            }
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        let _ = handle;

        Ok(())
    }

    fn dismiss(&self, id: u32) -> Result<(), NotifyError> {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let handle = self.ongoing.lock().ok().and_then(|mut ongoing| ongoing.remove(&id));
            if let Some(handle) = handle {
                handle.close();
                debug!(id, "desktop notification closed");
            }
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        debug!(id, "closing notifications is not supported here");
        Ok(())
    }
}

/// Critical would never expire, and reminders are heads-up only.
#[cfg(all(unix, not(target_os = "macos")))]
fn urgency_for(importance: Importance) -> Urgency {
    match importance {
        Importance::Low => Urgency::Low,
        Importance::Default | Importance::High => Urgency::Normal,
    }
}
