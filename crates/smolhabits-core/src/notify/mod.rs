//! Notification dispatch.
//!
//! The host implements [`Notifier`]; the [`NotificationDispatcher`] builds
//! the two notifications this app ever shows and makes sure each delivery
//! channel exists before its first use. Both notifications have a fixed id,
//! so a new one replaces the previous one instead of stacking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::NotifyError;

pub const REMINDER_NOTIFICATION_ID: u32 = 1;
pub const POMODORO_NOTIFICATION_ID: u32 = 1001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Default,
    High,
}

/// A delivery channel the host must create before showing on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: &'static str,
    pub name: &'static str,
    pub importance: Importance,
}

pub const REMINDER_CHANNEL: Channel = Channel {
    id: "habit_reminder_channel",
    name: "Habit Reminders",
    importance: Importance::High,
};

pub const POMODORO_CHANNEL: Channel = Channel {
    id: "pomodoro_channel",
    name: "Pomodoro Timer",
    importance: Importance::Low,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    /// Status-style notification that stays until replaced.
    pub ongoing: bool,
    pub importance: Importance,
}

impl Notification {
    pub fn reminder(habit_name: &str) -> Self {
        Self {
            id: REMINDER_NOTIFICATION_ID,
            channel_id: REMINDER_CHANNEL.id.into(),
            title: "Habit Reminder".into(),
            body: format!("Time to do: {habit_name}"),
            ongoing: false,
            importance: REMINDER_CHANNEL.importance,
        }
    }

    pub fn pomodoro_status(status: &str) -> Self {
        Self {
            id: POMODORO_NOTIFICATION_ID,
            channel_id: POMODORO_CHANNEL.id.into(),
            title: "Pomodoro Timer".into(),
            body: status.into(),
            ongoing: true,
            importance: POMODORO_CHANNEL.importance,
        }
    }
}

/// Platform seam for showing notifications.
pub trait Notifier: Send + Sync {
    fn ensure_channel(&self, channel: &Channel) -> Result<(), NotifyError>;

    fn show(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Remove a notification shown earlier under `id`, if still visible.
    fn dismiss(&self, id: u32) -> Result<(), NotifyError>;
}

/// Notifier that only writes to the log. Used when notifications are off.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn ensure_channel(&self, channel: &Channel) -> Result<(), NotifyError> {
        debug!(channel = channel.id, "channel ready");
        Ok(())
    }

    fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            id = notification.id,
            title = %notification.title,
            "{}",
            notification.body
        );
        Ok(())
    }

    fn dismiss(&self, id: u32) -> Result<(), NotifyError> {
        debug!(id, "notification dismissed");
        Ok(())
    }
}

pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    reminder_ready: AtomicBool,
    pomodoro_ready: AtomicBool,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            reminder_ready: AtomicBool::new(false),
            pomodoro_ready: AtomicBool::new(false),
        }
    }

    /// Show "Time to do: {habit}". Returns whether it was shown.
    pub fn show_reminder(&self, habit_name: &str) -> bool {
        self.dispatch(
            &REMINDER_CHANNEL,
            &self.reminder_ready,
            &Notification::reminder(habit_name),
        )
    }

    /// Show or replace the ongoing countdown status.
    pub fn show_pomodoro_status(&self, status: &str) -> bool {
        self.dispatch(
            &POMODORO_CHANNEL,
            &self.pomodoro_ready,
            &Notification::pomodoro_status(status),
        )
    }

    /// Take down the ongoing countdown status. Does nothing if no status
    /// was ever shown.
    pub fn dismiss_pomodoro_status(&self) -> bool {
        if !self.pomodoro_ready.load(Ordering::Acquire) {
            return false;
        }
        match self.notifier.dismiss(POMODORO_NOTIFICATION_ID) {
            Ok(()) => true,
            Err(e) => {
                warn!(id = POMODORO_NOTIFICATION_ID, error = %e, "notification not dismissed");
                false
            }
        }
    }

    fn dispatch(&self, channel: &Channel, ready: &AtomicBool, notification: &Notification) -> bool {
        if !ready.load(Ordering::Acquire) {
            if let Err(e) = self.notifier.ensure_channel(channel) {
                warn!(channel = channel.id, error = %e, "notification channel unavailable");
                return false;
            }
            ready.store(true, Ordering::Release);
        }

        match self.notifier.show(notification) {
            Ok(()) => true,
            Err(e) => {
                warn!(id = notification.id, error = %e, "notification not shown");
                false
            }
        }
    }
}
