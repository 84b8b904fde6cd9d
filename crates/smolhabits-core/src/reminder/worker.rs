use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use super::ReminderRequest;
use crate::events::Event;
use crate::notify::NotificationDispatcher;

/// Label used when a fired task carries no habit name.
pub const PLACEHOLDER_HABIT_NAME: &str = "Habit";

/// Runs when a deferred reminder fires.
pub struct ReminderWorker {
    dispatcher: Arc<NotificationDispatcher>,
    events: Option<UnboundedSender<Event>>,
}

impl ReminderWorker {
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self {
            dispatcher,
            events: None,
        }
    }

    /// Also publish a [`Event::ReminderFired`] for every fired task.
    pub fn with_events(mut self, events: UnboundedSender<Event>) -> Self {
        self.events = Some(events);
        self
    }

    /// Show the reminder. Delivery is best-effort and never retried.
    pub fn fire(&self, request: &ReminderRequest) {
        let habit_name = payload_name(&request.habit_name);
        info!(tag = %request.tag, habit = habit_name, "reminder fired");

        self.dispatcher.show_reminder(habit_name);

        if let Some(events) = &self.events {
            let event = Event::ReminderFired {
                request_id: request.id,
                tag: request.tag,
                habit_name: habit_name.to_string(),
                at: Utc::now(),
            };
            if events.send(event).is_err() {
                warn!("event receiver dropped; reminder event discarded");
            }
        }
    }
}

pub(crate) fn payload_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_HABIT_NAME
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use crate::reminder::Trigger;

    #[test]
    fn missing_payload_uses_placeholder() {
        assert_eq!(payload_name(""), "Habit");
        assert_eq!(payload_name("   "), "Habit");
        assert_eq!(payload_name(" Stretch "), "Stretch");
    }

    #[test]
    fn fire_shows_notification_and_publishes_event() {
        let notifier = Arc::new(RecordingNotifier::default());
        let dispatcher = Arc::new(NotificationDispatcher::new(notifier.clone()));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let worker = ReminderWorker::new(dispatcher).with_events(tx);

        let request = ReminderRequest::new("", Trigger::After { minutes: 1 }, Utc::now());
        worker.fire(&request);

        let shown = notifier.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].body, "Time to do: Habit");

        match rx.try_recv().unwrap() {
            Event::ReminderFired { habit_name, request_id, .. } => {
                assert_eq!(habit_name, "Habit");
                assert_eq!(request_id, request.id);
            }
            other => panic!("Expected ReminderFired, got {other:?}"),
        }
    }
}
