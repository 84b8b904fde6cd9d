//! Shared helpers for core integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use smolhabits_core::{
    Channel, CountdownService, Event, HabitSession, Notification, NotificationDispatcher,
    Notifier, NotifyError, ReminderScheduler, ReminderWorker, TokioTaskRunner,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

/// In-memory notifier that remembers everything it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<Notification>>,
    channels: Mutex<Vec<String>>,
    dismissed: Mutex<Vec<u32>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn channels(&self) -> Vec<String> {
        self.channels.lock().unwrap().clone()
    }

    pub fn dismissed(&self) -> Vec<u32> {
        self.dismissed.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn ensure_channel(&self, channel: &Channel) -> Result<(), NotifyError> {
        self.channels.lock().unwrap().push(channel.id.to_string());
        Ok(())
    }

    fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.shown.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn dismiss(&self, id: u32) -> Result<(), NotifyError> {
        self.dismissed.lock().unwrap().push(id);
        Ok(())
    }
}

pub struct Harness {
    pub notifier: Arc<RecordingNotifier>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub events: UnboundedReceiver<Event>,
    pub session: HabitSession<TokioTaskRunner>,
}

/// Wire a session the same way the CLI does, with a recording notifier.
/// Must be called inside a tokio runtime.
pub fn harness() -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let dispatcher = Arc::new(NotificationDispatcher::new(notifier.clone()));
    let (tx, events) = unbounded_channel();

    let worker = ReminderWorker::new(Arc::clone(&dispatcher)).with_events(tx.clone());
    let runner = TokioTaskRunner::new(Handle::current(), worker);
    let countdown = CountdownService::new(Handle::current(), tx);
    let session = HabitSession::new(ReminderScheduler::new(runner), countdown);

    Harness {
        notifier,
        dispatcher,
        events,
        session,
    }
}
