use std::sync::Arc;

use smolhabits_core::{
    Config, CountdownService, Event, Habit, HabitSession, HabitTemplates, LogNotifier,
    NotificationDispatcher, Notifier, ReminderScheduler, ReminderWorker, TokioTaskRunner,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::notifier::DesktopNotifier;

/// A wired-up session plus the stream of asynchronous events it produces
/// (reminder firings, countdown ticks).
pub struct App {
    pub session: HabitSession<TokioTaskRunner>,
    pub events: UnboundedReceiver<Event>,
    pub config: Config,
}

impl App {
    /// Must be called from inside a tokio runtime.
    pub fn new(config: Config) -> Self {
        let dispatcher = Arc::new(NotificationDispatcher::new(notifier_for(&config)));
        let (tx, events) = unbounded_channel();

        let worker = ReminderWorker::new(Arc::clone(&dispatcher)).with_events(tx.clone());
        let runner = TokioTaskRunner::new(Handle::current(), worker);

        let mut countdown = CountdownService::new(Handle::current(), tx);
        if config.notifications.enabled && config.pomodoro.status_notifications {
            countdown = countdown.with_status_notifications(dispatcher);
        }

        Self {
            session: HabitSession::new(ReminderScheduler::new(runner), countdown),
            events,
            config,
        }
    }
}

fn notifier_for(config: &Config) -> Arc<dyn Notifier> {
    if config.notifications.enabled {
        Arc::new(DesktopNotifier::new(config.notifications.app_name.clone()))
    } else {
        Arc::new(LogNotifier)
    }
}

/// A template by id, or an ad-hoc habit named after the input.
pub fn resolve_habit(input: &str) -> Habit {
    HabitTemplates::find(input).unwrap_or_else(|| {
        let name = input.trim();
        let id = name.to_ascii_lowercase().replace(char::is_whitespace, "_");
        Habit::new(id, name, "", "")
    })
}
