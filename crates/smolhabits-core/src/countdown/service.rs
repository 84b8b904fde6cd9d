use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{PhaseCountdown, TICK_INTERVAL_MS};
use crate::events::Event;
use crate::notify::NotificationDispatcher;

struct ActiveCountdown {
    token: CancellationToken,
    join: JoinHandle<()>,
}

/// Drives a [`PhaseCountdown`] from a one-second interval.
///
/// Only one countdown runs at a time: starting a new one cancels the
/// previous task. Every tick publishes the status line on the event channel
/// and, if configured, refreshes the ongoing status notification.
pub struct CountdownService {
    handle: Handle,
    events: UnboundedSender<Event>,
    dispatcher: Option<Arc<NotificationDispatcher>>,
    active: Option<ActiveCountdown>,
}

impl CountdownService {
    pub fn new(handle: Handle, events: UnboundedSender<Event>) -> Self {
        Self {
            handle,
            events,
            dispatcher: None,
            active: None,
        }
    }

    /// Mirror every status line into the ongoing notification.
    pub fn with_status_notifications(mut self, dispatcher: Arc<NotificationDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| !a.token.is_cancelled() && !a.join.is_finished())
    }

    /// Start in Work with the given durations, replacing any running countdown.
    pub fn start(&mut self, work_minutes: u32, rest_minutes: u32) {
        if self.cancel_active() {
            debug!("replacing running countdown");
        }

        let countdown = PhaseCountdown::new(work_minutes, rest_minutes);
        info!(work_minutes, rest_minutes, "countdown started");

        let token = CancellationToken::new();
        let join = self.handle.spawn(run_countdown(
            countdown,
            token.clone(),
            self.events.clone(),
            self.dispatcher.clone(),
        ));
        self.active = Some(ActiveCountdown { token, join });
    }

    /// Cancel the running countdown. Calling it again is a no-op.
    ///
    /// Returns `Some(Event::CountdownStopped)` only when something was
    /// actually running.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.halt() {
            return None;
        }
        info!("countdown stopped");
        let event = Event::CountdownStopped { at: Utc::now() };
        if self.events.send(event.clone()).is_err() {
            warn!("event receiver dropped; stop event discarded");
        }
        Some(event)
    }

    /// Cancel and take down the status notification.
    fn halt(&mut self) -> bool {
        let was_running = self.cancel_active();
        if was_running {
            if let Some(dispatcher) = &self.dispatcher {
                dispatcher.dismiss_pomodoro_status();
            }
        }
        was_running
    }

    fn cancel_active(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                let was_running = !active.token.is_cancelled() && !active.join.is_finished();
                active.token.cancel();
                was_running
            }
            None => false,
        }
    }
}

impl Drop for CountdownService {
    fn drop(&mut self) {
        self.halt();
    }
}

async fn run_countdown(
    mut countdown: PhaseCountdown,
    token: CancellationToken,
    events: UnboundedSender<Event>,
    dispatcher: Option<Arc<NotificationDispatcher>>,
) {
    let publish = |event: Event| -> bool {
        if let (Some(dispatcher), Event::CountdownTick { status, .. }) = (&dispatcher, &event) {
            // A stopped countdown must not bring its status back.
            if !token.is_cancelled() {
                dispatcher.show_pomodoro_status(status);
            }
        }
        events.send(event).is_ok()
    };

    if token.is_cancelled() {
        return;
    }

    let started = Event::CountdownStarted {
        phase: countdown.phase(),
        work_ms: countdown.work_ms(),
        rest_ms: countdown.rest_ms(),
        at: Utc::now(),
    };
    if !publish(started) {
        return;
    }

    let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately and shows the full duration.
    interval.tick().await;
    if !publish(countdown.status_event()) {
        return;
    }

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                if let Some(changed) = countdown.tick() {
                    debug!(phase = %countdown.phase(), "phase changed");
                    if !publish(changed) {
                        break;
                    }
                }
                if !publish(countdown.status_event()) {
                    break;
                }
            }
        }
    }
}
