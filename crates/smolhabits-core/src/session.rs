//! The single owner of session state.
//!
//! Everything the user toggles (selected habit, "done today", countdown
//! running) lives here and is changed only through these methods. Calls
//! that receive malformed input do nothing and return `None`.

use chrono::{Local, NaiveDate, Utc};
use tracing::debug;

use crate::countdown::{minutes_to_ms, CountdownService, Phase};
use crate::events::Event;
use crate::habit::Habit;
use crate::input::{parse_number, parse_positive};
use crate::reminder::{DeferredTaskRunner, ReminderScheduler, ReminderTag};

pub struct HabitSession<R> {
    habit: Option<Habit>,
    completed_today: bool,
    scheduler: ReminderScheduler<R>,
    countdown: CountdownService,
}

impl<R: DeferredTaskRunner> HabitSession<R> {
    pub fn new(scheduler: ReminderScheduler<R>, countdown: CountdownService) -> Self {
        Self {
            habit: None,
            completed_today: false,
            scheduler,
            countdown,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn habit(&self) -> Option<&Habit> {
        self.habit.as_ref()
    }

    pub fn is_completed_today(&self) -> bool {
        self.completed_today
    }

    pub fn is_pomodoro_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn is_reminder_pending(&self, tag: ReminderTag) -> bool {
        self.scheduler.is_pending(tag)
    }

    // ── Habit ────────────────────────────────────────────────────────

    /// Select a habit as today's focus. Resets the completion flag.
    pub fn select_habit(&mut self, habit: Habit) -> Event {
        let habit = habit.activated();
        let event = Event::HabitSelected {
            habit_id: habit.id.clone(),
            at: Utc::now(),
        };
        self.habit = Some(habit);
        self.completed_today = false;
        event
    }

    pub fn complete_today(&mut self) -> Option<Event> {
        self.complete_on(Local::now().date_naive())
    }

    pub fn complete_on(&mut self, date: NaiveDate) -> Option<Event> {
        let Some(habit) = self.habit.as_ref() else {
            debug!("complete ignored: no habit selected");
            return None;
        };
        let updated = habit.completed_on(date);
        let event = Event::HabitCompleted {
            habit_id: updated.id.clone(),
            current_streak: updated.current_streak,
            total_completions: updated.total_completions,
            at: Utc::now(),
        };
        self.habit = Some(updated);
        self.completed_today = true;
        Some(event)
    }

    pub fn clear_habit(&mut self) -> Option<Event> {
        self.habit.take()?;
        self.completed_today = false;
        Some(Event::HabitCleared { at: Utc::now() })
    }

    // ── Reminders ────────────────────────────────────────────────────

    /// Store a new reminder time on the habit and schedule the daily reminder.
    pub fn set_reminder_time(&mut self, hour_input: &str, minute_input: &str) -> Option<Event> {
        let (Some(hour), Some(minute)) = (parse_number(hour_input), parse_number(minute_input))
        else {
            debug!(hour_input, minute_input, "reminder time ignored: not a number");
            return None;
        };
        let Some(habit) = self.habit.as_ref() else {
            debug!("reminder time ignored: no habit selected");
            return None;
        };

        let scheduled = match self.scheduler.schedule_daily(&habit.name, hour, minute) {
            Ok(scheduled) => scheduled,
            Err(e) => {
                debug!(error = %e, "reminder time ignored");
                return None;
            }
        };
        self.habit = Some(habit.with_reminder(hour, minute));
        Some(scheduled.to_event())
    }

    /// Reminder `minutes_input` minutes from now for the selected habit.
    ///
    /// Without a selection the task still fires, with the placeholder name.
    pub fn quick_reminder(&mut self, minutes_input: &str) -> Option<Event> {
        let Some(minutes) = parse_number(minutes_input) else {
            debug!(minutes_input, "quick reminder ignored: not a number");
            return None;
        };
        let name = self.habit.as_ref().map(|h| h.name.as_str()).unwrap_or("");
        let scheduled = self.scheduler.schedule_quick(name, minutes);
        Some(scheduled.to_event())
    }

    pub fn cancel_reminder(&mut self, tag: ReminderTag) -> Option<Event> {
        self.scheduler
            .cancel(tag)
            .then(|| Event::ReminderCancelled { tag, at: Utc::now() })
    }

    // ── Pomodoro ─────────────────────────────────────────────────────

    pub fn start_pomodoro(&mut self, work_input: &str, rest_input: &str) -> Option<Event> {
        let (Some(work), Some(rest)) = (
            parse_positive(work_input),
            parse_positive(rest_input),
        ) else {
            debug!(work_input, rest_input, "pomodoro ignored: not a positive number");
            return None;
        };
        Some(self.start_pomodoro_minutes(work, rest))
    }

    /// Start (or restart) the countdown. The returned event is the same one
    /// the countdown task publishes first on its channel.
    pub fn start_pomodoro_minutes(&mut self, work_minutes: u32, rest_minutes: u32) -> Event {
        self.countdown.start(work_minutes, rest_minutes);
        Event::CountdownStarted {
            phase: Phase::Work,
            work_ms: minutes_to_ms(work_minutes),
            rest_ms: minutes_to_ms(rest_minutes),
            at: Utc::now(),
        }
    }

    pub fn stop_pomodoro(&mut self) -> Option<Event> {
        self.countdown.stop()
    }
}
