//! Habit values.
//!
//! A [`Habit`] is never mutated in place. Every edit (activation, completion,
//! new reminder time) produces a fresh value that replaces the old one
//! wholesale in the owning [`crate::HabitSession`].

mod templates;

pub use templates::HabitTemplates;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REMINDER_HOUR: u32 = 9;
pub const DEFAULT_REMINDER_MINUTE: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub total_completions: u32,
    #[serde(default = "default_reminder_hour")]
    pub reminder_hour: u32,
    #[serde(default)]
    pub reminder_minute: u32,
}

fn default_reminder_hour() -> u32 {
    DEFAULT_REMINDER_HOUR
}

impl Habit {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            description: description.into(),
            is_active: false,
            last_completed_date: None,
            current_streak: 0,
            total_completions: 0,
            reminder_hour: DEFAULT_REMINDER_HOUR,
            reminder_minute: DEFAULT_REMINDER_MINUTE,
        }
    }

    /// Copy marked as the active daily focus.
    pub fn activated(&self) -> Self {
        Self {
            is_active: true,
            ..self.clone()
        }
    }

    /// Copy with a new reminder time. Range checks happen in the scheduler.
    pub fn with_reminder(&self, hour: u32, minute: u32) -> Self {
        Self {
            reminder_hour: hour,
            reminder_minute: minute,
            ..self.clone()
        }
    }

    /// Copy reflecting a completion on `date`.
    ///
    /// Completing twice on the same day changes nothing. Completing on the
    /// day after the last completion extends the streak, anything else
    /// restarts it at 1.
    pub fn completed_on(&self, date: NaiveDate) -> Self {
        if self.last_completed_date == Some(date) {
            return self.clone();
        }

        let continues_streak = self
            .last_completed_date
            .and_then(|last| last.succ_opt())
            .is_some_and(|next| next == date);

        Self {
            last_completed_date: Some(date),
            current_streak: if continues_streak {
                self.current_streak.saturating_add(1)
            } else {
                1
            },
            total_completions: self.total_completions.saturating_add(1),
            ..self.clone()
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.last_completed_date == Some(date)
    }

    /// Reminder time as `HH:MM`.
    pub fn reminder_label(&self) -> String {
        format!("{:02}:{:02}", self.reminder_hour, self.reminder_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn new_habit_uses_default_reminder_time() {
        let habit = Habit::new("x", "X", "", "");
        assert_eq!(habit.reminder_label(), "09:00");
        assert!(!habit.is_active);
    }

    #[test]
    fn first_completion_starts_streak() {
        let habit = Habit::new("x", "X", "", "").completed_on(day(1));
        assert_eq!(habit.current_streak, 1);
        assert_eq!(habit.total_completions, 1);
        assert!(habit.is_completed_on(day(1)));
    }

    #[test]
    fn consecutive_days_extend_streak() {
        let habit = Habit::new("x", "X", "", "")
            .completed_on(day(1))
            .completed_on(day(2))
            .completed_on(day(3));
        assert_eq!(habit.current_streak, 3);
        assert_eq!(habit.total_completions, 3);
    }

    #[test]
    fn same_day_completion_is_idempotent() {
        let once = Habit::new("x", "X", "", "").completed_on(day(1));
        let twice = once.completed_on(day(1));
        assert_eq!(once, twice);
    }

    #[test]
    fn gap_resets_streak_but_keeps_total() {
        let habit = Habit::new("x", "X", "", "")
            .completed_on(day(1))
            .completed_on(day(2))
            .completed_on(day(5));
        assert_eq!(habit.current_streak, 1);
        assert_eq!(habit.total_completions, 3);
    }

    #[test]
    fn edits_leave_original_untouched() {
        let original = Habit::new("x", "X", "", "");
        let edited = original.with_reminder(18, 30).activated();
        assert_eq!(original.reminder_label(), "09:00");
        assert!(!original.is_active);
        assert_eq!(edited.reminder_label(), "18:30");
        assert!(edited.is_active);
    }
}
