use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::countdown::Phase;
use crate::reminder::ReminderTag;

/// Every state change in the system produces an Event.
/// The CLI renders them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    HabitSelected {
        habit_id: String,
        at: DateTime<Utc>,
    },
    HabitCompleted {
        habit_id: String,
        current_streak: u32,
        total_completions: u32,
        at: DateTime<Utc>,
    },
    HabitCleared {
        at: DateTime<Utc>,
    },
    ReminderScheduled {
        request_id: Uuid,
        tag: ReminderTag,
        habit_name: String,
        fire_at: DateTime<Utc>,
        /// A pending reminder with the same tag was cancelled first.
        replaced: bool,
        at: DateTime<Utc>,
    },
    ReminderCancelled {
        tag: ReminderTag,
        at: DateTime<Utc>,
    },
    ReminderFired {
        request_id: Uuid,
        tag: ReminderTag,
        habit_name: String,
        at: DateTime<Utc>,
    },
    CountdownStarted {
        phase: Phase,
        work_ms: u64,
        rest_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownTick {
        phase: Phase,
        remaining_ms: u64,
        status: String,
        at: DateTime<Utc>,
    },
    /// Remaining time hit zero and the countdown flipped to the other phase.
    PhaseChanged {
        from: Phase,
        to: Phase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownStopped {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short human-readable line for terminal output.
    pub fn describe(&self) -> String {
        match self {
            Event::HabitSelected { habit_id, .. } => format!("selected habit '{habit_id}'"),
            Event::HabitCompleted {
                habit_id,
                current_streak,
                total_completions,
                ..
            } => format!(
                "completed '{habit_id}' (streak {current_streak}, total {total_completions})"
            ),
            Event::HabitCleared { .. } => "habit cleared".into(),
            Event::ReminderScheduled {
                tag,
                habit_name,
                fire_at,
                replaced,
                ..
            } => {
                let local = fire_at.with_timezone(&chrono::Local);
                let suffix = if *replaced { " (replaced previous)" } else { "" };
                format!(
                    "{tag} for '{habit_name}' at {}{suffix}",
                    local.format("%Y-%m-%d %H:%M:%S")
                )
            }
            Event::ReminderCancelled { tag, .. } => format!("{tag} cancelled"),
            Event::ReminderFired { habit_name, .. } => format!("Time to do: {habit_name}"),
            Event::CountdownStarted { phase, .. } => format!("countdown started in {phase}"),
            Event::CountdownTick { status, .. } => status.clone(),
            Event::PhaseChanged { from, to, .. } => format!("{from} finished, {to} begins"),
            Event::CountdownStopped { .. } => "countdown stopped".into(),
        }
    }
}
