//! Reminder scheduling.
//!
//! Two modes share one pipeline:
//!
//! - **daily**: the next occurrence of a wall-clock `hour:minute`, tagged
//!   `daily_reminder`
//! - **quick**: `now + minutes`, tagged `quick_reminder`
//!
//! The scheduler computes the trigger instant, cancels whatever is pending
//! under the same tag, and hands a one-shot [`ReminderRequest`] to a
//! [`DeferredTaskRunner`]. When the task fires, a [`ReminderWorker`] turns
//! the payload into a notification.

mod runner;
mod scheduler;
mod worker;

pub use runner::TokioTaskRunner;
pub use scheduler::{DeferredTaskRunner, ReminderScheduler, Scheduled};
pub use worker::{ReminderWorker, PLACEHOLDER_HABIT_NAME};

use std::fmt;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Dedup tag. At most one pending reminder exists per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderTag {
    #[serde(rename = "daily_reminder")]
    Daily,
    #[serde(rename = "quick_reminder")]
    Quick,
}

impl ReminderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderTag::Daily => "daily_reminder",
            ReminderTag::Quick => "quick_reminder",
        }
    }

    pub fn all() -> &'static [ReminderTag] {
        &[ReminderTag::Daily, ReminderTag::Quick]
    }
}

impl fmt::Display for ReminderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the caller expressed the trigger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Trigger {
    /// Wall-clock time of day.
    At { hour: u32, minute: u32 },
    /// Relative delay from the moment of scheduling.
    After { minutes: u32 },
}

impl Trigger {
    pub fn tag(&self) -> ReminderTag {
        match self {
            Trigger::At { .. } => ReminderTag::Daily,
            Trigger::After { .. } => ReminderTag::Quick,
        }
    }
}

/// A one-shot deferred task carrying the habit name as its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub id: Uuid,
    pub habit_name: String,
    pub tag: ReminderTag,
    pub trigger: Trigger,
    pub fire_at: DateTime<Utc>,
}

impl ReminderRequest {
    pub fn new(habit_name: impl Into<String>, trigger: Trigger, fire_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_name: habit_name.into(),
            tag: trigger.tag(),
            trigger,
            fire_at,
        }
    }

    /// Time left until the request fires, zero if already due.
    pub fn delay_from(&self, now: DateTime<Utc>) -> std::time::Duration {
        (self.fire_at - now).to_std().unwrap_or_default()
    }
}

pub fn validate_time_of_day(hour: u32, minute: u32) -> Result<(), ValidationError> {
    if hour > 23 {
        return Err(ValidationError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ValidationError::MinuteOutOfRange(minute));
    }
    Ok(())
}

/// Next occurrence of `hour:minute:00` at or after `now`, in `now`'s zone.
///
/// A candidate strictly before `now` is moved to the same wall-clock time on
/// the following day. Ambiguous local times resolve to the earlier instant.
/// A time inside a DST gap is read with the offset in force before the gap,
/// so 02:30 on a spring-forward night becomes 03:30.
pub fn next_daily_trigger<Tz: TimeZone>(
    now: &DateTime<Tz>,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Tz>, ValidationError> {
    validate_time_of_day(hour, minute)?;

    let tz = now.timezone();
    let today = now.date_naive();
    let at_today = local_instant(&tz, today, hour, minute);
    if at_today >= *now {
        return Ok(at_today);
    }

    today
        .succ_opt()
        .map(|tomorrow| local_instant(&tz, tomorrow, hour, minute))
        .ok_or(ValidationError::DateOutOfRange {
            date: today,
            hour,
            minute,
        })
}

/// `now + minutes`.
pub fn quick_trigger<Tz: TimeZone>(now: &DateTime<Tz>, minutes: u32) -> DateTime<Tz> {
    now.clone() + Duration::minutes(i64::from(minutes))
}

/// Callers validate `hour`/`minute` first.
fn local_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN)
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute));
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Gaps never recur within a day, so a day earlier is before it.
            let before = tz
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix();
            let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}
