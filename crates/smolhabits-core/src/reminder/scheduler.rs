use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, info};

use super::{next_daily_trigger, quick_trigger, ReminderRequest, ReminderTag, Trigger};
use crate::error::ValidationError;
use crate::events::Event;

/// The host's facility for running one-shot work at a future instant.
pub trait DeferredTaskRunner {
    /// Hand off a request. The runner does not dedup; the scheduler cancels
    /// first.
    fn enqueue(&mut self, request: ReminderRequest);

    /// Cancel the pending task under `tag`. Returns `true` only if a task
    /// was actually pending and is now cancelled.
    fn cancel(&mut self, tag: ReminderTag) -> bool;

    fn is_pending(&self, tag: ReminderTag) -> bool;
}

/// Outcome of a successful schedule call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub request: ReminderRequest,
    /// A pending task under the same tag was cancelled first.
    pub replaced: bool,
}

impl Scheduled {
    pub fn to_event(&self) -> Event {
        Event::ReminderScheduled {
            request_id: self.request.id,
            tag: self.request.tag,
            habit_name: self.request.habit_name.clone(),
            fire_at: self.request.fire_at,
            replaced: self.replaced,
            at: Utc::now(),
        }
    }
}

/// Computes trigger instants and keeps at most one pending task per tag.
pub struct ReminderScheduler<R> {
    runner: R,
}

impl<R: DeferredTaskRunner> ReminderScheduler<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Daily reminder at the next local `hour:minute`.
    pub fn schedule_daily(
        &mut self,
        habit_name: &str,
        hour: u32,
        minute: u32,
    ) -> Result<Scheduled, ValidationError> {
        self.schedule_daily_from(&Local::now(), habit_name, hour, minute)
    }

    /// Same as [`schedule_daily`](Self::schedule_daily) with an explicit clock.
    pub fn schedule_daily_from<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        habit_name: &str,
        hour: u32,
        minute: u32,
    ) -> Result<Scheduled, ValidationError> {
        let fire_at = next_daily_trigger(now, hour, minute)?.with_timezone(&Utc);
        let request = ReminderRequest::new(habit_name, Trigger::At { hour, minute }, fire_at);
        Ok(self.submit(request))
    }

    /// Quick reminder `minutes` from now.
    pub fn schedule_quick(&mut self, habit_name: &str, minutes: u32) -> Scheduled {
        self.schedule_quick_from(&Utc::now(), habit_name, minutes)
    }

    pub fn schedule_quick_from<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        habit_name: &str,
        minutes: u32,
    ) -> Scheduled {
        let fire_at = quick_trigger(now, minutes).with_timezone(&Utc);
        let request = ReminderRequest::new(habit_name, Trigger::After { minutes }, fire_at);
        self.submit(request)
    }

    pub fn cancel(&mut self, tag: ReminderTag) -> bool {
        let cancelled = self.runner.cancel(tag);
        if cancelled {
            info!(%tag, "reminder cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self, tag: ReminderTag) -> bool {
        self.runner.is_pending(tag)
    }

    fn submit(&mut self, request: ReminderRequest) -> Scheduled {
        let replaced = self.runner.cancel(request.tag);
        if replaced {
            debug!(tag = %request.tag, "replacing pending reminder");
        }
        info!(
            tag = %request.tag,
            habit = %request.habit_name,
            fire_at = %request.fire_at,
            "reminder scheduled"
        );
        self.runner.enqueue(request.clone());
        Scheduled { request, replaced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    /// Records every call so ordering can be asserted.
    #[derive(Default)]
    struct RecordingRunner {
        pending: HashMap<ReminderTag, ReminderRequest>,
        log: Vec<String>,
    }

    impl DeferredTaskRunner for RecordingRunner {
        fn enqueue(&mut self, request: ReminderRequest) {
            self.log.push(format!("enqueue {}", request.tag));
            self.pending.insert(request.tag, request);
        }

        fn cancel(&mut self, tag: ReminderTag) -> bool {
            let hit = self.pending.remove(&tag).is_some();
            self.log.push(format!("cancel {tag} {hit}"));
            hit
        }

        fn is_pending(&self, tag: ReminderTag) -> bool {
            self.pending.contains_key(&tag)
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn first_schedule_replaces_nothing() {
        let mut scheduler = ReminderScheduler::new(RecordingRunner::default());
        let scheduled = scheduler
            .schedule_daily_from(&noon(), "Stretch", 18, 0)
            .unwrap();
        assert!(!scheduled.replaced);
        assert_eq!(scheduled.request.habit_name, "Stretch");
        assert_eq!(scheduled.request.tag, ReminderTag::Daily);
        assert!(scheduler.is_pending(ReminderTag::Daily));
    }

    #[test]
    fn same_tag_cancels_before_enqueue() {
        let mut scheduler = ReminderScheduler::new(RecordingRunner::default());
        scheduler.schedule_quick_from(&noon(), "Meditate", 5);
        let second = scheduler.schedule_quick_from(&noon(), "Meditate", 10);

        assert!(second.replaced);
        assert_eq!(
            scheduler.runner().log,
            vec![
                "cancel quick_reminder false",
                "enqueue quick_reminder",
                "cancel quick_reminder true",
                "enqueue quick_reminder",
            ]
        );
        assert_eq!(second.request.fire_at, noon() + Duration::minutes(10));
    }

    #[test]
    fn tags_are_independent() {
        let mut scheduler = ReminderScheduler::new(RecordingRunner::default());
        scheduler.schedule_daily_from(&noon(), "Stretch", 9, 0).unwrap();
        let quick = scheduler.schedule_quick_from(&noon(), "Stretch", 1);
        assert!(!quick.replaced);
        assert!(scheduler.is_pending(ReminderTag::Daily));
        assert!(scheduler.is_pending(ReminderTag::Quick));
    }

    #[test]
    fn invalid_time_leaves_pending_task_alone() {
        let mut scheduler = ReminderScheduler::new(RecordingRunner::default());
        scheduler.schedule_daily_from(&noon(), "Stretch", 9, 0).unwrap();
        let err = scheduler.schedule_daily_from(&noon(), "Stretch", 25, 0);
        assert!(err.is_err());
        assert!(scheduler.is_pending(ReminderTag::Daily));
        assert_eq!(scheduler.runner().log.len(), 2);
    }

    #[test]
    fn explicit_cancel_reports_whether_anything_was_pending() {
        let mut scheduler = ReminderScheduler::new(RecordingRunner::default());
        assert!(!scheduler.cancel(ReminderTag::Daily));
        scheduler.schedule_daily_from(&noon(), "Stretch", 9, 0).unwrap();
        assert!(scheduler.cancel(ReminderTag::Daily));
        assert!(!scheduler.is_pending(ReminderTag::Daily));
    }

    #[test]
    fn scheduled_event_carries_request() {
        let mut scheduler = ReminderScheduler::new(RecordingRunner::default());
        let scheduled = scheduler.schedule_quick_from(&noon(), "Drink Water", 15);
        match scheduled.to_event() {
            Event::ReminderScheduled {
                request_id,
                tag,
                fire_at,
                replaced,
                ..
            } => {
                assert_eq!(request_id, scheduled.request.id);
                assert_eq!(tag, ReminderTag::Quick);
                assert_eq!(fire_at, noon() + Duration::minutes(15));
                assert!(!replaced);
            }
            other => panic!("Expected ReminderScheduled, got {other:?}"),
        }
    }
}
