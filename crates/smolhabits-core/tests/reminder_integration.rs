//! Reminder scheduling through the tokio-backed runner.
//!
//! Runs on paused tokio time so minute-long delays elapse instantly.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::RecordingNotifier;
use smolhabits_core::{
    Event, NotificationDispatcher, ReminderScheduler, ReminderTag, ReminderWorker,
    TokioTaskRunner,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::timeout;

fn scheduler() -> (
    ReminderScheduler<TokioTaskRunner>,
    Arc<RecordingNotifier>,
    UnboundedReceiver<Event>,
) {
    let notifier = Arc::new(RecordingNotifier::default());
    let dispatcher = Arc::new(NotificationDispatcher::new(notifier.clone()));
    let (tx, rx) = unbounded_channel();
    let worker = ReminderWorker::new(dispatcher).with_events(tx);
    let runner = TokioTaskRunner::new(Handle::current(), worker);
    (ReminderScheduler::new(runner), notifier, rx)
}

#[tokio::test(start_paused = true)]
async fn quick_reminder_fires_with_habit_name() {
    let (mut scheduler, notifier, mut rx) = scheduler();
    let scheduled = scheduler.schedule_quick("Drink Water", 1);
    assert!(scheduler.is_pending(ReminderTag::Quick));

    match rx.recv().await.unwrap() {
        Event::ReminderFired {
            request_id,
            tag,
            habit_name,
            ..
        } => {
            assert_eq!(request_id, scheduled.request.id);
            assert_eq!(tag, ReminderTag::Quick);
            assert_eq!(habit_name, "Drink Water");
        }
        other => panic!("Expected ReminderFired, got {other:?}"),
    }

    let shown = notifier.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, 1);
    assert_eq!(shown[0].body, "Time to do: Drink Water");
    assert_eq!(notifier.channels(), vec!["habit_reminder_channel"]);

    tokio::task::yield_now().await;
    assert!(!scheduler.is_pending(ReminderTag::Quick));
}

#[tokio::test(start_paused = true)]
async fn rescheduling_same_tag_fires_only_the_latest() {
    let (mut scheduler, notifier, mut rx) = scheduler();
    let first = scheduler.schedule_quick("Stretch", 1);
    let second = scheduler.schedule_quick("Meditate", 2);
    assert!(!first.replaced);
    assert!(second.replaced);

    match rx.recv().await.unwrap() {
        Event::ReminderFired { request_id, .. } => assert_eq!(request_id, second.request.id),
        other => panic!("Expected ReminderFired, got {other:?}"),
    }

    assert!(timeout(Duration::from_secs(3600), rx.recv()).await.is_err());
    assert_eq!(notifier.shown().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn daily_and_quick_do_not_cancel_each_other() {
    let (mut scheduler, _notifier, mut rx) = scheduler();
    scheduler.schedule_daily("Stretch", 9, 0).unwrap();
    let quick = scheduler.schedule_quick("Stretch", 0);
    assert!(!quick.replaced);

    match rx.recv().await.unwrap() {
        Event::ReminderFired { tag, .. } => assert_eq!(tag, ReminderTag::Quick),
        other => panic!("Expected ReminderFired, got {other:?}"),
    }
    assert!(scheduler.is_pending(ReminderTag::Daily));
}

#[tokio::test(start_paused = true)]
async fn cancelled_reminder_never_fires() {
    let (mut scheduler, notifier, mut rx) = scheduler();
    scheduler.schedule_quick("Stretch", 5);
    assert!(scheduler.cancel(ReminderTag::Quick));
    assert!(!scheduler.cancel(ReminderTag::Quick));

    assert!(timeout(Duration::from_secs(3600), rx.recv()).await.is_err());
    assert!(notifier.shown().is_empty());
}

#[tokio::test(start_paused = true)]
async fn fired_reminder_is_not_counted_as_replaced() {
    let (mut scheduler, _notifier, mut rx) = scheduler();
    scheduler.schedule_quick("Stretch", 0);
    rx.recv().await.unwrap();
    tokio::task::yield_now().await;

    let next = scheduler.schedule_quick("Stretch", 1);
    assert!(!next.replaced);
}
