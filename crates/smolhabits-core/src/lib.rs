//! # smolhabits Core Library
//!
//! This library provides the core logic for smolhabits, a tiny "one habit a
//! day" helper. The CLI binary is a thin surface over the same library.
//!
//! ## Architecture
//!
//! - **Habit**: immutable habit values with streak/completion bookkeeping
//! - **Reminder Scheduler**: computes trigger instants and hands one-shot
//!   deferred tasks to a runner, one pending task per tag
//! - **Phase Countdown**: a Work/Rest state machine ticked once per second,
//!   plus a tokio-backed service that drives it
//! - **Notification Dispatch**: fixed-id notifications behind a [`Notifier`]
//!   trait implemented by the host
//! - **Session**: the single component that owns the selected habit and the
//!   flags toggled by the user
//!
//! ## Key Components
//!
//! - [`HabitSession`]: owner of all session state
//! - [`ReminderScheduler`]: daily/quick reminder scheduling
//! - [`PhaseCountdown`] / [`CountdownService`]: Work/Rest countdown
//! - [`NotificationDispatcher`]: reminder and status notifications
//! - [`Config`]: TOML configuration

pub mod config;
pub mod countdown;
pub mod error;
pub mod events;
pub mod habit;
pub mod input;
pub mod notify;
pub mod reminder;
pub mod session;

pub use config::Config;
pub use countdown::{format_remaining, CountdownService, Phase, PhaseCountdown, TICK_INTERVAL_MS};
pub use error::{ConfigError, CoreError, NotifyError, Result, ValidationError};
pub use events::Event;
pub use habit::{Habit, HabitTemplates};
pub use notify::{Channel, Importance, LogNotifier, Notification, NotificationDispatcher, Notifier};
pub use reminder::{
    DeferredTaskRunner, ReminderRequest, ReminderScheduler, ReminderTag, ReminderWorker,
    TokioTaskRunner, Trigger,
};
pub use session::HabitSession;
