//! Work/Rest phase countdown.
//!
//! [`PhaseCountdown`] is a pure state machine advanced by fixed one-second
//! ticks. It never stops on its own:
//!
//! ```text
//! Work --(remaining hits 0)--> Rest --(remaining hits 0)--> Work --> ...
//! ```
//!
//! [`CountdownService`] drives it from a tokio interval and publishes events.

mod service;

pub use service::CountdownService;

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Fixed tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_REST_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Rest => "Rest",
        }
    }

    pub fn other(&self) -> Phase {
        match self {
            Phase::Work => Phase::Rest,
            Phase::Rest => Phase::Work,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minutes to milliseconds, saturating.
pub fn minutes_to_ms(minutes: u32) -> u64 {
    u64::from(minutes).saturating_mul(60).saturating_mul(1000)
}

/// `MM:SS`. Minutes are not wrapped at 60.
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCountdown {
    phase: Phase,
    remaining_ms: u64,
    work_ms: u64,
    rest_ms: u64,
}

impl PhaseCountdown {
    /// Starts in Work with the full work duration remaining.
    pub fn new(work_minutes: u32, rest_minutes: u32) -> Self {
        Self::from_millis(minutes_to_ms(work_minutes), minutes_to_ms(rest_minutes))
    }

    pub fn from_millis(work_ms: u64, rest_ms: u64) -> Self {
        Self {
            phase: Phase::Work,
            remaining_ms: work_ms,
            work_ms,
            rest_ms,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn work_ms(&self) -> u64 {
        self.work_ms
    }

    pub fn rest_ms(&self) -> u64 {
        self.rest_ms
    }

    pub fn duration_of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_ms,
            Phase::Rest => self.rest_ms,
        }
    }

    pub fn remaining_label(&self) -> String {
        format_remaining(self.remaining_ms)
    }

    /// `"{phase} time left: MM:SS"`.
    pub fn status(&self) -> String {
        format!("{} time left: {}", self.phase, self.remaining_label())
    }

    pub fn status_event(&self) -> Event {
        Event::CountdownTick {
            phase: self.phase,
            remaining_ms: self.remaining_ms,
            status: self.status(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance one tick. Returns `Some(Event::PhaseChanged)` when the
    /// current phase ran out and the other phase started.
    pub fn tick(&mut self) -> Option<Event> {
        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_INTERVAL_MS);
        if self.remaining_ms > 0 {
            return None;
        }

        let from = self.phase;
        self.phase = from.other();
        self.remaining_ms = self.duration_of(self.phase);
        Some(Event::PhaseChanged {
            from,
            to: self.phase,
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }
}

impl Default for PhaseCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_REST_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_n(countdown: &mut PhaseCountdown, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| countdown.tick()).collect()
    }

    #[test]
    fn starts_in_work_with_full_duration() {
        let countdown = PhaseCountdown::new(25, 5);
        assert_eq!(countdown.phase(), Phase::Work);
        assert_eq!(countdown.remaining_label(), "25:00");
        assert_eq!(countdown.status(), "Work time left: 25:00");
    }

    #[test]
    fn work_25_rest_5_flips_after_25_minutes() {
        let mut countdown = PhaseCountdown::new(25, 5);
        let events = tick_n(&mut countdown, 25 * 60 - 1);
        assert!(events.is_empty());
        assert_eq!(countdown.status(), "Work time left: 00:01");

        let flip = countdown.tick();
        assert!(matches!(
            flip,
            Some(Event::PhaseChanged { from: Phase::Work, to: Phase::Rest, remaining_ms: 300_000, .. })
        ));
        assert_eq!(countdown.phase().label(), "Rest");
        assert_eq!(countdown.remaining_label(), "05:00");
    }

    #[test]
    fn alternates_indefinitely() {
        let mut countdown = PhaseCountdown::new(2, 1);
        let events = tick_n(&mut countdown, 3 * 60 * 4);
        let phases: Vec<Phase> = events
            .iter()
            .map(|e| match e {
                Event::PhaseChanged { to, .. } => *to,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                Phase::Rest,
                Phase::Work,
                Phase::Rest,
                Phase::Work,
                Phase::Rest,
                Phase::Work,
                Phase::Rest,
                Phase::Work
            ]
        );
        assert_eq!(countdown.phase(), Phase::Work);
        assert_eq!(countdown.remaining_ms(), 120_000);
    }

    #[test]
    fn zero_length_phase_flips_on_first_tick() {
        let mut countdown = PhaseCountdown::new(0, 1);
        assert!(countdown.tick().is_some());
        assert_eq!(countdown.phase(), Phase::Rest);
        assert_eq!(countdown.remaining_label(), "01:00");
    }

    #[test]
    fn format_does_not_wrap_hours() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59_999), "00:59");
        assert_eq!(format_remaining(65_000), "01:05");
        assert_eq!(format_remaining(minutes_to_ms(90)), "90:00");
        assert_eq!(format_remaining(minutes_to_ms(120)), "120:00");
    }

    #[test]
    fn large_durations_do_not_overflow() {
        assert_eq!(minutes_to_ms(u32::MAX), u64::from(u32::MAX) * 60_000);
    }

    #[test]
    fn status_event_matches_state() {
        let countdown = PhaseCountdown::new(1, 1);
        match countdown.status_event() {
            Event::CountdownTick {
                phase,
                remaining_ms,
                status,
                ..
            } => {
                assert_eq!(phase, Phase::Work);
                assert_eq!(remaining_ms, 60_000);
                assert_eq!(status, "Work time left: 01:00");
            }
            other => panic!("Expected CountdownTick, got {other:?}"),
        }
    }
}
