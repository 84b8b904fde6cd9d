//! Property tests for daily trigger computation.

use chrono::{Duration, FixedOffset, TimeZone, Timelike};
use chrono_tz::America::New_York;
use proptest::prelude::*;
use smolhabits_core::reminder::next_daily_trigger;
use smolhabits_core::ValidationError;

proptest! {
    #[test]
    fn past_candidate_moves_exactly_one_day(
        hour in 0u32..24,
        minute in 0u32..60,
        offset_secs in 0i64..(3 * 86_400),
        tz_hours in -12i32..=14,
    ) {
        let tz = FixedOffset::east_opt(tz_hours * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs);

        let same_day = tz
            .from_local_datetime(&now.date_naive().and_hms_opt(hour, minute, 0).unwrap())
            .single()
            .unwrap();
        let at = next_daily_trigger(&now, hour, minute).unwrap();

        if same_day < now {
            prop_assert_eq!(at, same_day + Duration::days(1));
        } else {
            prop_assert_eq!(at, same_day);
        }
        prop_assert!(at >= now);
        prop_assert!(at - now < Duration::days(1));
    }

    #[test]
    fn every_valid_time_gets_a_trigger_across_dst(
        hour in 0u32..24,
        minute in 0u32..60,
        // 2026-03-06 .. 2026-03-10 and 2026-10-30 .. 2026-11-03 around both switches.
        offset_secs in 0i64..(4 * 86_400),
        autumn in any::<bool>(),
    ) {
        let start = if autumn {
            New_York.with_ymd_and_hms(2026, 10, 30, 0, 0, 0).unwrap()
        } else {
            New_York.with_ymd_and_hms(2026, 3, 6, 0, 0, 0).unwrap()
        };
        let now = start + Duration::seconds(offset_secs);

        let at = next_daily_trigger(&now, hour, minute).unwrap();

        prop_assert!(at >= now);
        prop_assert!(at - now <= Duration::hours(25));
        prop_assert_eq!(at.minute(), minute);
        // Only a time skipped by the spring jump moves, and then by one hour.
        prop_assert!(at.hour() == hour || (hour == 2 && at.hour() == 3));
    }

    #[test]
    fn out_of_range_hour_is_rejected(hour in 24u32..1000, minute in 0u32..60) {
        let now = chrono::Utc::now();
        prop_assert_eq!(
            next_daily_trigger(&now, hour, minute),
            Err(ValidationError::HourOutOfRange(hour))
        );
    }

    #[test]
    fn out_of_range_minute_is_rejected(hour in 0u32..24, minute in 60u32..1000) {
        let now = chrono::Utc::now();
        prop_assert_eq!(
            next_daily_trigger(&now, hour, minute),
            Err(ValidationError::MinuteOutOfRange(minute))
        );
    }
}
