use chrono::{Days, NaiveDate, TimeZone, Utc};
use mantractl_core::model::PracticeSession;
use mantractl_core::stats::{summarize, ACTIVITY_WINDOW_DAYS};
use proptest::prelude::*;
use uuid::Uuid;

const TODAY: (i32, u32, u32) = (2025, 6, 15);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

// Strategy: a session some number of days back with a bounded positive count
fn arb_session(user_id: Uuid) -> impl Strategy<Value = PracticeSession> {
    (0u64..400, 1i64..10_000, 0u32..24).prop_map(move |(days_ago, count, hour)| {
        let date = today().checked_sub_days(Days::new(days_ago)).unwrap();
        PracticeSession {
            id: Uuid::new_v4(),
            user_id,
            mantra_id: Uuid::new_v4(),
            count,
            recorded_at: Utc.from_utc_datetime(&date.and_hms_opt(hour, 30, 0).unwrap()),
        }
    })
}

proptest! {
    /// Property: total repetitions equal the naive sum regardless of grouping
    #[test]
    fn prop_total_is_exact_sum(sessions in prop::collection::vec(arb_session(Uuid::nil()), 0..100)) {
        let summary = summarize(Uuid::nil(), &[], &sessions, today());

        let expected: i64 = sessions.iter().map(|s| s.count).sum();
        prop_assert_eq!(summary.total_repetitions, expected);
    }

    /// Property: the activity series always has exactly 30 entries ending today
    #[test]
    fn prop_series_shape_is_fixed(sessions in prop::collection::vec(arb_session(Uuid::nil()), 0..100)) {
        let summary = summarize(Uuid::nil(), &[], &sessions, today());

        prop_assert_eq!(summary.daily_activity.len(), ACTIVITY_WINDOW_DAYS as usize);
        prop_assert_eq!(summary.daily_activity.last().unwrap().date, today());
        // Strictly increasing by one day, oldest first
        for pair in summary.daily_activity.windows(2) {
            prop_assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }

    /// Property: active days never exceed the number of sessions
    #[test]
    fn prop_active_days_bounded_by_sessions(sessions in prop::collection::vec(arb_session(Uuid::nil()), 0..100)) {
        let summary = summarize(Uuid::nil(), &[], &sessions, today());

        prop_assert!(summary.active_days <= sessions.len());
    }

    /// Property: the streak is never longer than the distinct-day history
    #[test]
    fn prop_streak_bounded_by_active_days(sessions in prop::collection::vec(arb_session(Uuid::nil()), 0..100)) {
        let summary = summarize(Uuid::nil(), &[], &sessions, today());

        prop_assert!((summary.current_streak as usize) <= summary.active_days);
    }

    /// Property: identical inputs at the same logical today yield identical output
    #[test]
    fn prop_idempotent(sessions in prop::collection::vec(arb_session(Uuid::nil()), 0..50)) {
        let first = summarize(Uuid::nil(), &[], &sessions, today());
        let second = summarize(Uuid::nil(), &[], &sessions, today());
        prop_assert_eq!(first, second);
    }
}
