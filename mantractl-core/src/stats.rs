//! Statistics aggregation over a user's mantras and practice sessions.
//!
//! Single-shot pure computation: both collections are fetched up front by
//! the caller, and "today" is passed in explicitly, so results are
//! deterministic and testable without clock mocking. Re-run on every
//! request; no state is carried between calls.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::model::{Mantra, PracticeSession};

/// Number of calendar days covered by [`StatsSummary::daily_activity`].
pub const ACTIVITY_WINDOW_DAYS: u64 = 30;

/// Per-day repetition total for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: i64,
}

/// Derived statistics for one user. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    /// Sum of `count` across all sessions.
    pub total_repetitions: i64,
    /// Number of mantra records.
    pub total_mantras: usize,
    /// Distinct calendar days with at least one session, over the full
    /// history (may exceed the activity window).
    pub active_days: usize,
    /// Consecutive active days ending at today, or at yesterday when today
    /// has no activity yet. Exactly one grace day, never two.
    pub current_streak: u32,
    /// Exactly [`ACTIVITY_WINDOW_DAYS`] entries, oldest first, the last
    /// entry being `today`. Days without sessions carry a zero count.
    pub daily_activity: Vec<DayActivity>,
}

/// Aggregate statistics for the user identified by `scope`.
///
/// Upstream fetches are expected to be user-scoped already; any record whose
/// owning user differs is ignored here as a second line of defense rather
/// than trusted. Orphaned sessions (mantra deleted out from under them)
/// still count toward totals.
pub fn summarize(
    scope: Uuid,
    mantras: &[Mantra],
    sessions: &[PracticeSession],
    today: NaiveDate,
) -> StatsSummary {
    let total_mantras = mantras.iter().filter(|m| m.user_id == scope).count();

    let mut skipped = 0usize;
    let mut total_repetitions: i64 = 0;
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for session in sessions {
        if session.user_id != scope {
            skipped += 1;
            continue;
        }
        total_repetitions += session.count;
        *per_day.entry(session.day()).or_insert(0) += session.count;
    }
    if skipped > 0 {
        tracing::warn!(scope = %scope, skipped, "ignoring sessions outside user scope");
    }

    let active: BTreeSet<NaiveDate> = per_day.keys().copied().collect();

    StatsSummary {
        total_repetitions,
        total_mantras,
        active_days: active.len(),
        current_streak: current_streak(&active, today),
        daily_activity: daily_activity(&per_day, today),
    }
}

/// Consecutive-day streak ending at `today` or, with one day of grace,
/// yesterday. The gate is the most recent active day: if it is neither
/// today nor yesterday (older history, or a future-dated session), the
/// streak is zero.
fn current_streak(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&most_recent) = active.iter().next_back() else {
        return 0;
    };

    let anchor = if most_recent == today {
        today
    } else if today.pred_opt() == Some(most_recent) {
        most_recent
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut day = anchor;
    while active.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Fixed-size zero-filled series for the window ending at `today`.
fn daily_activity(per_day: &BTreeMap<NaiveDate, i64>, today: NaiveDate) -> Vec<DayActivity> {
    (0..ACTIVITY_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DayActivity {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn at_noon(date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
    }

    fn mantra(user_id: Uuid, goal: i64) -> Mantra {
        let now = at_noon(today());
        Mantra {
            id: Uuid::new_v4(),
            user_id,
            title: "morning round".into(),
            text: "om mani padme hum".into(),
            goal,
            created_at: now,
            updated_at: now,
        }
    }

    /// Session `days_ago` days before the fixed test date.
    fn session(user_id: Uuid, days_ago: u64, count: i64) -> PracticeSession {
        let date = today().checked_sub_days(Days::new(days_ago)).unwrap();
        PracticeSession {
            id: Uuid::new_v4(),
            user_id,
            mantra_id: Uuid::new_v4(),
            count,
            recorded_at: at_noon(date),
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let user = Uuid::new_v4();
        let summary = summarize(user, &[], &[], today());

        assert_eq!(summary.total_repetitions, 0);
        assert_eq!(summary.total_mantras, 0);
        assert_eq!(summary.active_days, 0);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.daily_activity.len(), 30);
        assert!(summary.daily_activity.iter().all(|d| d.count == 0));
    }

    #[test]
    fn totals_are_exact_sums() {
        let user = Uuid::new_v4();
        let mantras = vec![mantra(user, 20), mantra(user, 108)];
        let sessions = vec![
            session(user, 0, 5),
            session(user, 0, 8),
            session(user, 3, 21),
        ];

        let summary = summarize(user, &mantras, &sessions, today());
        assert_eq!(summary.total_repetitions, 34);
        assert_eq!(summary.total_mantras, 2);
    }

    #[test]
    fn active_days_counts_distinct_days_over_full_history() {
        let user = Uuid::new_v4();
        // 40 distinct days, two sessions on one of them.
        let mut sessions: Vec<_> = (0..40).map(|d| session(user, d, 1)).collect();
        sessions.push(session(user, 7, 2));

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.active_days, 40);
        assert!(summary.active_days > summary.daily_activity.len());
    }

    #[test]
    fn streak_counts_consecutive_days_ending_today() {
        let user = Uuid::new_v4();
        // Active today, -1, -2; gap at -3; older activity at -4 must not count.
        let sessions = vec![
            session(user, 0, 1),
            session(user, 1, 1),
            session(user, 2, 1),
            session(user, 4, 1),
        ];

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.current_streak, 3);
    }

    #[test]
    fn grace_day_keeps_streak_alive() {
        let user = Uuid::new_v4();
        // Nothing today, but a run ending yesterday.
        let sessions = vec![session(user, 1, 1), session(user, 2, 1), session(user, 3, 1)];

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.current_streak, 3);
    }

    #[test]
    fn exactly_one_grace_day() {
        let user = Uuid::new_v4();
        // Most recent activity two days ago: outside the grace window.
        let sessions = vec![session(user, 2, 1), session(user, 3, 1)];

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.current_streak, 0);
    }

    #[test]
    fn future_dated_activity_resets_streak() {
        let user = Uuid::new_v4();
        // Most recent active day is tomorrow: neither today nor yesterday.
        let tomorrow = today().succ_opt().unwrap();
        let sessions = vec![
            session(user, 0, 1),
            PracticeSession {
                recorded_at: at_noon(tomorrow),
                ..session(user, 0, 1)
            },
        ];

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.current_streak, 0);
    }

    #[test]
    fn gap_resets_streak_regardless_of_history() {
        let user = Uuid::new_v4();
        let sessions: Vec<_> = (5..100).map(|d| session(user, d, 1)).collect();

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.active_days, 95);
    }

    #[test]
    fn daily_activity_window_shape() {
        let user = Uuid::new_v4();
        let sessions = vec![
            session(user, 0, 5),
            session(user, 0, 8),
            session(user, 29, 4),
            // Outside the window: contributes to totals, not the series.
            session(user, 30, 100),
        ];

        let summary = summarize(user, &[], &sessions, today());
        let series = &summary.daily_activity;

        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap().date, today());
        assert_eq!(series.last().unwrap().count, 13);
        assert_eq!(series.first().unwrap().date, today() - Days::new(29));
        assert_eq!(series.first().unwrap().count, 4);
        assert!(series.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
        assert_eq!(summary.total_repetitions, 117);
    }

    #[test]
    fn same_day_sessions_accumulate_in_series() {
        // Mantra goal 20, counts 5 and 8 on the same day: the day reads 13.
        let user = Uuid::new_v4();
        let mantras = vec![mantra(user, 20)];
        let sessions = vec![session(user, 4, 5), session(user, 4, 8)];

        let summary = summarize(user, &mantras, &sessions, today());
        let day = today() - Days::new(4);
        let entry = summary
            .daily_activity
            .iter()
            .find(|d| d.date == day)
            .unwrap();
        assert_eq!(entry.count, 13);
        assert_eq!(summary.total_repetitions, 13);
    }

    #[test]
    fn out_of_scope_records_are_ignored() {
        let user = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let mantras = vec![mantra(user, 10), mantra(intruder, 10)];
        let sessions = vec![session(user, 0, 2), session(intruder, 0, 50)];

        let summary = summarize(user, &mantras, &sessions, today());
        assert_eq!(summary.total_mantras, 1);
        assert_eq!(summary.total_repetitions, 2);
        assert_eq!(summary.daily_activity.last().unwrap().count, 2);
    }

    #[test]
    fn orphaned_sessions_still_count() {
        // mantra_id points nowhere; the aggregator must not care.
        let user = Uuid::new_v4();
        let sessions = vec![session(user, 0, 7)];

        let summary = summarize(user, &[], &sessions, today());
        assert_eq!(summary.total_repetitions, 7);
        assert_eq!(summary.current_streak, 1);
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        let user = Uuid::new_v4();
        let mantras = vec![mantra(user, 20)];
        let sessions = vec![session(user, 0, 5), session(user, 1, 8), session(user, 9, 3)];

        let first = summarize(user, &mantras, &sessions, today());
        let second = summarize(user, &mantras, &sessions, today());
        assert_eq!(first, second);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let user = Uuid::new_v4();
        let sessions = vec![session(user, 0, 5)];
        let before = sessions.clone();

        let _ = summarize(user, &[], &sessions, today());
        assert_eq!(sessions, before);
    }
}
