use std::collections::BTreeSet;

use crate::store::history::PredictionRecord;

/// Achievement flags. Recomputed from the full history, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BadgeId {
    FivePredictions,
    ThreeDayStreak,
    ScoreNinetyPlus,
}

impl BadgeId {
    pub const ALL: [BadgeId; 3] = [
        BadgeId::FivePredictions,
        BadgeId::ThreeDayStreak,
        BadgeId::ScoreNinetyPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BadgeId::FivePredictions => "5 Predictions",
            BadgeId::ThreeDayStreak => "3-Day Streak",
            BadgeId::ScoreNinetyPlus => "Score 90+",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregate {
    pub best: f64,
    pub worst: f64,
    /// Mean of all results, rounded to one decimal.
    pub average: f64,
}

/// Everything the recommendation screen derives from the history log.
/// Ephemeral; callers memoize on the history version.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedMetrics {
    pub aggregate: Option<Aggregate>,
    pub streak_days: u32,
    pub badges: BTreeSet<BadgeId>,
}

impl DerivedMetrics {
    pub fn derive(log: &[PredictionRecord]) -> Self {
        let aggregate = aggregate(log);
        let streak = streak_days(log);
        let badges = badges(log, streak, aggregate.map(|a| a.best));
        Self {
            aggregate,
            streak_days: streak,
            badges,
        }
    }
}

/// Consecutive calendar days with at least one record, counted backward
/// from the most recent entry. Adjacent records extend the streak only when
/// their calendar-day difference is exactly 1, so a second record on the
/// same day stops the walk rather than extending it.
pub fn streak_days(log: &[PredictionRecord]) -> u32 {
    if log.is_empty() {
        return 0;
    }
    let mut streak = 1;
    for pair in log.windows(2).rev() {
        let earlier = pair[0].timestamp.date_naive();
        let later = pair[1].timestamp.date_naive();
        if later.signed_duration_since(earlier).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

pub fn aggregate(log: &[PredictionRecord]) -> Option<Aggregate> {
    if log.is_empty() {
        return None;
    }
    let mut best = f64::MIN;
    let mut worst = f64::MAX;
    let mut sum = 0.0;
    for record in log {
        best = best.max(record.result);
        worst = worst.min(record.result);
        sum += record.result;
    }
    let average = (sum / log.len() as f64 * 10.0).round() / 10.0;
    Some(Aggregate {
        best,
        worst,
        average,
    })
}

pub fn badges(log: &[PredictionRecord], streak: u32, best: Option<f64>) -> BTreeSet<BadgeId> {
    let mut earned = BTreeSet::new();
    if log.len() >= 5 {
        earned.insert(BadgeId::FivePredictions);
    }
    if streak >= 3 {
        earned.insert(BadgeId::ThreeDayStreak);
    }
    if best.is_some_and(|b| b >= 90.0) {
        earned.insert(BadgeId::ScoreNinetyPlus);
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::form::FormSnapshot;
    use chrono::{Duration, TimeZone, Utc};

    fn record(result: f64, day_offset: i64) -> PredictionRecord {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        PredictionRecord {
            input: FormSnapshot::default(),
            result,
            timestamp: base + Duration::days(day_offset),
        }
    }

    #[test]
    fn test_streak_empty_log() {
        assert_eq!(streak_days(&[]), 0);
    }

    #[test]
    fn test_streak_single_record_is_one() {
        assert_eq!(streak_days(&[record(50.0, 0)]), 1);
    }

    #[test]
    fn test_streak_bounded_by_record_count() {
        let log: Vec<_> = (0..7).map(|d| record(60.0, d)).collect();
        assert!(streak_days(&log) <= log.len() as u32);
        assert_eq!(streak_days(&log), 7);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let log = vec![record(60.0, 0), record(60.0, 1), record(60.0, 4)];
        assert_eq!(streak_days(&log), 1);
    }

    #[test]
    fn test_same_day_repeat_does_not_extend() {
        let log = vec![record(60.0, 0), record(70.0, 0)];
        assert_eq!(streak_days(&log), 1);
    }

    #[test]
    fn test_aggregate_empty_is_none() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_aggregate_ordering_invariant() {
        let log = vec![record(73.0, 0), record(12.0, 1), record(99.0, 2)];
        let agg = aggregate(&log).unwrap();
        assert!(agg.worst <= agg.average && agg.average <= agg.best);
        assert!(agg.worst >= 0.0 && agg.best <= 100.0);
    }

    #[test]
    fn test_aggregate_average_rounds_to_one_decimal() {
        let log = vec![record(50.0, 0), record(50.0, 1), record(51.0, 2)];
        let agg = aggregate(&log).unwrap();
        assert_eq!(agg.average, 50.3);
    }

    #[test]
    fn test_five_predictions_flips_at_fifth_append() {
        let mut log: Vec<_> = (0..4).map(|d| record(60.0, d)).collect();
        let metrics = DerivedMetrics::derive(&log);
        assert!(!metrics.badges.contains(&BadgeId::FivePredictions));

        log.push(record(60.0, 4));
        let metrics = DerivedMetrics::derive(&log);
        assert!(metrics.badges.contains(&BadgeId::FivePredictions));
    }

    #[test]
    fn test_score_ninety_plus_uses_best() {
        let log = vec![record(40.0, 0), record(91.0, 1)];
        let metrics = DerivedMetrics::derive(&log);
        assert!(metrics.badges.contains(&BadgeId::ScoreNinetyPlus));
    }

    #[test]
    fn test_three_day_scenario() {
        // results 60/95/40 on consecutive days
        let log = vec![record(60.0, 0), record(95.0, 1), record(40.0, 2)];
        let metrics = DerivedMetrics::derive(&log);
        let agg = metrics.aggregate.unwrap();
        assert_eq!(agg.best, 95.0);
        assert_eq!(agg.worst, 40.0);
        assert_eq!(agg.average, 65.0);
        assert_eq!(metrics.streak_days, 3);
        // 95 also crosses the ninety-plus threshold
        assert_eq!(
            metrics.badges.into_iter().collect::<Vec<_>>(),
            vec![BadgeId::ThreeDayStreak, BadgeId::ScoreNinetyPlus]
        );
    }
}
