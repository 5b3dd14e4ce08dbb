//! Property-based integration tests for goal alert evaluation.
//!
//! Each property replays a sequence of evaluations, feeding the persisted state of
//! one evaluation into the next the way the goal service does.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use familybudget_core::goals::{evaluate_alerts, AlertEvent, Goal};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Generates a goal with random thresholds and partial alert history.
fn arb_goal() -> impl Strategy<Value = Goal> {
    (
        1i64..1_000_000,                                   // target in cents
        proptest::collection::vec(0u32..=100, 0..8),       // alert_percentages
        proptest::collection::btree_set(0u32..=100, 0..4), // alerted_percents
        proptest::option::of(0i64..240),                   // deadline offset in hours
        proptest::option::of(0u32..10),                    // alert_before_days
    )
        .prop_map(|(target, percentages, alerted, deadline_hours, before)| Goal {
            id: "g".to_string(),
            user_id: "u".to_string(),
            title: "Goal".to_string(),
            target_amount: Decimal::new(target, 2),
            current_amount: Decimal::ZERO,
            deadline: deadline_hours.map(|h| base_time() + Duration::hours(h)),
            alert_percentages: percentages,
            alert_before_days: before,
            alerted_percents: alerted,
            last_deadline_alert_date: None,
            created_at: base_time(),
            updated_at: base_time(),
        })
}

/// Contributions in cents, each paired with the minutes elapsed since the previous one.
fn arb_contributions() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((0i64..500_000, 0i64..720), 1..20)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_milestones_never_refire(goal in arb_goal(), steps in arb_contributions()) {
        let mut goal = goal;
        let mut now = base_time();
        let mut seen: BTreeSet<u32> = goal.alerted_percents.clone();

        for (cents, minutes) in steps {
            goal.current_amount += Decimal::new(cents, 2);
            now += Duration::minutes(minutes);

            let evaluation = evaluate_alerts(&goal, now);
            for alert in &evaluation.new_alerts {
                if let AlertEvent::Milestone { percent, .. } = alert {
                    prop_assert!(seen.insert(*percent), "percent {} fired twice", percent);
                }
            }
            prop_assert!(evaluation.alerted_percents.is_superset(&goal.alerted_percents));

            goal.alerted_percents = evaluation.alerted_percents;
            goal.last_deadline_alert_date = evaluation.last_deadline_alert_date;
        }
    }

    #[test]
    fn prop_at_most_one_deadline_alert_per_day(goal in arb_goal(), steps in arb_contributions()) {
        let mut goal = goal;
        let mut now = base_time();
        let mut alert_days: Vec<NaiveDate> = Vec::new();

        for (_, minutes) in steps {
            now += Duration::minutes(minutes);
            let evaluation = evaluate_alerts(&goal, now);
            let deadline_alerts = evaluation
                .new_alerts
                .iter()
                .filter(|a| matches!(a, AlertEvent::Deadline { .. }))
                .count();
            prop_assert!(deadline_alerts <= 1);
            if deadline_alerts == 1 {
                prop_assert!(!alert_days.contains(&now.date()));
                alert_days.push(now.date());
            }
            goal.alerted_percents = evaluation.alerted_percents;
            goal.last_deadline_alert_date = evaluation.last_deadline_alert_date;
        }
    }

    #[test]
    fn prop_deadline_days_left_within_window(goal in arb_goal(), minutes in 0i64..20_000) {
        let now = base_time() + Duration::minutes(minutes);
        let evaluation = evaluate_alerts(&goal, now);
        for alert in &evaluation.new_alerts {
            if let AlertEvent::Deadline { days_left, .. } = alert {
                let before = goal.alert_before_days.map(i64::from);
                prop_assert!(*days_left >= 0);
                prop_assert!(Some(*days_left) <= before);
            }
        }
    }
}
