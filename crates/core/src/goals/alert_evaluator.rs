//! Milestone and deadline alerting for savings goals.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::goals_model::{AlertEvaluation, AlertEvent, Goal};
use crate::utils::time_utils::{days_until_ceil, is_same_calendar_day};

/// Computes the alerts a goal should raise at `now` and the alert state to persist afterwards.
///
/// Milestones fire in configured order, at most once per threshold over the goal's lifetime.
/// A deadline alert fires at most once per calendar day while the deadline lies within
/// `alert_before_days`.
pub fn evaluate_alerts(goal: &Goal, now: NaiveDateTime) -> AlertEvaluation {
    let mut new_alerts = Vec::new();
    let mut alerted_percents = goal.alerted_percents.clone();

    for &percent in &goal.alert_percentages {
        if alerted_percents.contains(&percent) || !milestone_reached(goal, percent) {
            continue;
        }
        alerted_percents.insert(percent);
        new_alerts.push(AlertEvent::Milestone {
            percent,
            message: format!("Reached {}% for \"{}\"", percent, goal.title),
        });
    }

    let mut last_deadline_alert_date = goal.last_deadline_alert_date;
    if let (Some(deadline), Some(before_days)) = (goal.deadline, goal.alert_before_days) {
        let days_left = days_until_ceil(now, deadline);
        let in_window = (0..=i64::from(before_days)).contains(&days_left);
        let already_today = goal
            .last_deadline_alert_date
            .is_some_and(|last| is_same_calendar_day(last, now));

        if in_window && !already_today {
            new_alerts.push(AlertEvent::Deadline {
                days_left,
                message: format!("\"{}\" is due in {} day(s)", goal.title, days_left),
            });
            last_deadline_alert_date = Some(now);
        }
    }

    AlertEvaluation {
        new_alerts,
        alerted_percents,
        last_deadline_alert_date,
    }
}

/// `floor(current / target * 100) >= percent`, compared without dividing.
fn milestone_reached(goal: &Goal, percent: u32) -> bool {
    if goal.target_amount <= Decimal::ZERO {
        return percent == 0;
    }
    let threshold = Decimal::from(percent);
    match (
        goal.current_amount.checked_mul(Decimal::ONE_HUNDRED),
        goal.target_amount.checked_mul(threshold),
    ) {
        (Some(scaled_current), Some(scaled_target)) => scaled_current >= scaled_target,
        _ => goal.progress_percent() >= threshold,
    }
}
