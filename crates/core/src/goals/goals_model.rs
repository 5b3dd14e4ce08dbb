//! Goals domain models.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_ALERT_PERCENT;
use crate::expenses::Expense;
use crate::{Error, Result};

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDateTime>,
    /// Milestone thresholds in percent, in the order they should be reported.
    pub alert_percentages: Vec<u32>,
    /// Warning window before the deadline, in days.
    pub alert_before_days: Option<u32>,
    /// Thresholds that have already fired. They never fire again.
    pub alerted_percents: BTreeSet<u32>,
    pub last_deadline_alert_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Saved share of the target, floored to a whole percent. Zero when the target is not positive.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current_amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(self.target_amount))
            .unwrap_or(Decimal::MAX)
            .floor()
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub alert_percentages: Vec<u32>,
    pub alert_before_days: Option<u32>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_goal_fields(
            &self.user_id,
            &self.title,
            self.target_amount,
            self.current_amount,
            &self.alert_percentages,
        )
    }
}

/// Input model for updating a goal. Alert history is left untouched.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub alert_percentages: Vec<u32>,
    pub alert_before_days: Option<u32>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Goal ID is required for updates"));
        }
        validate_goal_fields(
            &self.user_id,
            &self.title,
            self.target_amount,
            self.current_amount,
            &self.alert_percentages,
        )
    }
}

fn validate_goal_fields(
    user_id: &str,
    title: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    alert_percentages: &[u32],
) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::invalid_input("User ID cannot be empty"));
    }
    if title.trim().is_empty() {
        return Err(Error::invalid_input("Goal title cannot be empty"));
    }
    if target_amount <= Decimal::ZERO {
        return Err(Error::invalid_input("Target amount must be positive"));
    }
    if current_amount < Decimal::ZERO {
        return Err(Error::invalid_input("Current amount cannot be negative"));
    }
    if let Some(p) = alert_percentages.iter().find(|p| **p > MAX_ALERT_PERCENT) {
        return Err(Error::invalid_input(format!(
            "Alert percentage {} is outside 0..={}",
            p, MAX_ALERT_PERCENT
        )));
    }
    Ok(())
}

/// Request body for a contribution
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ContributionInput {
    pub amount: Decimal,
}

/// A single alert raised by an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AlertEvent {
    Milestone {
        percent: u32,
        message: String,
    },
    Deadline {
        #[serde(rename = "daysLeft")]
        days_left: i64,
        message: String,
    },
}

/// An alert tagged with the goal it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalAlert {
    pub goal_id: String,
    #[serde(flatten)]
    pub alert: AlertEvent,
}

/// Outcome of evaluating one goal: the alerts to raise now and the state to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvaluation {
    pub new_alerts: Vec<AlertEvent>,
    pub alerted_percents: BTreeSet<u32>,
    pub last_deadline_alert_date: Option<NaiveDateTime>,
}

impl AlertEvaluation {
    pub fn has_new_alerts(&self) -> bool {
        !self.new_alerts.is_empty()
    }
}

/// Response of a contribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionResult {
    pub goal: Goal,
    pub expense: Expense,
    pub alerts: Vec<AlertEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_goal() -> NewGoal {
        NewGoal {
            id: None,
            user_id: "u1".to_string(),
            title: "Bike".to_string(),
            target_amount: dec!(1000),
            current_amount: Decimal::ZERO,
            deadline: None,
            alert_percentages: vec![25, 50, 100],
            alert_before_days: None,
        }
    }

    #[test]
    fn test_new_goal_validation() {
        assert!(new_goal().validate().is_ok());

        let zero_target = NewGoal {
            target_amount: Decimal::ZERO,
            ..new_goal()
        };
        assert!(zero_target.validate().is_err());

        let negative_current = NewGoal {
            current_amount: dec!(-1),
            ..new_goal()
        };
        assert!(negative_current.validate().is_err());

        let bad_percent = NewGoal {
            alert_percentages: vec![50, 101],
            ..new_goal()
        };
        assert!(bad_percent.validate().is_err());

        let blank_title = NewGoal {
            title: "  ".to_string(),
            ..new_goal()
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_new_goal_defaults_from_json() {
        let goal: NewGoal =
            serde_json::from_str(r#"{"title":"Trip","targetAmount":300}"#).unwrap();
        assert_eq!(goal.current_amount, Decimal::ZERO);
        assert!(goal.alert_percentages.is_empty());
        assert!(goal.user_id.is_empty());
    }

    #[test]
    fn test_alert_event_wire_shape() {
        let alert = GoalAlert {
            goal_id: "g1".to_string(),
            alert: AlertEvent::Deadline {
                days_left: 3,
                message: "\"Bike\" is due in 3 day(s)".to_string(),
            },
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["goalId"], "g1");
        assert_eq!(json["kind"], "deadline");
        assert_eq!(json["daysLeft"], 3);

        let milestone = serde_json::to_value(AlertEvent::Milestone {
            percent: 50,
            message: String::new(),
        })
        .unwrap();
        assert_eq!(milestone["kind"], "milestone");
        assert_eq!(milestone["percent"], 50);
    }
}
