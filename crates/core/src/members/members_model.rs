//! Member domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Parent,
    Child,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Parent => "parent",
            MemberRole::Child => "child",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        if tag == "child" {
            MemberRole::Child
        } else {
            MemberRole::Parent
        }
    }
}

/// A family member. Children carry the spending constraints set by their parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: MemberRole,
    pub parent_id: Option<String>,
    /// Largest single expense the member may record.
    pub spending_limit: Option<Decimal>,
    /// Largest total of expenses the member may record in one calendar month.
    pub monthly_cap: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Member {
    pub fn is_child(&self) -> bool {
        self.role == MemberRole::Child
    }

    /// Checks whether a new expense of `amount` fits this member's constraints,
    /// given what they have already spent in the expense's month.
    pub fn check_spending(&self, amount: Decimal, spent_this_month: Decimal) -> Result<()> {
        if !self.is_child() {
            return Ok(());
        }
        if let Some(limit) = self.spending_limit {
            if amount > limit {
                return Err(Error::ConstraintViolation(format!(
                    "Expense of {} exceeds the spending limit of {} for {}",
                    amount, limit, self.name
                )));
            }
        }
        if let Some(cap) = self.monthly_cap {
            if spent_this_month + amount > cap {
                return Err(Error::ConstraintViolation(format!(
                    "Expense of {} would exceed the monthly cap of {} for {} ({} already spent)",
                    amount, cap, self.name, spent_this_month
                )));
            }
        }
        Ok(())
    }
}

/// Input model for creating a member
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub spending_limit: Option<Decimal>,
    #[serde(default)]
    pub monthly_cap: Option<Decimal>,
}

impl NewMember {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("Member name cannot be empty"));
        }
        ChildLimits {
            spending_limit: self.spending_limit,
            monthly_cap: self.monthly_cap,
        }
        .validate()
    }
}

/// Spending constraints a parent sets on a child.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildLimits {
    pub spending_limit: Option<Decimal>,
    pub monthly_cap: Option<Decimal>,
}

impl ChildLimits {
    pub fn validate(&self) -> Result<()> {
        if self.spending_limit.is_some_and(|l| l < Decimal::ZERO) {
            return Err(Error::invalid_input("Spending limit cannot be negative"));
        }
        if self.monthly_cap.is_some_and(|c| c < Decimal::ZERO) {
            return Err(Error::invalid_input("Monthly cap cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn child(limit: Option<Decimal>, cap: Option<Decimal>) -> Member {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Member {
            id: "kid".to_string(),
            name: "Sam".to_string(),
            role: MemberRole::Child,
            parent_id: Some("mom".to_string()),
            spending_limit: limit,
            monthly_cap: cap,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_parent_is_never_constrained() {
        let mut parent = child(Some(dec!(1)), Some(dec!(1)));
        parent.role = MemberRole::Parent;
        assert!(parent.check_spending(dec!(500), dec!(500)).is_ok());
    }

    #[test]
    fn test_spending_limit_is_inclusive() {
        let kid = child(Some(dec!(20)), None);
        assert!(kid.check_spending(dec!(20), dec!(0)).is_ok());
        assert!(matches!(
            kid.check_spending(dec!(20.01), dec!(0)),
            Err(Error::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_monthly_cap_counts_prior_spending() {
        let kid = child(None, Some(dec!(100)));
        assert!(kid.check_spending(dec!(40), dec!(60)).is_ok());
        assert!(matches!(
            kid.check_spending(dec!(41), dec!(60)),
            Err(Error::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_negative_limits_are_rejected() {
        let limits = ChildLimits {
            spending_limit: Some(dec!(-1)),
            monthly_cap: None,
        };
        assert!(limits.validate().is_err());
    }
}
