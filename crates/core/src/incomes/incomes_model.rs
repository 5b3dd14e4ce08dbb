//! Income domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How often an income repeats. Informational only; reports count each record once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    #[default]
    OneTime,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::OneTime => "one-time",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    /// Parses a stored tag, falling back to `OneTime` for unknown values.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "weekly" => Recurrence::Weekly,
            "monthly" => Recurrence::Monthly,
            _ => Recurrence::OneTime,
        }
    }
}

/// Domain model representing an income record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub source: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub recurrence: Recurrence,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new income
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub source: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        validate_income_fields(&self.user_id, &self.source, self.amount)
    }
}

/// Input model for updating an existing income
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IncomeUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub source: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl IncomeUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Income ID is required for updates"));
        }
        validate_income_fields(&self.user_id, &self.source, self.amount)
    }
}

fn validate_income_fields(user_id: &str, source: &str, amount: Decimal) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::invalid_input("User ID cannot be empty"));
    }
    if source.trim().is_empty() {
        return Err(Error::invalid_input("Income source cannot be empty"));
    }
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input("Income amount must be positive"));
    }
    Ok(())
}
