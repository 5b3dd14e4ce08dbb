//! Expense domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Domain model representing an expense record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    /// Budget category the expense is filed under; `None` reports as uncategorized.
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub payment_method: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub payment_method: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        validate_expense_fields(&self.user_id, self.amount)
    }
}

/// Input model for updating an existing expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub payment_method: Option<String>,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Expense ID is required for updates"));
        }
        validate_expense_fields(&self.user_id, self.amount)
    }
}

fn validate_expense_fields(user_id: &str, amount: Decimal) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::invalid_input("User ID cannot be empty"));
    }
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input("Expense amount must be positive"));
    }
    Ok(())
}
