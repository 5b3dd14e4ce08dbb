//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A user's budget. There is at most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub total_budget: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for creating or replacing a budget.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub total_budget: Decimal,
}

impl BudgetInput {
    pub fn validate(&self) -> Result<()> {
        if self.total_budget < Decimal::ZERO {
            return Err(Error::invalid_input("Total budget cannot be negative"));
        }
        Ok(())
    }
}

/// A spending category with its own limit, owned by one budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub limit: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetCategory {
    pub id: Option<String>,
    pub name: String,
    pub limit: Decimal,
}

impl NewBudgetCategory {
    pub fn validate(&self) -> Result<()> {
        validate_category_fields(&self.name, self.limit)
    }
}

/// Input model for updating a category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategoryUpdate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub limit: Decimal,
}

impl BudgetCategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_input("Category ID is required for updates"));
        }
        validate_category_fields(&self.name, self.limit)
    }
}

fn validate_category_fields(name: &str, limit: Decimal) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Category name cannot be empty"));
    }
    if limit < Decimal::ZERO {
        return Err(Error::invalid_input("Category limit cannot be negative"));
    }
    Ok(())
}
