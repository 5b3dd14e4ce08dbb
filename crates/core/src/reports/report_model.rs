//! Report domain models. Reports are computed on demand and never persisted.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// Total income minus the budget ceiling.
    pub balance: Decimal,
    pub summary: ReportSummary,
    /// Spending per budget category, in category order.
    #[serde(rename = "budgets")]
    pub categories: Vec<CategorySpending>,
    /// Incomes and expenses, newest first.
    pub transactions: Vec<ReportTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_income: Decimal,
    pub total_budget: Decimal,
    pub total_expenses: Decimal,
    /// Total income minus total expenses.
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub name: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// One entry of the unified transaction feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReportTransaction {
    Income {
        amount: Decimal,
        source: String,
        description: Option<String>,
        date: NaiveDateTime,
    },
    Expense {
        amount: Decimal,
        category: String,
        description: Option<String>,
        #[serde(rename = "paymentMethod")]
        payment_method: Option<String>,
        date: NaiveDateTime,
    },
}

impl ReportTransaction {
    pub fn date(&self) -> NaiveDateTime {
        match self {
            ReportTransaction::Income { date, .. } | ReportTransaction::Expense { date, .. } => {
                *date
            }
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            ReportTransaction::Income { amount, .. }
            | ReportTransaction::Expense { amount, .. } => *amount,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReportTransaction::Income { .. } => "income",
            ReportTransaction::Expense { .. } => "expense",
        }
    }
}
