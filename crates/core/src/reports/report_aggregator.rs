//! Monthly report aggregation.
//!
//! Pure computation over records the caller has already narrowed to one user
//! and one calendar month. Nothing here touches storage.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::report_model::{CategorySpending, MonthlyReport, ReportSummary, ReportTransaction};
use crate::budget::{Budget, BudgetCategory};
use crate::constants::UNCATEGORIZED_LABEL;
use crate::expenses::Expense;
use crate::incomes::Income;

/// Builds the monthly report.
///
/// Categories are reported only when a budget exists. The transaction feed lists
/// incomes before expenses and is then stably sorted newest first, so entries with
/// the same timestamp keep that order.
pub fn compute_report(
    incomes: &[Income],
    expenses: &[Expense],
    budget: Option<&Budget>,
    categories: &[BudgetCategory],
) -> MonthlyReport {
    let total_income: Decimal = incomes.iter().map(|i| i.amount).sum();
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
    let total_budget = budget.map(|b| b.total_budget).unwrap_or(Decimal::ZERO);

    let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
    for expense in expenses {
        if let Some(category_id) = expense.category_id.as_deref() {
            *spent_by_category.entry(category_id).or_insert(Decimal::ZERO) += expense.amount;
        }
    }

    let category_report = if budget.is_some() {
        categories
            .iter()
            .map(|category| {
                let spent = spent_by_category
                    .get(category.id.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                CategorySpending {
                    name: category.name.clone(),
                    limit: category.limit,
                    spent,
                    remaining: category.limit - spent,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let category_names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut transactions: Vec<ReportTransaction> =
        Vec::with_capacity(incomes.len() + expenses.len());
    transactions.extend(incomes.iter().map(|income| ReportTransaction::Income {
        amount: income.amount,
        source: income.source.clone(),
        description: income.description.clone(),
        date: income.date,
    }));
    transactions.extend(expenses.iter().map(|expense| {
        let category = expense
            .category_id
            .as_deref()
            .and_then(|id| category_names.get(id).copied())
            .unwrap_or(UNCATEGORIZED_LABEL);
        ReportTransaction::Expense {
            amount: expense.amount,
            category: category.to_string(),
            description: expense.description.clone(),
            payment_method: expense.payment_method.clone(),
            date: expense.date,
        }
    }));
    // `sort_by` is stable.
    transactions.sort_by(|a, b| b.date().cmp(&a.date()));

    MonthlyReport {
        balance: total_income - total_budget,
        summary: ReportSummary {
            total_income,
            total_budget,
            total_expenses,
            remaining: total_income - total_expenses,
        },
        categories: category_report,
        transactions,
    }
}
