use std::sync::Arc;

use log::debug;

use super::report_aggregator::compute_report;
use super::report_export::report_to_csv;
use super::report_model::MonthlyReport;
use super::report_traits::ReportServiceTrait;
use crate::budget::BudgetRepositoryTrait;
use crate::errors::Result;
use crate::expenses::ExpenseRepositoryTrait;
use crate::incomes::IncomeRepositoryTrait;
use crate::utils::time_utils::month_bounds;

pub struct ReportService {
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        ReportService {
            income_repository,
            expense_repository,
            budget_repository,
        }
    }
}

impl ReportServiceTrait for ReportService {
    fn get_monthly_report(&self, user_id: &str, month: &str) -> Result<MonthlyReport> {
        let (start, end) = month_bounds(month)?;

        let incomes = self
            .income_repository
            .list_by_user_in_period(user_id, start, end)?;
        let expenses = self
            .expense_repository
            .list_by_user_in_period(user_id, start, end)?;
        let budget = self.budget_repository.get_budget(user_id)?;
        let categories = match &budget {
            Some(b) => self.budget_repository.get_categories(&b.id)?,
            None => Vec::new(),
        };

        debug!(
            "Report for user {} month {}: {} incomes, {} expenses, {} categories",
            user_id,
            month,
            incomes.len(),
            expenses.len(),
            categories.len()
        );

        Ok(compute_report(
            &incomes,
            &expenses,
            budget.as_ref(),
            &categories,
        ))
    }

    fn export_monthly_report_csv(&self, user_id: &str, month: &str) -> Result<String> {
        let report = self.get_monthly_report(user_id, month)?;
        report_to_csv(&report)
    }
}
