use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use crate::members::Member;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Expense>>;
    /// Expenses dated within `[start, end]` (inclusive), oldest first.
    fn list_by_user_in_period(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>>;
    /// Inserts `new_expense`. A `child` member's spending limit and monthly cap are
    /// checked against the stored month total inside the same write transaction.
    async fn insert(&self, new_expense: NewExpense, child: Option<Member>) -> Result<Expense>;
    /// Updates an expense. The expense itself is left out of the month total.
    async fn update(&self, expense_update: ExpenseUpdate, child: Option<Member>)
        -> Result<Expense>;
    async fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
}
