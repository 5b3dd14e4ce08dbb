use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::incomes::incomes_model::{Income, IncomeUpdate, NewIncome};

/// Trait for income repository operations
#[async_trait]
pub trait IncomeRepositoryTrait: Send + Sync {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Income>>;
    /// Incomes dated within `[start, end]` (inclusive), oldest first.
    fn list_by_user_in_period(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Income>>;
    async fn insert(&self, new_income: NewIncome) -> Result<Income>;
    async fn update(&self, income_update: IncomeUpdate) -> Result<Income>;
    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize>;
}

/// Trait for income service operations
#[async_trait]
pub trait IncomeServiceTrait: Send + Sync {
    fn get_incomes(&self, user_id: &str) -> Result<Vec<Income>>;
    async fn create_income(&self, new_income: NewIncome) -> Result<Income>;
    async fn update_income(&self, income_update: IncomeUpdate) -> Result<Income>;
    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()>;
}
