use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::budget::budget_model::{
    Budget, BudgetCategory, BudgetCategoryUpdate, BudgetInput, NewBudgetCategory,
};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, user_id: &str) -> Result<Option<Budget>>;
    async fn upsert_budget(&self, user_id: &str, total_budget: Decimal) -> Result<Budget>;
    /// Deletes the user's budget together with its categories.
    async fn delete_budget(&self, user_id: &str) -> Result<usize>;

    fn get_categories(&self, budget_id: &str) -> Result<Vec<BudgetCategory>>;
    async fn insert_category(
        &self,
        budget_id: &str,
        category: NewBudgetCategory,
    ) -> Result<BudgetCategory>;
    async fn update_category(
        &self,
        budget_id: &str,
        category: BudgetCategoryUpdate,
    ) -> Result<BudgetCategory>;
    async fn delete_category(&self, budget_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget(&self, user_id: &str) -> Result<Option<Budget>>;
    async fn upsert_budget(&self, user_id: &str, input: BudgetInput) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str) -> Result<()>;

    fn get_categories(&self, user_id: &str) -> Result<Vec<BudgetCategory>>;
    async fn add_category(
        &self,
        user_id: &str,
        category: NewBudgetCategory,
    ) -> Result<BudgetCategory>;
    async fn update_category(
        &self,
        user_id: &str,
        category: BudgetCategoryUpdate,
    ) -> Result<BudgetCategory>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
