use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::budget_model::{
    Budget, BudgetCategory, BudgetCategoryUpdate, BudgetInput, NewBudgetCategory,
};
use super::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }

    fn require_budget(&self, user_id: &str) -> Result<Budget> {
        self.repository
            .get_budget(user_id)?
            .ok_or_else(|| Error::not_found(format!("Budget for user {}", user_id)))
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget(&self, user_id: &str) -> Result<Option<Budget>> {
        self.repository.get_budget(user_id)
    }

    async fn upsert_budget(&self, user_id: &str, input: BudgetInput) -> Result<Budget> {
        input.validate()?;
        self.repository
            .upsert_budget(user_id, input.total_budget)
            .await
    }

    async fn delete_budget(&self, user_id: &str) -> Result<()> {
        let deleted = self.repository.delete_budget(user_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Budget for user {}", user_id)));
        }
        info!("Deleted budget and categories for user {}", user_id);
        Ok(())
    }

    fn get_categories(&self, user_id: &str) -> Result<Vec<BudgetCategory>> {
        match self.repository.get_budget(user_id)? {
            Some(budget) => self.repository.get_categories(&budget.id),
            None => Ok(Vec::new()),
        }
    }

    async fn add_category(
        &self,
        user_id: &str,
        category: NewBudgetCategory,
    ) -> Result<BudgetCategory> {
        category.validate()?;
        let budget = self.require_budget(user_id)?;
        self.repository.insert_category(&budget.id, category).await
    }

    async fn update_category(
        &self,
        user_id: &str,
        category: BudgetCategoryUpdate,
    ) -> Result<BudgetCategory> {
        category.validate()?;
        let budget = self.require_budget(user_id)?;
        self.repository.update_category(&budget.id, category).await
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        let budget = self.require_budget(user_id)?;
        let deleted = self
            .repository
            .delete_category(&budget.id, category_id)
            .await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Category {}", category_id)));
        }
        Ok(())
    }
}
