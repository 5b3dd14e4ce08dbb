use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::incomes_model::{Income, IncomeUpdate, NewIncome};
use super::incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
use crate::errors::{Error, Result};

pub struct IncomeService {
    repository: Arc<dyn IncomeRepositoryTrait>,
}

impl IncomeService {
    pub fn new(repository: Arc<dyn IncomeRepositoryTrait>) -> Self {
        IncomeService { repository }
    }
}

#[async_trait]
impl IncomeServiceTrait for IncomeService {
    fn get_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        self.repository.list_by_user(user_id)
    }

    async fn create_income(&self, new_income: NewIncome) -> Result<Income> {
        new_income.validate()?;
        debug!(
            "Creating income for user {} from {}",
            new_income.user_id, new_income.source
        );
        self.repository.insert(new_income).await
    }

    async fn update_income(&self, income_update: IncomeUpdate) -> Result<Income> {
        income_update.validate()?;
        self.repository.update(income_update).await
    }

    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()> {
        let deleted = self.repository.delete(user_id, income_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Income {}", income_id)));
        }
        Ok(())
    }
}
