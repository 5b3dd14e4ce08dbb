use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::errors::{Error, Result};
use crate::members::{Member, MemberRepositoryTrait};

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    member_repository: Arc<dyn MemberRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        member_repository: Arc<dyn MemberRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            repository,
            member_repository,
        }
    }

    /// The member behind `user_id` when spending constraints apply to them.
    fn constrained_member(&self, user_id: &str) -> Result<Option<Member>> {
        Ok(self
            .member_repository
            .find_by_id(user_id)?
            .filter(|member| member.is_child()))
    }
}

fn log_rejection(user_id: &str, err: &Error) {
    if let Error::ConstraintViolation(reason) = err {
        warn!("Rejected expense for child member {}: {}", user_id, reason);
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.repository.list_by_user(user_id)
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;
        let user_id = new_expense.user_id.clone();
        let child = self.constrained_member(&user_id)?;
        debug!(
            "Creating expense of {} for user {}",
            new_expense.amount, user_id
        );
        self.repository
            .insert(new_expense, child)
            .await
            .inspect_err(|e| log_rejection(&user_id, e))
    }

    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        expense_update.validate()?;
        let user_id = expense_update.user_id.clone();
        let child = self.constrained_member(&user_id)?;
        self.repository
            .update(expense_update, child)
            .await
            .inspect_err(|e| log_rejection(&user_id, e))
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        let deleted = self.repository.delete(user_id, expense_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Expense {}", expense_id)));
        }
        Ok(())
    }
}
