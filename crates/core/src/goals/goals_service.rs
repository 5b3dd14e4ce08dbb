use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info};
use rust_decimal::Decimal;

use super::alert_evaluator::evaluate_alerts;
use super::goals_model::{ContributionResult, Goal, GoalAlert, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::constants::CONTRIBUTION_DESCRIPTION_PREFIX;
use crate::errors::{Error, Result};
use crate::expenses::NewExpense;

pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.repository.list_by_user(user_id)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.repository
            .get_by_id(user_id, goal_id)?
            .ok_or_else(|| Error::not_found(format!("Goal {}", goal_id)))
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        self.repository.insert(new_goal).await
    }

    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;
        self.repository.update(goal_update).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let deleted = self.repository.delete(user_id, goal_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Goal {}", goal_id)));
        }
        Ok(())
    }

    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
        now: NaiveDateTime,
    ) -> Result<ContributionResult> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Contribution amount must be positive"));
        }
        let goal = self.get_goal(user_id, goal_id)?;

        let expense = NewExpense {
            id: None,
            user_id: user_id.to_string(),
            category_id: None,
            amount,
            description: Some(format!(
                "{}: {}",
                CONTRIBUTION_DESCRIPTION_PREFIX, goal.title
            )),
            date: now,
            payment_method: None,
        };
        let result = self
            .repository
            .apply_contribution(user_id, goal_id, amount, expense, now, evaluate_alerts)
            .await?;
        info!(
            "Contributed {} to goal {} (now {} of {}, {} alert(s))",
            amount,
            result.goal.id,
            result.goal.current_amount,
            result.goal.target_amount,
            result.alerts.len()
        );
        Ok(result)
    }

    async fn check_alerts(&self, user_id: &str, now: NaiveDateTime) -> Result<Vec<GoalAlert>> {
        let alerts = self
            .repository
            .record_alerts(user_id, now, evaluate_alerts)
            .await?;
        if !alerts.is_empty() {
            debug!("User {} raised {} goal alert(s)", user_id, alerts.len());
        }
        Ok(alerts)
    }
}
