use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::expenses::NewExpense;
use crate::goals::goals_model::{
    AlertEvaluation, ContributionResult, Goal, GoalAlert, GoalUpdate, NewGoal,
};

/// Alert evaluation handed to the repository so it runs against the goal row read
/// inside the write transaction.
pub type AlertEvaluator = fn(&Goal, NaiveDateTime) -> AlertEvaluation;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>>;
    async fn insert(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update(&self, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize>;

    /// Adds `amount` to the goal, records `expense`, evaluates alerts on the updated row
    /// and stores any new alert state, all in one transaction.
    async fn apply_contribution(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
        expense: NewExpense,
        now: NaiveDateTime,
        evaluate: AlertEvaluator,
    ) -> Result<ContributionResult>;

    /// Evaluates every goal of `user_id` and stores the alert state of those that fired
    /// in one transaction. Either every fired alert is recorded and returned, or none is.
    async fn record_alerts(
        &self,
        user_id: &str,
        now: NaiveDateTime,
        evaluate: AlertEvaluator,
    ) -> Result<Vec<GoalAlert>>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
        now: NaiveDateTime,
    ) -> Result<ContributionResult>;
    async fn check_alerts(&self, user_id: &str, now: NaiveDateTime) -> Result<Vec<GoalAlert>>;
}
