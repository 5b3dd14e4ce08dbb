//! Savings goals module - domain models, alert evaluation, services, and traits.

mod alert_evaluator;
mod goals_model;
mod goals_service;
mod goals_traits;

pub use alert_evaluator::evaluate_alerts;
pub use goals_model::{
    AlertEvaluation, AlertEvent, ContributionInput, ContributionResult, Goal, GoalAlert,
    GoalUpdate, NewGoal,
};
pub use goals_service::GoalService;
pub use goals_traits::{AlertEvaluator, GoalRepositoryTrait, GoalServiceTrait};
