//! Budget module - a per-user spending ceiling subdivided into categories.

mod budget_model;
mod budget_service;
mod budget_traits;

pub use budget_model::{Budget, BudgetCategory, BudgetCategoryUpdate, BudgetInput, NewBudgetCategory};
pub use budget_service::BudgetService;
pub use budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
