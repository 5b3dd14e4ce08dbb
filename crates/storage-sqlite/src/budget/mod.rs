//! SQLite storage implementation for budgets and their categories.

mod model;
mod repository;

pub use model::{BudgetCategoryDB, BudgetDB};
pub use repository::BudgetRepository;
