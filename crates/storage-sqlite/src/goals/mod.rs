//! SQLite storage implementation for savings goals.

mod model;
mod repository;

pub use model::{GoalChangesDB, GoalDB};
pub use repository::GoalRepository;
