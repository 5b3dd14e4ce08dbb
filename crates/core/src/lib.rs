//! Familybudget Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for family budgeting: incomes,
//! expenses, budgets with categories, monthly reports, savings goals and
//! member spending limits. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod budget;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod members;
pub mod reports;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
