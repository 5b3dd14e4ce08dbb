//! SQLite storage implementation for Familybudget.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `familybudget-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through a single writer actor (`WriteHandle`), each job running in an
//! immediate transaction. Reads use pooled connections.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budget;
pub mod expenses;
pub mod goals;
pub mod incomes;
pub mod members;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, ping, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use budget::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use goals::GoalRepository;
pub use incomes::IncomeRepository;
pub use members::MemberRepository;

// Re-export from familybudget-core for convenience
pub use familybudget_core::errors::{DatabaseError, Error, Result};
