//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::parse_amount;
use familybudget_core::budget::{Budget, BudgetCategory};

/// Database model for budgets
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub total_budget: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for budget categories
#[derive(
    Queryable, Identifiable, Insertable, Selectable, Associations, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(BudgetDB, foreign_key = budget_id))]
#[diesel(table_name = crate::schema::budget_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetCategoryDB {
    pub id: String,
    pub budget_id: String,
    pub name: String,
    pub spending_limit: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            total_budget: parse_amount(&db.total_budget, "total_budget"),
            id: db.id,
            user_id: db.user_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<BudgetCategoryDB> for BudgetCategory {
    fn from(db: BudgetCategoryDB) -> Self {
        Self {
            limit: parse_amount(&db.spending_limit, "category limit"),
            id: db.id,
            budget_id: db.budget_id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
