//! Database models for expenses.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{format_amount, parse_amount};
use familybudget_core::expenses::{Expense, NewExpense};

/// Database model for expenses
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub payment_method: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ExpenseDB {
    pub fn from_new(domain: NewExpense, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id: domain.user_id,
            category_id: domain.category_id,
            amount: format_amount(domain.amount),
            description: domain.description,
            date: domain.date,
            payment_method: domain.payment_method,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            amount: parse_amount(&db.amount, "expense amount"),
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            description: db.description,
            date: db.date,
            payment_method: db.payment_method,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
