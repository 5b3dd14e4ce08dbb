//! Database models for incomes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{format_amount, parse_amount};
use familybudget_core::incomes::{Income, NewIncome, Recurrence};

/// Database model for incomes
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::incomes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IncomeDB {
    pub id: String,
    pub user_id: String,
    pub source: String,
    pub amount: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub recurrence: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl IncomeDB {
    pub fn from_new(domain: NewIncome, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id: domain.user_id,
            source: domain.source.trim().to_string(),
            amount: format_amount(domain.amount),
            date: domain.date,
            description: domain.description,
            recurrence: domain.recurrence.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<IncomeDB> for Income {
    fn from(db: IncomeDB) -> Self {
        Self {
            amount: parse_amount(&db.amount, "income amount"),
            recurrence: Recurrence::from_tag(&db.recurrence),
            id: db.id,
            user_id: db.user_id,
            source: db.source,
            date: db.date,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
