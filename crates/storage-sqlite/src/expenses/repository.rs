use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use familybudget_core::expenses::{Expense, ExpenseRepositoryTrait, ExpenseUpdate, NewExpense};
use familybudget_core::members::Member;
use familybudget_core::utils::time_utils::month_window_for;
use familybudget_core::Result;

use super::model::ExpenseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::expenses;
use crate::utils::{format_amount, parse_amount};

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

/// Inserts an expense on the caller's connection. Shared with the goal contribution job.
pub(crate) fn insert_expense(conn: &mut SqliteConnection, new_expense: NewExpense) -> Result<Expense> {
    let id = new_expense
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let row = ExpenseDB::from_new(new_expense, id, Utc::now().naive_utc());
    let inserted = diesel::insert_into(expenses::table)
        .values(&row)
        .returning(ExpenseDB::as_returning())
        .get_result(conn)
        .into_core()?;
    Ok(Expense::from(inserted))
}

/// Checks `child`'s limits against the month total read on the writer's connection.
/// Must run in the same write job as the insert or update it guards.
fn check_child_spending(
    conn: &mut SqliteConnection,
    child: Option<&Member>,
    user_id: &str,
    amount: Decimal,
    date: NaiveDateTime,
    replacing: Option<&str>,
) -> Result<()> {
    let Some(child) = child else {
        return Ok(());
    };
    let (start, end) = month_window_for(date)?;
    let rows: Vec<(String, String)> = expenses::table
        .filter(expenses::user_id.eq(user_id))
        .filter(expenses::date.ge(start))
        .filter(expenses::date.le(end))
        .select((expenses::id, expenses::amount))
        .load(conn)
        .into_core()?;
    let spent: Decimal = rows
        .iter()
        .filter(|(id, _)| replacing != Some(id.as_str()))
        .map(|(_, amount)| parse_amount(amount, "amount"))
        .sum();
    child.check_spending(amount, spent)
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .order(expenses::date.desc())
            .select(ExpenseDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn list_by_user_in_period(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .filter(expenses::date.ge(start))
            .filter(expenses::date.le(end))
            .order((expenses::date.asc(), expenses::created_at.asc()))
            .select(ExpenseDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn insert(&self, new_expense: NewExpense, child: Option<Member>) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                check_child_spending(
                    conn,
                    child.as_ref(),
                    &new_expense.user_id,
                    new_expense.amount,
                    new_expense.date,
                    None,
                )?;
                insert_expense(conn, new_expense)
            })
            .await
    }

    async fn update(
        &self,
        expense_update: ExpenseUpdate,
        child: Option<Member>,
    ) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                check_child_spending(
                    conn,
                    child.as_ref(),
                    &expense_update.user_id,
                    expense_update.amount,
                    expense_update.date,
                    Some(&expense_update.id),
                )?;
                let target = expenses::table
                    .filter(expenses::id.eq(&expense_update.id))
                    .filter(expenses::user_id.eq(&expense_update.user_id));
                let updated = diesel::update(target)
                    .set((
                        expenses::category_id.eq(&expense_update.category_id),
                        expenses::amount.eq(format_amount(expense_update.amount)),
                        expenses::description.eq(&expense_update.description),
                        expenses::date.eq(expense_update.date),
                        expenses::payment_method.eq(&expense_update.payment_method),
                        expenses::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Expense::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    expenses::table
                        .filter(expenses::id.eq(expense_id))
                        .filter(expenses::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
