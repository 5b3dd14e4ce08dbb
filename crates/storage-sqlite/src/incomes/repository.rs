use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use familybudget_core::incomes::{Income, IncomeRepositoryTrait, IncomeUpdate, NewIncome};
use familybudget_core::Result;

use super::model::IncomeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::incomes;
use crate::utils::format_amount;

pub struct IncomeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl IncomeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        IncomeRepository { pool, writer }
    }
}

#[async_trait]
impl IncomeRepositoryTrait for IncomeRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Income>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = incomes::table
            .filter(incomes::user_id.eq(user_id))
            .order(incomes::date.desc())
            .select(IncomeDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Income::from).collect())
    }

    fn list_by_user_in_period(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Income>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = incomes::table
            .filter(incomes::user_id.eq(user_id))
            .filter(incomes::date.ge(start))
            .filter(incomes::date.le(end))
            .order((incomes::date.asc(), incomes::created_at.asc()))
            .select(IncomeDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Income::from).collect())
    }

    async fn insert(&self, new_income: NewIncome) -> Result<Income> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Income> {
                let id = new_income
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = IncomeDB::from_new(new_income, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(incomes::table)
                    .values(&row)
                    .returning(IncomeDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Income::from(inserted))
            })
            .await
    }

    async fn update(&self, income_update: IncomeUpdate) -> Result<Income> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Income> {
                let target = incomes::table
                    .filter(incomes::id.eq(&income_update.id))
                    .filter(incomes::user_id.eq(&income_update.user_id));
                let updated = diesel::update(target)
                    .set((
                        incomes::source.eq(income_update.source.trim()),
                        incomes::amount.eq(format_amount(income_update.amount)),
                        incomes::date.eq(income_update.date),
                        incomes::description.eq(&income_update.description),
                        incomes::recurrence.eq(income_update.recurrence.as_str()),
                        incomes::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(IncomeDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Income::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let income_id = income_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    incomes::table
                        .filter(incomes::id.eq(income_id))
                        .filter(incomes::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
