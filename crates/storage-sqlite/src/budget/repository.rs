use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use familybudget_core::budget::{
    Budget, BudgetCategory, BudgetCategoryUpdate, BudgetRepositoryTrait, NewBudgetCategory,
};
use familybudget_core::Result;

use super::model::{BudgetCategoryDB, BudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{budget_categories, budgets};
use crate::utils::format_amount;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, user_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let found = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .select(BudgetDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(found.map(Budget::from))
    }

    async fn upsert_budget(&self, user_id: &str, total_budget: Decimal) -> Result<Budget> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().naive_utc();
                let total = format_amount(total_budget);
                let row = BudgetDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: user_id.clone(),
                    total_budget: total.clone(),
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(budgets::table)
                    .values(&row)
                    .on_conflict(budgets::user_id)
                    .do_update()
                    .set((
                        budgets::total_budget.eq(total),
                        budgets::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .into_core()?;

                let stored = budgets::table
                    .filter(budgets::user_id.eq(user_id))
                    .select(BudgetDB::as_select())
                    .first(conn)
                    .into_core()?;
                Ok(Budget::from(stored))
            })
            .await
    }

    async fn delete_budget(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(budgets::table.filter(budgets::user_id.eq(user_id)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_categories(&self, budget_id: &str) -> Result<Vec<BudgetCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budget_categories::table
            .filter(budget_categories::budget_id.eq(budget_id))
            .order(budget_categories::created_at.asc())
            .select(BudgetCategoryDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BudgetCategory::from).collect())
    }

    async fn insert_category(
        &self,
        budget_id: &str,
        category: NewBudgetCategory,
    ) -> Result<BudgetCategory> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetCategory> {
                let now = Utc::now().naive_utc();
                let row = BudgetCategoryDB {
                    id: category.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    budget_id,
                    name: category.name.trim().to_string(),
                    spending_limit: format_amount(category.limit),
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(budget_categories::table)
                    .values(&row)
                    .returning(BudgetCategoryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(BudgetCategory::from(inserted))
            })
            .await
    }

    async fn update_category(
        &self,
        budget_id: &str,
        category: BudgetCategoryUpdate,
    ) -> Result<BudgetCategory> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetCategory> {
                let target = budget_categories::table
                    .filter(budget_categories::id.eq(&category.id))
                    .filter(budget_categories::budget_id.eq(&budget_id));
                let updated = diesel::update(target)
                    .set((
                        budget_categories::name.eq(category.name.trim()),
                        budget_categories::spending_limit.eq(format_amount(category.limit)),
                        budget_categories::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(BudgetCategoryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(BudgetCategory::from(updated))
            })
            .await
    }

    async fn delete_category(&self, budget_id: &str, category_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    budget_categories::table
                        .filter(budget_categories::id.eq(category_id))
                        .filter(budget_categories::budget_id.eq(budget_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
