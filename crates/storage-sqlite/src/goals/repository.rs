use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use familybudget_core::expenses::NewExpense;
use familybudget_core::goals::{
    AlertEvaluator, AlertEvent, ContributionResult, Goal, GoalAlert, GoalRepositoryTrait,
    GoalUpdate, NewGoal,
};
use familybudget_core::{Error, Result};
use log::debug;

use super::model::{percents_to_json, GoalChangesDB, GoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::expenses::insert_expense;
use crate::schema::goals;
use crate::utils::{format_amount, parse_amount};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn load_owned_goal(conn: &mut SqliteConnection, user_id: &str, goal_id: &str) -> Result<GoalDB> {
    goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(user_id))
        .select(GoalDB::as_select())
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(format!("Goal {}", goal_id)))
}

/// Evaluates `goal` as read inside the current write job and stores the new alert
/// state when anything fired.
fn record_evaluation(
    conn: &mut SqliteConnection,
    goal: Goal,
    now: NaiveDateTime,
    evaluate: AlertEvaluator,
) -> Result<(Goal, Vec<AlertEvent>)> {
    let evaluation = evaluate(&goal, now);
    if !evaluation.has_new_alerts() {
        return Ok((goal, evaluation.new_alerts));
    }
    debug!(
        "Goal {} raised {} alert(s)",
        goal.id,
        evaluation.new_alerts.len()
    );

    let updated = diesel::update(goals::table.find(&goal.id))
        .set((
            goals::alerted_percents.eq(percents_to_json(&evaluation.alerted_percents)?),
            goals::last_deadline_alert_date.eq(evaluation.last_deadline_alert_date),
        ))
        .returning(GoalDB::as_returning())
        .get_result(conn)
        .into_core()?;
    Ok((Goal::from(updated), evaluation.new_alerts))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .order(goals::created_at.asc())
            .select(GoalDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let found = goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(found.map(Goal::from))
    }

    async fn insert(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let id = new_goal
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = GoalDB::from_new(new_goal, id, Utc::now().naive_utc())?;
                let inserted = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::from(inserted))
            })
            .await
    }

    async fn update(&self, goal_update: GoalUpdate) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let changes = GoalChangesDB::from_update(&goal_update, Utc::now().naive_utc())?;
                let target = goals::table
                    .filter(goals::id.eq(&goal_update.id))
                    .filter(goals::user_id.eq(&goal_update.user_id));
                let updated = diesel::update(target)
                    .set(&changes)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    async fn apply_contribution(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
        expense: NewExpense,
        now: NaiveDateTime,
        evaluate: AlertEvaluator,
    ) -> Result<ContributionResult> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContributionResult> {
                let current = load_owned_goal(conn, &user_id, &goal_id)?;
                let new_amount = parse_amount(&current.current_amount, "current_amount") + amount;

                let updated = diesel::update(goals::table.find(&goal_id))
                    .set((
                        goals::current_amount.eq(format_amount(new_amount)),
                        goals::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                let recorded = insert_expense(conn, expense)?;
                let (goal, alerts) = record_evaluation(conn, Goal::from(updated), now, evaluate)?;

                Ok(ContributionResult {
                    goal,
                    expense: recorded,
                    alerts,
                })
            })
            .await
    }

    async fn record_alerts(
        &self,
        user_id: &str,
        now: NaiveDateTime,
        evaluate: AlertEvaluator,
    ) -> Result<Vec<GoalAlert>> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<GoalAlert>> {
                let rows = goals::table
                    .filter(goals::user_id.eq(&user_id))
                    .order(goals::created_at.asc())
                    .select(GoalDB::as_select())
                    .load(conn)
                    .into_core()?;

                let mut alerts = Vec::new();
                for row in rows {
                    let (goal, fired) = record_evaluation(conn, Goal::from(row), now, evaluate)?;
                    alerts.extend(fired.into_iter().map(|alert| GoalAlert {
                        goal_id: goal.id.clone(),
                        alert,
                    }));
                }
                Ok(alerts)
            })
            .await
    }
}
