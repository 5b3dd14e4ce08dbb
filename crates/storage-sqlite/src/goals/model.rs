//! Database models for goals.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{format_amount, parse_amount, parse_percent_list, parse_percent_set};
use familybudget_core::goals::{Goal, GoalUpdate, NewGoal};

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<NaiveDateTime>,
    /// JSON array of percents.
    pub alert_percentages: String,
    pub alert_before_days: Option<i32>,
    /// JSON array of percents that already fired.
    pub alerted_percents: String,
    pub last_deadline_alert_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable goal columns. `None` clears the column.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(treat_none_as_null = true)]
pub struct GoalChangesDB {
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<NaiveDateTime>,
    pub alert_percentages: String,
    pub alert_before_days: Option<i32>,
    pub updated_at: NaiveDateTime,
}

fn days_to_column(days: Option<u32>) -> Option<i32> {
    days.map(|d| i32::try_from(d).unwrap_or(i32::MAX))
}

pub fn percents_to_json<'a>(
    percents: impl IntoIterator<Item = &'a u32>,
) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&percents.into_iter().collect::<Vec<_>>())?)
}

impl GoalDB {
    pub fn from_new(
        domain: NewGoal,
        id: String,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            id,
            user_id: domain.user_id,
            title: domain.title.trim().to_string(),
            target_amount: format_amount(domain.target_amount),
            current_amount: format_amount(domain.current_amount),
            deadline: domain.deadline,
            alert_percentages: percents_to_json(&domain.alert_percentages)?,
            alert_before_days: days_to_column(domain.alert_before_days),
            alerted_percents: percents_to_json(&BTreeSet::new())?,
            last_deadline_alert_date: None,
            created_at: now,
            updated_at: now,
        })
    }
}

impl GoalChangesDB {
    pub fn from_update(domain: &GoalUpdate, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            title: domain.title.trim().to_string(),
            target_amount: format_amount(domain.target_amount),
            current_amount: format_amount(domain.current_amount),
            deadline: domain.deadline,
            alert_percentages: percents_to_json(&domain.alert_percentages)?,
            alert_before_days: days_to_column(domain.alert_before_days),
            updated_at: now,
        })
    }
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            target_amount: parse_amount(&db.target_amount, "target_amount"),
            current_amount: parse_amount(&db.current_amount, "current_amount"),
            alert_percentages: parse_percent_list(&db.alert_percentages, "alert_percentages"),
            alert_before_days: db.alert_before_days.and_then(|d| u32::try_from(d).ok()),
            alerted_percents: parse_percent_set(&db.alerted_percents, "alerted_percents"),
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            deadline: db.deadline,
            last_deadline_alert_date: db.last_deadline_alert_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
