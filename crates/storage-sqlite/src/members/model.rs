//! Database models for family members.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{format_amount, parse_optional_amount};
use familybudget_core::members::{Member, MemberRole, NewMember};

/// Database model for members
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MemberDB {
    pub id: String,
    pub name: String,
    pub role: String,
    pub parent_id: Option<String>,
    pub spending_limit: Option<String>,
    pub monthly_cap: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MemberDB {
    pub fn from_new(domain: NewMember, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: domain.name.trim().to_string(),
            role: domain.role.as_str().to_string(),
            parent_id: domain.parent_id,
            spending_limit: domain.spending_limit.map(format_amount),
            monthly_cap: domain.monthly_cap.map(format_amount),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<MemberDB> for Member {
    fn from(db: MemberDB) -> Self {
        Self {
            spending_limit: parse_optional_amount(db.spending_limit.as_deref(), "spending_limit"),
            monthly_cap: parse_optional_amount(db.monthly_cap.as_deref(), "monthly_cap"),
            id: db.id,
            name: db.name,
            role: MemberRole::from_tag(&db.role),
            parent_id: db.parent_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
