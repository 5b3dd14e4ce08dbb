use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use familybudget_core::members::{ChildLimits, Member, MemberRepositoryTrait, NewMember};
use familybudget_core::Result;

use super::model::MemberDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::members;
use crate::utils::format_amount;

pub struct MemberRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MemberRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MemberRepository { pool, writer }
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    fn find_by_id(&self, member_id: &str) -> Result<Option<Member>> {
        let mut conn = get_connection(&self.pool)?;
        let found = members::table
            .find(member_id)
            .select(MemberDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(found.map(Member::from))
    }

    fn list_children(&self, parent_id: &str) -> Result<Vec<Member>> {
        let mut conn = get_connection(&self.pool)?;
        let children = members::table
            .filter(members::parent_id.eq(parent_id))
            .order(members::created_at.asc())
            .select(MemberDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(children.into_iter().map(Member::from).collect())
    }

    async fn insert(&self, new_member: NewMember) -> Result<Member> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Member> {
                let id = new_member
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = MemberDB::from_new(new_member, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(members::table)
                    .values(&row)
                    .returning(MemberDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Member::from(inserted))
            })
            .await
    }

    async fn update_limits(&self, member_id: &str, limits: ChildLimits) -> Result<Member> {
        let member_id = member_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Member> {
                let updated = diesel::update(members::table.find(member_id))
                    .set((
                        members::spending_limit.eq(limits.spending_limit.map(format_amount)),
                        members::monthly_cap.eq(limits.monthly_cap.map(format_amount)),
                        members::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(MemberDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Member::from(updated))
            })
            .await
    }
}
