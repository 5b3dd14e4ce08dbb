use async_trait::async_trait;

use crate::errors::Result;
use crate::members::members_model::{ChildLimits, Member, NewMember};

/// Trait for member repository operations
#[async_trait]
pub trait MemberRepositoryTrait: Send + Sync {
    fn find_by_id(&self, member_id: &str) -> Result<Option<Member>>;
    fn list_children(&self, parent_id: &str) -> Result<Vec<Member>>;
    async fn insert(&self, new_member: NewMember) -> Result<Member>;
    async fn update_limits(&self, member_id: &str, limits: ChildLimits) -> Result<Member>;
}

/// Trait for member service operations
#[async_trait]
pub trait MemberServiceTrait: Send + Sync {
    fn get_member(&self, member_id: &str) -> Result<Member>;
    fn get_children(&self, parent_id: &str) -> Result<Vec<Member>>;
    async fn create_member(&self, new_member: NewMember) -> Result<Member>;
    async fn add_child(&self, parent_id: &str, new_child: NewMember) -> Result<Member>;
    async fn set_child_limits(
        &self,
        parent_id: &str,
        child_id: &str,
        limits: ChildLimits,
    ) -> Result<Member>;
}
