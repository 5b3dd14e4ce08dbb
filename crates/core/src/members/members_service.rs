use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::members_model::{ChildLimits, Member, MemberRole, NewMember};
use super::members_traits::{MemberRepositoryTrait, MemberServiceTrait};
use crate::errors::{Error, Result};

pub struct MemberService {
    repository: Arc<dyn MemberRepositoryTrait>,
}

impl MemberService {
    pub fn new(repository: Arc<dyn MemberRepositoryTrait>) -> Self {
        MemberService { repository }
    }

    fn require_parent(&self, parent_id: &str) -> Result<Member> {
        let parent = self.get_member(parent_id)?;
        if parent.role != MemberRole::Parent {
            return Err(Error::ConstraintViolation(format!(
                "Member {} is not a parent",
                parent_id
            )));
        }
        Ok(parent)
    }
}

#[async_trait]
impl MemberServiceTrait for MemberService {
    fn get_member(&self, member_id: &str) -> Result<Member> {
        self.repository
            .find_by_id(member_id)?
            .ok_or_else(|| Error::not_found(format!("Member {}", member_id)))
    }

    fn get_children(&self, parent_id: &str) -> Result<Vec<Member>> {
        self.require_parent(parent_id)?;
        self.repository.list_children(parent_id)
    }

    async fn create_member(&self, new_member: NewMember) -> Result<Member> {
        new_member.validate()?;
        // Top-level members are always parents; children go through `add_child`.
        let member = NewMember {
            role: MemberRole::Parent,
            parent_id: None,
            spending_limit: None,
            monthly_cap: None,
            ..new_member
        };
        self.repository.insert(member).await
    }

    async fn add_child(&self, parent_id: &str, new_child: NewMember) -> Result<Member> {
        new_child.validate()?;
        self.require_parent(parent_id)?;
        let child = NewMember {
            role: MemberRole::Child,
            parent_id: Some(parent_id.to_string()),
            ..new_child
        };
        let created = self.repository.insert(child).await?;
        info!("Parent {} provisioned child member {}", parent_id, created.id);
        Ok(created)
    }

    async fn set_child_limits(
        &self,
        parent_id: &str,
        child_id: &str,
        limits: ChildLimits,
    ) -> Result<Member> {
        limits.validate()?;
        self.require_parent(parent_id)?;
        let child = self.get_member(child_id)?;
        if child.parent_id.as_deref() != Some(parent_id) {
            return Err(Error::not_found(format!(
                "Child {} of member {}",
                child_id, parent_id
            )));
        }
        self.repository.update_limits(child_id, limits).await
    }
}
