//! Family members module - parents provision children and constrain their spending.

mod members_model;
mod members_service;
mod members_traits;

pub use members_model::{ChildLimits, Member, MemberRole, NewMember};
pub use members_service::MemberService;
pub use members_traits::{MemberRepositoryTrait, MemberServiceTrait};
