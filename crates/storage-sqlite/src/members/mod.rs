//! SQLite storage implementation for family members.

mod model;
mod repository;

pub use model::MemberDB;
pub use repository::MemberRepository;
