pub mod conversation;
pub mod customer;
pub mod dialogue;
pub mod plan;
