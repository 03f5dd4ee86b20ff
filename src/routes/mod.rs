pub mod auth;
pub mod denied;
pub mod health;
pub mod stats;
pub mod vote;
