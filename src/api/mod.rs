//! Access to the external voting REST API.

pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError, IssuedSession};
