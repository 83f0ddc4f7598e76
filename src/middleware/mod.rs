//! Request middleware for identity and admin gating

mod admin;
mod auth;

pub use admin::*;
pub use auth::*;
