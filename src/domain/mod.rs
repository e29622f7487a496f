//! Domain types exposed by the search layer.

pub mod auth;
pub mod criteria;
pub mod savings_account;
pub mod types;
