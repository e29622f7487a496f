//! Diesel row models and configuration structures.

pub mod config;
pub mod savings_account;
