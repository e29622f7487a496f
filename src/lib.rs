//! Savings-account search core.
//!
//! Raw filter parameters flow through [`services::criteria`] validation, are
//! composed into a parameterized statement by [`repository::query`] and are
//! executed page by page through the Diesel-backed [`repository`].

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod services;

/// Permission required to read savings accounts.
pub const SAVINGS_ACCOUNT_READ_PERMISSION: &str = "READ_SAVINGSACCOUNT";
/// Blanket permission granting every function.
pub const ALL_FUNCTIONS_PERMISSION: &str = "ALL_FUNCTIONS";
/// Blanket permission granting every read function.
pub const ALL_FUNCTIONS_READ_PERMISSION: &str = "ALL_FUNCTIONS_READ";
