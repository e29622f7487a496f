//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::db::ConnectionOptions;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::OfficeHierarchy;
use crate::pagination::{DEFAULT_LIMIT, MAX_LIMIT, PaginationLimits};

#[derive(Clone, Debug, Deserialize, Validate)]
/// Settings for the search runner.
pub struct AppConfig {
    #[validate(nested)]
    pub database: DatabaseConfig,
    #[serde(default)]
    #[validate(nested)]
    pub pagination: PaginationConfig,
    pub operator: OperatorConfig,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default = "default_true")]
    pub enable_wal: bool,
    /// Seconds to wait on a locked database.
    #[serde(default)]
    pub busy_timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_page_sizes"))]
pub struct PaginationConfig {
    #[validate(range(min = 1))]
    pub default_limit: u64,
    #[validate(range(min = 1))]
    pub max_limit: u64,
}

/// Identity the runner searches as.
#[derive(Clone, Debug, Deserialize)]
pub struct OperatorConfig {
    pub username: String,
    pub tenant: String,
    pub office_hierarchy: OfficeHierarchy,
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn validate_page_sizes(config: &PaginationConfig) -> Result<(), ValidationError> {
    if config.max_limit < config.default_limit {
        return Err(ValidationError::new("max_limit_below_default_limit"));
    }
    Ok(())
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl From<PaginationConfig> for PaginationLimits {
    fn from(config: PaginationConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }
}

impl From<&DatabaseConfig> for ConnectionOptions {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            enable_wal: config.enable_wal,
            busy_timeout: config.busy_timeout_secs.map(Duration::from_secs),
            ..Self::default()
        }
    }
}

impl From<&OperatorConfig> for AuthenticatedUser {
    fn from(config: &OperatorConfig) -> Self {
        Self {
            username: config.username.clone(),
            office_hierarchy: config.office_hierarchy.clone(),
            permissions: config.permissions.clone(),
        }
    }
}
