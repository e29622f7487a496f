//! Caller identity handed to the search pipeline by the transport layer.

use serde::{Deserialize, Serialize};

use crate::domain::types::OfficeHierarchy;
use crate::{ALL_FUNCTIONS_PERMISSION, ALL_FUNCTIONS_READ_PERMISSION};

/// Already authenticated user on whose behalf a search runs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    /// Hierarchy of the office the user belongs to; scopes every search.
    pub office_hierarchy: OfficeHierarchy,
    pub permissions: Vec<String>,
}

/// Per-request context passed explicitly through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant: String,
    pub user: AuthenticatedUser,
}

impl RequestContext {
    pub fn new(tenant: impl Into<String>, user: AuthenticatedUser) -> Self {
        Self {
            tenant: tenant.into(),
            user,
        }
    }
}

/// Returns `true` when `permissions` grant `required` for a read operation.
pub fn check_read_permission(required: &str, permissions: &[String]) -> bool {
    permissions.iter().any(|p| {
        p == required || p == ALL_FUNCTIONS_PERMISSION || p == ALL_FUNCTIONS_READ_PERMISSION
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn exact_permission_is_granted() {
        assert!(check_read_permission(
            "READ_SAVINGSACCOUNT",
            &perms(&["READ_CLIENT", "READ_SAVINGSACCOUNT"])
        ));
    }

    #[test]
    fn blanket_permissions_are_granted() {
        assert!(check_read_permission("READ_SAVINGSACCOUNT", &perms(&["ALL_FUNCTIONS"])));
        assert!(check_read_permission(
            "READ_SAVINGSACCOUNT",
            &perms(&["ALL_FUNCTIONS_READ"])
        ));
    }

    #[test]
    fn unrelated_permissions_are_denied() {
        assert!(!check_read_permission(
            "READ_SAVINGSACCOUNT",
            &perms(&["READ_LOAN", "CREATE_SAVINGSACCOUNT"])
        ));
        assert!(!check_read_permission("READ_SAVINGSACCOUNT", &[]));
    }
}
