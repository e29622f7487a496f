//! Strongly-typed value objects used by domain entities.
//!
//! Identifiers read back from storage must be positive, and office hierarchy
//! paths must be well formed before they scope a search.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Office hierarchy path is not of the form `.1.2.`.
    #[error("invalid office hierarchy: {0}")]
    InvalidHierarchy(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(SavingsAccountId, "Unique identifier for a savings account.");
id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(GroupId, "Unique identifier for a client group.");
id_newtype!(ProductId, "Unique identifier for a savings product.");
id_newtype!(StaffId, "Unique identifier for a staff member.");
id_newtype!(OfficeId, "Unique identifier for an office.");

/// Dot-delimited path of an office inside the organisation tree.
///
/// The head office is `.`, its children `.1.`, `.2.` and so on. Every office
/// below a node shares that node's path as a prefix, which is what search
/// scoping relies on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct OfficeHierarchy(String);

impl OfficeHierarchy {
    /// Trims and validates a hierarchy path.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        let well_formed = trimmed.starts_with('.')
            && trimmed.ends_with('.')
            && !trimmed.contains("..")
            && trimmed.chars().all(|c| c == '.' || c.is_ascii_digit());
        if !well_formed {
            return Err(TypeConstraintError::InvalidHierarchy(trimmed));
        }

        Ok(Self(trimmed))
    }

    /// Borrow the path as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `LIKE` pattern matching this office and every office below it.
    pub fn prefix_pattern(&self) -> String {
        format!("{}%", self.0)
    }
}

impl Display for OfficeHierarchy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OfficeHierarchy {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OfficeHierarchy {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OfficeHierarchy> for String {
    fn from(value: OfficeHierarchy) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(
            SavingsAccountId::new(0),
            Err(TypeConstraintError::NonPositiveId)
        );
        assert_eq!(ClientId::new(-4), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(OfficeId::new(7).map(OfficeId::get), Ok(7));
    }

    #[test]
    fn hierarchy_accepts_head_office_and_nested_paths() {
        assert!(OfficeHierarchy::new(".").is_ok());
        assert!(OfficeHierarchy::new(".1.").is_ok());
        assert_eq!(OfficeHierarchy::new(" .1.12. ").unwrap().as_str(), ".1.12.");
    }

    #[test]
    fn hierarchy_rejects_malformed_paths() {
        assert_eq!(OfficeHierarchy::new("  "), Err(TypeConstraintError::EmptyString));
        assert!(matches!(
            OfficeHierarchy::new("1.2."),
            Err(TypeConstraintError::InvalidHierarchy(_))
        ));
        assert!(OfficeHierarchy::new(".1").is_err());
        assert!(OfficeHierarchy::new(".1..2.").is_err());
        assert!(OfficeHierarchy::new(".1.%.").is_err());
    }

    #[test]
    fn hierarchy_prefix_pattern_appends_wildcard() {
        let region = OfficeHierarchy::new(".1.").unwrap();
        let head = OfficeHierarchy::new(".").unwrap();

        assert_eq!(region.prefix_pattern(), ".1.%");
        assert_eq!(head.prefix_pattern(), ".%");
    }
}
