use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, GroupId, OfficeId, ProductId, SavingsAccountId, StaffId, TypeConstraintError,
};

/// Savings account as returned by a search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccount {
    pub id: SavingsAccountId,
    pub account_no: String,
    pub external_id: Option<String>,
    pub status: SavingsAccountStatus,
    pub currency_code: String,
    pub client: Option<Holder<ClientId>>,
    pub group: Option<Holder<GroupId>>,
    pub product: Holder<ProductId>,
    pub field_officer: Option<Holder<StaffId>>,
    pub office: Holder<OfficeId>,
    pub submitted_on_date: NaiveDate,
}

/// Identifier and display name of an entity referenced by an account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holder<Id> {
    pub id: Id,
    pub name: String,
}

impl<Id> Holder<Id> {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Lifecycle state of a savings account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SavingsAccountStatus {
    Submitted,
    Approved,
    Active,
    Withdrawn,
    Rejected,
    Closed,
    TransferInProgress,
    TransferOnHold,
    Matured,
}

impl SavingsAccountStatus {
    /// Code stored in the `status` column and accepted by the status filter.
    pub const fn code(self) -> &'static str {
        match self {
            SavingsAccountStatus::Submitted => "submitted",
            SavingsAccountStatus::Approved => "approved",
            SavingsAccountStatus::Active => "active",
            SavingsAccountStatus::Withdrawn => "withdrawn",
            SavingsAccountStatus::Rejected => "rejected",
            SavingsAccountStatus::Closed => "closed",
            SavingsAccountStatus::TransferInProgress => "transfer_in_progress",
            SavingsAccountStatus::TransferOnHold => "transfer_on_hold",
            SavingsAccountStatus::Matured => "matured",
        }
    }
}

impl Display for SavingsAccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<&str> for SavingsAccountStatus {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "submitted" => Ok(SavingsAccountStatus::Submitted),
            "approved" => Ok(SavingsAccountStatus::Approved),
            "active" => Ok(SavingsAccountStatus::Active),
            "withdrawn" => Ok(SavingsAccountStatus::Withdrawn),
            "rejected" => Ok(SavingsAccountStatus::Rejected),
            "closed" => Ok(SavingsAccountStatus::Closed),
            "transfer_in_progress" => Ok(SavingsAccountStatus::TransferInProgress),
            "transfer_on_hold" => Ok(SavingsAccountStatus::TransferOnHold),
            "matured" => Ok(SavingsAccountStatus::Matured),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown savings account status `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_parse_back() {
        for status in [
            SavingsAccountStatus::Submitted,
            SavingsAccountStatus::Active,
            SavingsAccountStatus::TransferOnHold,
            SavingsAccountStatus::Matured,
        ] {
            assert_eq!(SavingsAccountStatus::try_from(status.code()), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            SavingsAccountStatus::try_from("dormant"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
