//! Row shape returned by the savings account search statement.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date, Nullable, Text};

use crate::domain::savings_account::{
    Holder, SavingsAccount as DomainSavingsAccount, SavingsAccountStatus,
};
use crate::domain::types::{
    ClientId, GroupId, OfficeId, ProductId, SavingsAccountId, StaffId, TypeConstraintError,
};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, QueryableByName)]
/// One joined row of the search statement; columns are matched by alias.
pub struct SavingsAccountRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub account_no: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub external_id: Option<String>,
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = Text)]
    pub currency_code: String,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub client_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub client_name: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub group_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub group_name: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub product_id: i64,
    #[diesel(sql_type = Text)]
    pub product_name: String,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub field_officer_id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub field_officer_name: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub office_id: i64,
    #[diesel(sql_type = Text)]
    pub office_name: String,
    #[diesel(sql_type = Date)]
    pub submitted_on_date: NaiveDate,
}

#[derive(QueryableByName)]
pub struct RowCount {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Pairs an optional id with its name, failing when only one side is set.
fn optional_holder<Id>(
    column: &str,
    id: Option<Id>,
    name: Option<String>,
) -> Result<Option<Holder<Id>>, RepositoryError> {
    match (id, name) {
        (Some(id), Some(name)) => Ok(Some(Holder::new(id, name))),
        (None, None) => Ok(None),
        _ => Err(RepositoryError::RowMapping(format!(
            "{column} id and name must be set together"
        ))),
    }
}

impl TryFrom<SavingsAccountRow> for DomainSavingsAccount {
    type Error = RepositoryError;

    fn try_from(row: SavingsAccountRow) -> Result<Self, Self::Error> {
        let account_id = row.id;
        let mapping = move |err: TypeConstraintError| {
            RepositoryError::RowMapping(format!("savings account {account_id}: {err}"))
        };

        let client_id = row.client_id.map(ClientId::new).transpose().map_err(mapping)?;
        let group_id = row.group_id.map(GroupId::new).transpose().map_err(mapping)?;
        let field_officer_id = row
            .field_officer_id
            .map(StaffId::new)
            .transpose()
            .map_err(mapping)?;

        Ok(Self {
            id: SavingsAccountId::new(row.id).map_err(mapping)?,
            account_no: row.account_no,
            external_id: row.external_id,
            status: SavingsAccountStatus::try_from(row.status.as_str()).map_err(mapping)?,
            currency_code: row.currency_code,
            client: optional_holder("client", client_id, row.client_name)?,
            group: optional_holder("group", group_id, row.group_name)?,
            product: Holder::new(ProductId::new(row.product_id).map_err(mapping)?, row.product_name),
            field_officer: optional_holder(
                "field officer",
                field_officer_id,
                row.field_officer_name,
            )?,
            office: Holder::new(OfficeId::new(row.office_id).map_err(mapping)?, row.office_name),
            submitted_on_date: row.submitted_on_date,
        })
    }
}
