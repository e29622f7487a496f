//! Raw query parameters accepted by the savings account search.

use serde::Deserialize;
use validator::Validate;

/// Largest offset the database can bind.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Unvalidated filters, ordering and window as supplied by a caller.
///
/// Field names deserialize from camelCase (`clientBirthMonth`, `orderBy`).
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub office_id: Option<i64>,
    pub client_id: Option<i64>,
    pub group_id: Option<i64>,
    pub product_id: Option<i64>,
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub currency_code: Option<String>,
    #[validate(range(min = 1, max = 12))]
    pub client_birth_month: Option<i32>,
    #[validate(range(min = 1, max = 31))]
    pub client_birth_day: Option<i32>,
    #[validate(range(max = MAX_OFFSET))]
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub order_by: Option<String>,
    pub sort_order: Option<String>,
}

impl SearchParams {
    pub fn client_birth(mut self, month: i32, day: i32) -> Self {
        self.client_birth_month = Some(month);
        self.client_birth_day = Some(day);
        self
    }

    pub fn paginate(mut self, offset: u64, limit: u64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self.sort_order = Some(order.into());
        self
    }
}
