//! Validated search criteria and result ordering.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::types::{OfficeHierarchy, TypeConstraintError};

/// Filters driving a single savings account search.
///
/// Built only by a [`crate::services::criteria::CriteriaValidator`], so a
/// value of this type always satisfies the birth-day pairing and range rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub office_hierarchy: OfficeHierarchy,
    pub office_id: Option<i64>,
    pub client_id: Option<i64>,
    pub group_id: Option<i64>,
    pub product_id: Option<i64>,
    pub external_id: Option<String>,
    pub status: Option<String>,
    pub currency_code: Option<String>,
    pub birth_day: Option<BirthDay>,
}

impl SearchCriteria {
    /// Criteria matching every account visible from `office_hierarchy`.
    pub fn new(office_hierarchy: OfficeHierarchy) -> Self {
        Self {
            office_hierarchy,
            office_id: None,
            client_id: None,
            group_id: None,
            product_id: None,
            external_id: None,
            status: None,
            currency_code: None,
            birth_day: None,
        }
    }

    pub fn office_id(mut self, office_id: i64) -> Self {
        self.office_id = Some(office_id);
        self
    }

    pub fn client_id(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn group_id(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    pub fn birth_day(mut self, birth_day: BirthDay) -> Self {
        self.birth_day = Some(birth_day);
        self
    }
}

/// Month and day of a client's date of birth, without the year.
///
/// Any day in `1..=31` is accepted for every month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BirthDay {
    month: u32,
    day: u32,
}

impl BirthDay {
    pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;
    pub const DAYS: std::ops::RangeInclusive<u32> = 1..=31;

    /// Returns `None` when either component is out of range.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        (Self::MONTHS.contains(&month) && Self::DAYS.contains(&day)).then_some(Self { month, day })
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn day(self) -> u32 {
        self.day
    }
}

/// Columns a search may be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SortColumn {
    #[default]
    Id,
    AccountNo,
    ExternalId,
    Status,
    CurrencyCode,
    ClientId,
    ProductId,
    SubmittedOnDate,
}

impl SortColumn {
    /// Qualified SQL column backing this sort key.
    pub const fn column(self) -> &'static str {
        match self {
            SortColumn::Id => "sa.id",
            SortColumn::AccountNo => "sa.account_no",
            SortColumn::ExternalId => "sa.external_id",
            SortColumn::Status => "sa.status",
            SortColumn::CurrencyCode => "sa.currency_code",
            SortColumn::ClientId => "sa.client_id",
            SortColumn::ProductId => "sa.product_id",
            SortColumn::SubmittedOnDate => "sa.submitted_on_date",
        }
    }
}

impl FromStr for SortColumn {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "accountNo" | "account_no" => Ok(SortColumn::AccountNo),
            "externalId" | "external_id" => Ok(SortColumn::ExternalId),
            "status" => Ok(SortColumn::Status),
            "currencyCode" | "currency_code" => Ok(SortColumn::CurrencyCode),
            "clientId" | "client_id" => Ok(SortColumn::ClientId),
            "productId" | "product_id" => Ok(SortColumn::ProductId),
            "submittedOnDate" | "submitted_on_date" => Ok(SortColumn::SubmittedOnDate),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "`{other}` is not a sortable column"
            ))),
        }
    }
}

/// Direction of an ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(TypeConstraintError::InvalidValue(format!(
                "`{s}` must be ASC or DESC"
            )))
        }
    }
}

/// Requested ordering of the result set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ordering {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Ordering {
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self { column, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_day_checks_each_component() {
        assert!(BirthDay::new(10, 20).is_some());
        assert!(BirthDay::new(13, 20).is_none());
        assert!(BirthDay::new(10, 32).is_none());
        assert!(BirthDay::new(0, 1).is_none());
    }

    #[test]
    fn birth_day_has_no_calendar_awareness() {
        // February 30th is accepted; the day bound is 31 for every month.
        let birth_day = BirthDay::new(2, 30).unwrap();
        assert_eq!((birth_day.month(), birth_day.day()), (2, 30));
    }

    #[test]
    fn sort_column_accepts_api_and_column_names() {
        assert_eq!("accountNo".parse(), Ok(SortColumn::AccountNo));
        assert_eq!("submitted_on_date".parse(), Ok(SortColumn::SubmittedOnDate));
        assert!(matches!(
            "sa.id; DROP TABLE m_client".parse::<SortColumn>(),
            Err(TypeConstraintError::InvalidValue(message)) if message.contains("not a sortable column")
        ));
    }

    #[test]
    fn sort_order_is_case_insensitive() {
        assert_eq!("DESC".parse(), Ok(SortOrder::Desc));
        assert_eq!("asc".parse(), Ok(SortOrder::Asc));
        assert_eq!(
            "up".parse::<SortOrder>(),
            Err(TypeConstraintError::InvalidValue(
                "`up` must be ASC or DESC".to_string()
            ))
        );
    }
}
