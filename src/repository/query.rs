//! Composition of the savings account search statement.
//!
//! Clauses are appended in one fixed order so that the position of each bound
//! parameter depends only on which earlier filters are present:
//! hierarchy, office, client, group, product, external id, status, currency,
//! then the client birth month/day pair.

use std::fmt::Display;

use crate::domain::criteria::{BirthDay, Ordering, SearchCriteria, SortColumn};

const BASE_SELECT: &str = "SELECT sa.id AS id, sa.account_no AS account_no, \
sa.external_id AS external_id, sa.status AS status, sa.currency_code AS currency_code, \
c.id AS client_id, c.display_name AS client_name, \
g.id AS group_id, g.display_name AS group_name, \
p.id AS product_id, p.name AS product_name, \
s.id AS field_officer_id, s.display_name AS field_officer_name, \
o.id AS office_id, o.name AS office_name, \
sa.submitted_on_date AS submitted_on_date \
FROM m_savings_account sa \
JOIN m_savings_product p ON p.id = sa.product_id \
LEFT JOIN m_client c ON c.id = sa.client_id \
LEFT JOIN m_group g ON g.id = sa.group_id \
LEFT JOIN m_staff s ON s.id = sa.field_officer_id \
JOIN m_office o ON o.id = COALESCE(c.office_id, g.office_id) \
WHERE o.hierarchy LIKE ?";

pub const OFFICE_CLAUSE: &str = " AND o.id = ?";
pub const CLIENT_CLAUSE: &str = " AND sa.client_id = ?";
pub const GROUP_CLAUSE: &str = " AND sa.group_id = ?";
pub const PRODUCT_CLAUSE: &str = " AND sa.product_id = ?";
pub const EXTERNAL_ID_CLAUSE: &str = " AND sa.external_id = ?";
pub const STATUS_CLAUSE: &str = " AND sa.status = ?";
pub const CURRENCY_CLAUSE: &str = " AND sa.currency_code = ?";
pub const BIRTH_DAY_CLAUSE: &str = " AND CAST(strftime('%m', c.date_of_birth) AS INTEGER) = ? \
AND CAST(strftime('%d', c.date_of_birth) AS INTEGER) = ?";

/// Value bound to one `?` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
}

impl Display for SqlParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlParam::Integer(value) => write!(f, "{value}"),
            SqlParam::Text(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl From<u32> for SqlParam {
    fn from(value: u32) -> Self {
        SqlParam::Integer(i64::from(value))
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

/// SQL text with positional placeholders and the values bound to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    sql: String,
    params: Vec<SqlParam>,
}

impl SearchQuery {
    /// Full filtered and ordered statement, without a window.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in placeholder order.
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Statement counting every row the search matches.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) AS count FROM ({}) AS matched", self.sql)
    }

    /// Statement returning one window; binds `limit` then `offset` after
    /// [`Self::params`].
    pub fn page_sql(&self) -> String {
        format!("{} LIMIT ? OFFSET ?", self.sql)
    }
}

/// Builds [`SearchQuery`] values from validated criteria.
#[derive(Debug)]
struct QueryBuilder {
    sql: String,
    params: Vec<SqlParam>,
}

impl QueryBuilder {
    fn new(criteria: &SearchCriteria) -> Self {
        Self {
            sql: BASE_SELECT.to_string(),
            params: vec![SqlParam::Text(criteria.office_hierarchy.prefix_pattern())],
        }
    }

    fn filter<V: Into<SqlParam>>(mut self, clause: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.sql.push_str(clause);
            self.params.push(value.into());
        }
        self
    }

    fn birth_day(mut self, birth_day: Option<BirthDay>) -> Self {
        if let Some(birth_day) = birth_day {
            self.sql.push_str(BIRTH_DAY_CLAUSE);
            self.params.push(birth_day.month().into());
            self.params.push(birth_day.day().into());
        }
        self
    }

    fn order(mut self, ordering: Ordering) -> Self {
        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(ordering.column.column());
        self.sql.push(' ');
        self.sql.push_str(&ordering.order.to_string());
        if ordering.column != SortColumn::Id {
            self.sql.push_str(", sa.id ASC");
        }
        self
    }

    fn finish(self) -> SearchQuery {
        SearchQuery {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Composes the search statement for `criteria` ordered by `ordering`.
pub fn build(criteria: &SearchCriteria, ordering: Ordering) -> SearchQuery {
    QueryBuilder::new(criteria)
        .filter(OFFICE_CLAUSE, criteria.office_id)
        .filter(CLIENT_CLAUSE, criteria.client_id)
        .filter(GROUP_CLAUSE, criteria.group_id)
        .filter(PRODUCT_CLAUSE, criteria.product_id)
        .filter(EXTERNAL_ID_CLAUSE, criteria.external_id.as_deref())
        .filter(STATUS_CLAUSE, criteria.status.as_deref())
        .filter(CURRENCY_CLAUSE, criteria.currency_code.as_deref())
        .birth_day(criteria.birth_day)
        .order(ordering)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criteria::SortOrder;
    use crate::domain::types::OfficeHierarchy;

    fn criteria() -> SearchCriteria {
        SearchCriteria::new(OfficeHierarchy::new(".1.").unwrap())
    }

    #[test]
    fn no_filters_binds_only_the_hierarchy() {
        let query = build(&criteria(), Ordering::default());

        assert_eq!(query.params(), &[SqlParam::Text(".1.%".into())]);
        assert!(query.sql().contains("WHERE o.hierarchy LIKE ?"));
        assert!(!query.sql().contains("c.date_of_birth"));
        assert!(query.sql().ends_with(" ORDER BY sa.id ASC"));
    }

    #[test]
    fn absent_filters_leave_no_text_behind() {
        let query = build(&criteria().client_id(5), Ordering::default());

        assert!(query.sql().contains(CLIENT_CLAUSE));
        for clause in [
            OFFICE_CLAUSE,
            GROUP_CLAUSE,
            PRODUCT_CLAUSE,
            EXTERNAL_ID_CLAUSE,
            STATUS_CLAUSE,
            CURRENCY_CLAUSE,
            BIRTH_DAY_CLAUSE,
        ] {
            assert!(!query.sql().contains(clause), "unexpected clause {clause}");
        }
        assert_eq!(query.params().len(), 2);
    }

    #[test]
    fn birth_day_appends_month_then_day_last() {
        let query = build(
            &criteria().birth_day(BirthDay::new(10, 20).unwrap()),
            Ordering::default(),
        );

        assert!(query.sql().contains("c.date_of_birth"));
        assert_eq!(
            query.params(),
            &[
                SqlParam::Text(".1.%".into()),
                SqlParam::Integer(10),
                SqlParam::Integer(20),
            ]
        );
    }

    #[test]
    fn birth_day_stays_last_with_every_other_filter() {
        let query = build(
            &criteria()
                .office_id(3)
                .client_id(4)
                .group_id(5)
                .product_id(6)
                .external_id("EXT-1")
                .status("active")
                .currency_code("USD")
                .birth_day(BirthDay::new(1, 31).unwrap()),
            Ordering::default(),
        );

        let params = query.params();
        assert_eq!(params.len(), 10);
        assert_eq!(
            &params[1..8],
            &[
                SqlParam::Integer(3),
                SqlParam::Integer(4),
                SqlParam::Integer(5),
                SqlParam::Integer(6),
                SqlParam::Text("EXT-1".into()),
                SqlParam::Text("active".into()),
                SqlParam::Text("USD".into()),
            ]
        );
        assert_eq!(&params[8..], &[SqlParam::Integer(1), SqlParam::Integer(31)]);

        let sql = query.sql();
        let positions: Vec<usize> = [
            OFFICE_CLAUSE,
            CLIENT_CLAUSE,
            GROUP_CLAUSE,
            PRODUCT_CLAUSE,
            EXTERNAL_ID_CLAUSE,
            STATUS_CLAUSE,
            CURRENCY_CLAUSE,
            BIRTH_DAY_CLAUSE,
        ]
        .iter()
        .map(|clause| sql.find(clause).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parameter_index_ignores_later_filters() {
        let with_status = build(&criteria().product_id(9).status("closed"), Ordering::default());
        let without_status = build(&criteria().product_id(9), Ordering::default());

        assert_eq!(with_status.params()[1], SqlParam::Integer(9));
        assert_eq!(without_status.params()[1], SqlParam::Integer(9));
    }

    #[test]
    fn non_id_ordering_gets_id_tie_breaker() {
        let query = build(
            &criteria(),
            Ordering::new(SortColumn::SubmittedOnDate, SortOrder::Desc),
        );

        assert!(
            query
                .sql()
                .ends_with(" ORDER BY sa.submitted_on_date DESC, sa.id ASC")
        );
    }

    #[test]
    fn count_and_page_wrap_the_same_statement() {
        let query = build(&criteria(), Ordering::default());

        assert_eq!(
            query.count_sql(),
            format!("SELECT COUNT(*) AS count FROM ({}) AS matched", query.sql())
        );
        assert!(query.page_sql().ends_with(" LIMIT ? OFFSET ?"));
    }
}
