use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::Sqlite;

use crate::db::get_connection;
use crate::domain::savings_account::SavingsAccount;
use crate::models::savings_account::{RowCount, SavingsAccountRow};
use crate::pagination::{Page, PageWindow};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{SearchQuery, SqlParam};
use crate::repository::{DieselRepository, SavingsAccountReader};

/// Binds `params` to the placeholders of `query` in order.
fn bind_params<'f>(
    mut query: BoxedSqlQuery<'f, Sqlite, SqlQuery>,
    params: &[SqlParam],
) -> BoxedSqlQuery<'f, Sqlite, SqlQuery> {
    for param in params {
        query = match param {
            SqlParam::Integer(value) => query.bind::<BigInt, _>(*value),
            SqlParam::Text(value) => query.bind::<Text, _>(value.clone()),
        };
    }
    query
}

fn to_i64(value: u64, what: &str) -> RepositoryResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepositoryError::ValidationError(format!("{what} {value} is out of range")))
}

impl DieselRepository {
    /// Counts the rows matched by `query`, then loads the rows inside `window`
    /// and maps each one to `T`.
    ///
    /// The count runs first; when it is zero the window is never fetched. The
    /// pooled connection is held only for the duration of this call.
    pub fn fetch_page<Row, T>(
        &self,
        query: &SearchQuery,
        window: PageWindow,
    ) -> RepositoryResult<Page<T>>
    where
        Row: QueryableByName<Sqlite> + 'static,
        T: TryFrom<Row, Error = RepositoryError>,
    {
        let limit = to_i64(window.limit, "limit")?;
        let offset = to_i64(window.offset, "offset")?;

        let mut conn = get_connection(&self.pool)?;

        log::debug!(
            "fetching page offset={offset} limit={limit}: {} [{}]",
            query.sql(),
            query
                .params()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let total = bind_params(sql_query(query.count_sql()).into_boxed(), query.params())
            .get_result::<RowCount>(&mut conn)?
            .count;
        let total = usize::try_from(total)
            .map_err(|_| RepositoryError::RowMapping(format!("negative row count {total}")))?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let items = bind_params(sql_query(query.page_sql()).into_boxed(), query.params())
            .bind::<BigInt, _>(limit)
            .bind::<BigInt, _>(offset)
            .load::<Row>(&mut conn)?
            .into_iter()
            .map(T::try_from)
            .collect::<RepositoryResult<Vec<T>>>()?;

        Ok(Page::new(items, total))
    }
}

impl SavingsAccountReader for DieselRepository {
    fn search_savings_accounts(
        &self,
        query: &SearchQuery,
        window: PageWindow,
    ) -> RepositoryResult<Page<SavingsAccount>> {
        self.fetch_page::<SavingsAccountRow, SavingsAccount>(query, window)
    }
}
