use crate::{
    db::DbPool,
    domain::savings_account::SavingsAccount,
    pagination::{Page, PageWindow},
    repository::{errors::RepositoryResult, query::SearchQuery},
};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod query;
pub mod savings_account;

/// Diesel implementation of the repository traits backed by a pooled SQLite
/// database.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub trait SavingsAccountReader {
    /// Runs `query`, returning the rows inside `window` and the total number
    /// of rows matching it.
    fn search_savings_accounts(
        &self,
        query: &SearchQuery,
        window: PageWindow,
    ) -> RepositoryResult<Page<SavingsAccount>>;
}
