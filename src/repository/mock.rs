//! Mock implementations for isolating services in tests.

use mockall::mock;

use crate::domain::savings_account::SavingsAccount;
use crate::domain::types::OfficeHierarchy;
use crate::dto::search::SearchParams;
use crate::pagination::{Page, PageWindow};
use crate::repository::SavingsAccountReader;
use crate::repository::errors::RepositoryResult;
use crate::repository::query::SearchQuery;
use crate::services::criteria::{CriteriaValidator, ValidatedSearch, ValidationError};

mock! {
    pub Repository {}

    impl SavingsAccountReader for Repository {
        fn search_savings_accounts(
            &self,
            query: &SearchQuery,
            window: PageWindow,
        ) -> RepositoryResult<Page<SavingsAccount>>;
    }
}

mock! {
    pub Validator {}

    impl CriteriaValidator for Validator {
        fn validate(
            &self,
            params: &SearchParams,
            scope: &OfficeHierarchy,
        ) -> Result<ValidatedSearch, ValidationError>;
    }
}
