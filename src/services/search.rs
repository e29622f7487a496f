use crate::SAVINGS_ACCOUNT_READ_PERMISSION;
use crate::domain::auth::{RequestContext, check_read_permission};
use crate::domain::savings_account::SavingsAccount;
use crate::dto::search::SearchParams;
use crate::pagination::Page;
use crate::repository::SavingsAccountReader;
use crate::repository::query;
use crate::services::criteria::CriteriaValidator;
use crate::services::{ServiceError, ServiceResult};

/// Returns the page of savings accounts matching `params` that the caller's
/// office may see.
///
/// Runs authorization, validation, query composition and execution in that
/// order. Invalid parameters fail before the repository is called.
pub fn retrieve_all<R, V>(
    repo: &R,
    validator: &V,
    ctx: &RequestContext,
    params: SearchParams,
) -> ServiceResult<Page<SavingsAccount>>
where
    R: SavingsAccountReader + ?Sized,
    V: CriteriaValidator + ?Sized,
{
    if !check_read_permission(SAVINGS_ACCOUNT_READ_PERMISSION, &ctx.user.permissions) {
        log::warn!(
            "User {} of tenant {} lacks {SAVINGS_ACCOUNT_READ_PERMISSION}",
            ctx.user.username,
            ctx.tenant
        );
        return Err(ServiceError::Unauthorized);
    }

    let search = validator
        .validate(&params, &ctx.user.office_hierarchy)
        .map_err(|err| {
            log::error!("Rejected savings account search: {err}");
            err
        })?;

    let query = query::build(&search.criteria, search.ordering);

    let page = repo
        .search_savings_accounts(&query, search.window)
        .map_err(|err| {
            log::error!("Failed to search savings accounts: {err}");
            err
        })?;

    log::debug!(
        "Savings account search for {} returned {} of {}",
        ctx.user.username,
        page.items.len(),
        page.total_count
    );

    Ok(page)
}
