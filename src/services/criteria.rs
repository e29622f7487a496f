//! Validation of raw search parameters into [`SearchCriteria`].

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::criteria::{BirthDay, Ordering, SearchCriteria, SortColumn, SortOrder};
use crate::domain::types::OfficeHierarchy;
use crate::dto::search::{MAX_OFFSET, SearchParams};
use crate::pagination::{PageWindow, PaginationLimits};

/// A single rejected query parameter.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("`{parameter}` {message}")]
pub struct ParamViolation {
    /// Public name of the parameter, e.g. `clientBirthDay`.
    pub parameter: String,
    pub message: String,
}

impl ParamViolation {
    pub fn new(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

/// Every parameter rejected for one request, in parameter order.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized query parameter: {}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<ParamViolation>,
}

fn join_violations(violations: &[ParamViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(violations: Vec<ParamViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[ParamViolation] {
        &self.violations
    }

    /// Names of the rejected parameters.
    pub fn parameters(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|v| v.parameter.as_str())
            .collect()
    }
}

/// Output of a successful validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedSearch {
    pub criteria: SearchCriteria,
    pub ordering: Ordering,
    pub window: PageWindow,
}

/// Turns raw parameters into validated criteria scoped to the caller's office.
pub trait CriteriaValidator {
    fn validate(
        &self,
        params: &SearchParams,
        scope: &OfficeHierarchy,
    ) -> Result<ValidatedSearch, ValidationError>;
}

/// Validator enforcing the birth-day pairing and range rules, the offset
/// bound and the ordering whitelist; other filters pass through.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultCriteriaValidator {
    limits: PaginationLimits,
}

impl DefaultCriteriaValidator {
    pub fn new(limits: PaginationLimits) -> Self {
        Self { limits }
    }
}

impl CriteriaValidator for DefaultCriteriaValidator {
    fn validate(
        &self,
        params: &SearchParams,
        scope: &OfficeHierarchy,
    ) -> Result<ValidatedSearch, ValidationError> {
        let field_errors = params.validate().err();
        let rejected = |field: &str| {
            field_errors
                .as_ref()
                .is_some_and(|errors: &ValidationErrors| errors.field_errors().contains_key(field))
        };

        let mut violations = Vec::new();

        let birth_day = birth_day(params, &rejected, &mut violations);
        if rejected("offset") {
            violations.push(ParamViolation::new(
                "offset",
                format!("must not exceed {MAX_OFFSET}"),
            ));
        }
        let ordering = ordering(params, &mut violations);

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        let criteria = SearchCriteria {
            office_hierarchy: scope.clone(),
            office_id: params.office_id,
            client_id: params.client_id,
            group_id: params.group_id,
            product_id: params.product_id,
            external_id: non_blank(&params.external_id),
            status: non_blank(&params.status),
            currency_code: non_blank(&params.currency_code),
            birth_day,
        };

        Ok(ValidatedSearch {
            criteria,
            ordering,
            window: PageWindow::resolve(params.offset, params.limit, self.limits),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Applies the pairing rule first; ranges are checked only when both parts
/// are present, and each out-of-range part is reported on its own.
fn birth_day(
    params: &SearchParams,
    rejected: &impl Fn(&str) -> bool,
    violations: &mut Vec<ParamViolation>,
) -> Option<BirthDay> {
    match (params.client_birth_month, params.client_birth_day) {
        (None, None) => None,
        (Some(_), None) => {
            violations.push(ParamViolation::new(
                "clientBirthDay",
                "is required when clientBirthMonth is supplied",
            ));
            None
        }
        (None, Some(_)) => {
            violations.push(ParamViolation::new(
                "clientBirthMonth",
                "is required when clientBirthDay is supplied",
            ));
            None
        }
        (Some(month), Some(day)) => {
            for (field, parameter, bound) in [
                ("client_birth_month", "clientBirthMonth", "must be between 1 and 12"),
                ("client_birth_day", "clientBirthDay", "must be between 1 and 31"),
            ] {
                if rejected(field) {
                    violations.push(ParamViolation::new(parameter, bound));
                }
            }

            let month = u32::try_from(month).ok()?;
            let day = u32::try_from(day).ok()?;
            BirthDay::new(month, day)
        }
    }
}

fn ordering(params: &SearchParams, violations: &mut Vec<ParamViolation>) -> Ordering {
    let column = match non_blank(&params.order_by) {
        None => SortColumn::default(),
        Some(value) => value.parse::<SortColumn>().unwrap_or_else(|err| {
            violations.push(ParamViolation::new("orderBy", err.to_string()));
            SortColumn::default()
        }),
    };

    let order = match non_blank(&params.sort_order) {
        None => SortOrder::default(),
        Some(value) => value.parse::<SortOrder>().unwrap_or_else(|err| {
            violations.push(ParamViolation::new("sortOrder", err.to_string()));
            SortOrder::default()
        }),
    };

    Ordering::new(column, order)
}
