use serde::Serialize;

/// Page size used when the caller asks for none.
pub const DEFAULT_LIMIT: u64 = 200;
/// Largest page a caller may request.
pub const MAX_LIMIT: u64 = 1000;

/// A bounded window of results plus the number of rows matching overall.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    #[serde(rename = "totalFilteredRecords")]
    pub total_count: usize,
    #[serde(rename = "pageItems")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// A total smaller than the number of items is raised to match it.
    pub fn new(items: Vec<T>, total_count: usize) -> Self {
        Self {
            total_count: total_count.max(items.len()),
            items,
        }
    }

    pub fn empty() -> Self {
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Default and maximum page sizes applied to requested windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Offset/limit window applied to a search after filtering and ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Resolves a requested window: a missing or zero limit falls back to the
    /// default, larger limits are clamped to the maximum.
    pub fn resolve(offset: Option<u64>, limit: Option<u64>, limits: PaginationLimits) -> Self {
        let limit = match limit {
            None | Some(0) => limits.default_limit,
            Some(limit) => limit.min(limits.max_limit),
        };

        Self {
            offset: offset.unwrap_or(0),
            limit,
        }
    }
}
