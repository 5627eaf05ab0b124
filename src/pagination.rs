use async_graphql::InputObject;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Pagination state of one page of a larger result set.
///
/// Only [`PageMeta::new`] builds a value, so the navigation flags always agree
/// with `page` and `total_pages`. Deserializing goes through the same
/// constructor and recomputes the derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPageMeta")]
pub struct PageMeta {
    total: u64,
    page: u64,
    limit: u64,
    total_pages: u64,
    has_next_page: bool,
    has_previous_page: bool,
}

impl PageMeta {
    /// Build the metadata for `page` (1-indexed) of `total` items split into
    /// pages of `limit`. Pages past the end are not clamped.
    pub fn new(total: u64, page: u64, limit: u64) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::InvalidArgument(
                "limit must be at least 1".to_string(),
            ));
        }
        if page == 0 {
            return Err(PaginationError::InvalidArgument(
                "page must be at least 1".to_string(),
            ));
        }

        let total_pages = total.div_ceil(limit);

        Ok(Self {
            total,
            page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }
}

#[derive(Deserialize)]
struct RawPageMeta {
    total: u64,
    page: u64,
    limit: u64,
}

impl TryFrom<RawPageMeta> for PageMeta {
    type Error = PaginationError;

    fn try_from(raw: RawPageMeta) -> Result<Self, Self::Error> {
        PageMeta::new(raw.total, raw.page, raw.limit)
    }
}

/// Page request as sent by clients: `?page=1&limit=20` or the GraphQL
/// `pagination` argument.
#[derive(Debug, Clone, Default, Deserialize, InputObject)]
#[graphql(name = "PaginationInput")]
pub struct PaginationArgs {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationArgs {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> Result<u64, PaginationError> {
        match self.page {
            None => Ok(DEFAULT_PAGE),
            Some(p) if p >= 1 => Ok(p as u64),
            Some(p) => Err(PaginationError::InvalidArgument(format!(
                "page must be at least 1, got {p}"
            ))),
        }
    }

    /// Requested page size, capped at [`MAX_LIMIT`].
    pub fn limit(&self) -> Result<u64, PaginationError> {
        match self.limit {
            None => Ok(DEFAULT_LIMIT),
            Some(l) if l >= 1 => Ok((l as u64).min(MAX_LIMIT)),
            Some(l) => Err(PaginationError::InvalidArgument(format!(
                "limit must be at least 1, got {l}"
            ))),
        }
    }

    /// Rows to skip before the requested page. Postgres takes a signed 64-bit
    /// OFFSET, so pages beyond that are rejected.
    pub fn offset(&self) -> Result<u64, PaginationError> {
        let page = self.page()?;
        let limit = self.limit()?;
        (page - 1)
            .checked_mul(limit)
            .filter(|offset| *offset <= i64::MAX as u64)
            .ok_or_else(|| {
                PaginationError::InvalidArgument(format!(
                    "page {page} is out of range for limit {limit}"
                ))
            })
    }
}

/// A page of items together with its [`PageMeta`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
