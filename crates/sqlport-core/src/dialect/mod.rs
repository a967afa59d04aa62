//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. This module provides
//! a trait for dialect-specific behavior. A [`Select`](crate::builder::Select)
//! owns one dialect, chosen when the builder is created, and hands it the
//! dialect-neutral statement to finish at render time.

mod generic;
mod mssql;

pub use generic::GenericDialect;
pub use mssql::MssqlDialect;

use crate::error::Result;
use crate::order::OrderSpec;

/// A "skip `offset` rows, then return up to `limit` rows" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Number of rows to skip first.
    pub offset: u64,
}

impl Pagination {
    /// Creates a pagination request.
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Returns `true` when rows have to be skipped.
    #[must_use]
    pub const fn has_offset(&self) -> bool {
        self.offset > 0
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Applies `page` to the rendered `query`.
    ///
    /// `query` already ends with the ORDER BY rendered from the ordering
    /// argument. The default appends `LIMIT`/`OFFSET`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`](crate::QueryError::InvalidQuery)
    /// when the dialect cannot express the request for this query.
    fn paginate(
        &self,
        query: String,
        page: Option<Pagination>,
        _order: &OrderSpec,
    ) -> Result<String> {
        let Some(page) = page else {
            return Ok(query);
        };
        let mut sql = query;
        sql.push_str(&format!(" LIMIT {}", page.limit));
        if page.has_offset() {
            sql.push_str(&format!(" OFFSET {}", page.offset));
        }
        Ok(sql)
    }
}
