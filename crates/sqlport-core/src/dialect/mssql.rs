//! SQL Server dialect.
//!
//! SQL Server's only row-limiting primitive here is `SELECT TOP n`, which
//! cannot skip rows. A page `[offset, offset + limit)` is therefore rendered
//! as three nested selects:
//!
//! 1. the base statement, limited to its first `offset + limit` rows under the
//!    requested ordering;
//! 2. the first `limit` rows of that, sorted the opposite way, which are the
//!    last `limit` rows of the window;
//! 3. those rows sorted back into the requested order.
//!
//! When fewer than `limit` rows exist past `offset`, step 2 still takes the
//! last `limit` rows of a short window, so the result is never padded and
//! never an error.

use super::{Dialect, Pagination};
use crate::error::{QueryError, Result};
use crate::order::OrderSpec;

/// Alias of the derived table holding the first `offset + limit` rows.
pub const INNER_ALIAS: &str = "sqlport_page_inner";

/// Alias of the derived table holding the reversed page.
pub const OUTER_ALIAS: &str = "sqlport_page_outer";

const SELECT_KEYWORD: &str = "SELECT";

/// Microsoft SQL Server dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDialect;

impl MssqlDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn paginate(
        &self,
        query: String,
        page: Option<Pagination>,
        order: &OrderSpec,
    ) -> Result<String> {
        let Some(page) = page else {
            return Ok(query);
        };

        if !page.has_offset() {
            return top(page.limit, &query);
        }

        if order.is_empty() {
            return Err(QueryError::invalid(
                "LIMIT workaround for SQL Server",
                "order_by() was not called before rendering a query with an offset",
            ));
        }

        let window = page.limit.checked_add(page.offset).ok_or_else(|| {
            QueryError::invalid(
                "LIMIT workaround for SQL Server",
                format!(
                    "offset {} plus limit {} does not fit in a row count",
                    page.offset, page.limit
                ),
            )
        })?;

        let first_rows = top(window, &query)?;
        Ok(format!(
            "SELECT * FROM ( SELECT TOP {limit} * FROM ( {first_rows} ) AS {INNER_ALIAS} \
             ORDER BY {inverted} ) AS {OUTER_ALIAS} ORDER BY {order}",
            limit = page.limit,
            inverted = order.inverted(),
        ))
    }
}

/// Makes `query` select only its first `row_count` rows.
///
/// `TOP n` is inserted right after the leading `SELECT`; the rest of the
/// statement is kept verbatim.
fn top(row_count: u64, query: &str) -> Result<String> {
    let rest = strip_select(query).ok_or_else(|| {
        QueryError::invalid(
            "TOP rewrite for SQL Server",
            "the statement does not start with SELECT",
        )
    })?;
    Ok(format!("{SELECT_KEYWORD} TOP {row_count}{rest}"))
}

/// Returns what follows the leading `SELECT` keyword, if there is one.
fn strip_select(query: &str) -> Option<&str> {
    let query = query.trim_start();
    let keyword = query.get(..SELECT_KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(SELECT_KEYWORD) {
        return None;
    }
    let rest = &query[SELECT_KEYWORD.len()..];
    // `SELECTED ...` is not a SELECT.
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}
