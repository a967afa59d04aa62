//! SELECT statement builder using the typestate pattern.
//!
//! The builder produces a dialect-neutral statement (`base_sql`) and lets its
//! [`Dialect`] apply LIMIT/OFFSET at render time, so the same composed query
//! renders as `LIMIT ... OFFSET ...` for one engine and as nested `TOP n`
//! selects for another.

use std::marker::PhantomData;

use crate::dialect::{Dialect, GenericDialect, Pagination};
use crate::error::Result;
use crate::order::{OrderDirection, OrderSpec};

// Typestate markers (zero-sized types)

/// Marker: No columns specified yet.
pub struct NoColumns;
/// Marker: Columns have been specified.
pub struct HasColumns;
/// Marker: No FROM clause specified yet.
pub struct NoFrom;
/// Marker: FROM clause has been specified.
pub struct HasFrom;

/// A SELECT statement builder bound to a dialect.
///
/// Uses the typestate pattern to ensure that:
/// - `render()` is only available when both columns and FROM are specified
/// - `filter()` and the joins are only available after FROM is specified
/// - `group_by()`, `having()`, `order_by()` and `limit()` follow SQL semantics
pub struct Select<Cols, From> {
    dialect: Box<dyn Dialect>,
    distinct: bool,
    columns: Vec<String>,
    from: Option<String>,
    joins: Vec<String>,
    filter: Option<String>,
    group_by: Vec<String>,
    having: Option<String>,
    order: OrderSpec,
    page: Option<Pagination>,
    _state: PhantomData<(Cols, From)>,
}

impl Select<NoColumns, NoFrom> {
    /// Creates a new SELECT builder for the generic dialect.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dialect(GenericDialect)
    }

    /// Creates a new SELECT builder that renders for `dialect`.
    #[must_use]
    pub fn with_dialect(dialect: impl Dialect + 'static) -> Self {
        Self::with_boxed_dialect(Box::new(dialect))
    }

    /// Creates a new SELECT builder for a dialect picked at runtime.
    #[must_use]
    pub fn with_boxed_dialect(dialect: Box<dyn Dialect>) -> Self {
        Self {
            dialect,
            distinct: false,
            columns: vec![],
            from: None,
            joins: vec![],
            filter: None,
            group_by: vec![],
            having: None,
            order: OrderSpec::new(),
            page: None,
            _state: PhantomData,
        }
    }
}

impl Default for Select<NoColumns, NoFrom> {
    fn default() -> Self {
        Self::new()
    }
}

// Available in every state
impl<Cols, From> Select<Cols, From> {
    /// Returns the dialect this builder renders for.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the registered ORDER BY entries.
    #[must_use]
    pub const fn order(&self) -> &OrderSpec {
        &self.order
    }

    /// Returns the LIMIT/OFFSET request, if one was set.
    #[must_use]
    pub const fn pagination(&self) -> Option<Pagination> {
        self.page
    }

    /// Clears every clause, the ordering and the pagination so the builder can
    /// be reused. The dialect is kept.
    #[must_use]
    pub fn reset(self) -> Select<NoColumns, NoFrom> {
        Select::with_boxed_dialect(self.dialect)
    }

    fn transition<C, F>(self) -> Select<C, F> {
        Select {
            dialect: self.dialect,
            distinct: self.distinct,
            columns: self.columns,
            from: self.from,
            joins: self.joins,
            filter: self.filter,
            group_by: self.group_by,
            having: self.having,
            order: self.order,
            page: self.page,
            _state: PhantomData,
        }
    }
}

// Transition: NoColumns -> HasColumns
impl<From> Select<NoColumns, From> {
    /// Specifies the columns to select.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Select<HasColumns, From> {
        self.columns = cols.iter().map(|s| String::from(*s)).collect();
        self.transition()
    }

    /// Selects all columns (*).
    #[must_use]
    pub fn all(mut self) -> Select<HasColumns, From> {
        self.columns = vec![String::from("*")];
        self.transition()
    }
}

// Transition: NoFrom -> HasFrom
impl<Cols> Select<Cols, NoFrom> {
    /// Specifies the table to select from.
    #[must_use]
    pub fn from(mut self, table: &str) -> Select<Cols, HasFrom> {
        self.from = Some(String::from(table));
        self.transition()
    }
}

// Methods available after FROM
impl<Cols> Select<Cols, HasFrom> {
    /// Adds a WHERE condition. Repeated calls are combined with AND.
    #[must_use]
    pub fn filter(mut self, condition: &str) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => format!("{existing} AND {condition}"),
            None => String::from(condition),
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("INNER JOIN {table} ON {on}"));
        self
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("LEFT JOIN {table} ON {on}"));
        self
    }
}

// Methods available with columns
impl<From> Select<HasColumns, From> {
    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

impl Select<HasColumns, HasFrom> {
    /// Adds a GROUP BY clause.
    #[must_use]
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.group_by = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Adds a HAVING clause (only valid after GROUP BY).
    #[must_use]
    pub fn having(mut self, condition: &str) -> Self {
        self.having = Some(String::from(condition));
        self
    }

    /// Appends an ORDER BY entry. Earlier entries take precedence.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: OrderDirection) -> Self {
        self.order.push(column, direction);
        self
    }

    /// Appends an ascending ORDER BY entry.
    #[must_use]
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, OrderDirection::Asc)
    }

    /// Appends a descending ORDER BY entry.
    #[must_use]
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, OrderDirection::Desc)
    }

    /// Returns at most `count` rows.
    #[must_use]
    pub const fn limit(self, count: u64) -> Self {
        self.limit_offset(count, 0)
    }

    /// Skips `offset` rows, then returns at most `count` rows.
    ///
    /// Dialects without native OFFSET need at least one ORDER BY entry to
    /// render a non-zero offset.
    #[must_use]
    pub const fn limit_offset(mut self, count: u64, offset: u64) -> Self {
        self.page = Some(Pagination::new(count, offset));
        self
    }

    /// Returns the statement without LIMIT/OFFSET applied.
    #[must_use]
    pub fn base_sql(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.distinct {
            sql.push_str("DISTINCT ");
        }

        sql.push_str(&self.columns.join(", "));

        if let Some(ref table) = self.from {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if let Some(ref condition) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if let Some(ref condition) = self.having {
            sql.push_str(" HAVING ");
            sql.push_str(condition);
        }

        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.to_string());
        }

        sql
    }

    /// Renders the statement for the builder's dialect.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`](crate::QueryError::InvalidQuery)
    /// when the dialect cannot express the requested LIMIT/OFFSET, e.g. an
    /// offset without ORDER BY on SQL Server.
    pub fn render(&self) -> Result<String> {
        self.dialect.paginate(self.base_sql(), self.page, &self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MssqlDialect;
    use crate::error::QueryError;

    #[test]
    fn test_simple_select() {
        let sql = Select::new()
            .columns(&["id", "name"])
            .from("users")
            .render()
            .unwrap();

        assert_eq!(sql, "SELECT id, name FROM users");
    }

    #[test]
    fn test_select_all() {
        let sql = Select::new().all().from("users").render().unwrap();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn test_from_before_columns() {
        let sql = Select::new()
            .from("users")
            .filter("active = 1")
            .columns(&["id"])
            .render()
            .unwrap();
        assert_eq!(sql, "SELECT id FROM users WHERE active = 1");
    }

    #[test]
    fn test_select_distinct() {
        let sql = Select::new()
            .columns(&["status"])
            .distinct()
            .from("orders")
            .render()
            .unwrap();

        assert_eq!(sql, "SELECT DISTINCT status FROM orders");
    }

    #[test]
    fn test_filters_are_anded() {
        let sql = Select::new()
            .columns(&["id"])
            .from("users")
            .filter("active = 1")
            .filter("age > 18")
            .render()
            .unwrap();

        assert_eq!(sql, "SELECT id FROM users WHERE active = 1 AND age > 18");
    }

    #[test]
    fn test_select_with_join() {
        let sql = Select::new()
            .columns(&["u.id", "o.amount"])
            .from("users u")
            .join("orders o", "u.id = o.user_id")
            .render()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT u.id, o.amount FROM users u INNER JOIN orders o ON u.id = o.user_id"
        );
    }

    #[test]
    fn test_select_with_group_by_having() {
        let sql = Select::new()
            .columns(&["status", "COUNT(*)"])
            .from("orders")
            .group_by(&["status"])
            .having("COUNT(*) > 1")
            .render()
            .unwrap();

        assert_eq!(
            sql,
            "SELECT status, COUNT(*) FROM orders GROUP BY status HAVING COUNT(*) > 1"
        );
    }

    #[test]
    fn test_order_by_appends() {
        let query = Select::new()
            .columns(&["id", "name"])
            .from("users")
            .order_by_asc("name")
            .order_by_desc("id");

        assert_eq!(query.order().len(), 2);
        assert_eq!(
            query.render().unwrap(),
            "SELECT id, name FROM users ORDER BY name ASC, id DESC"
        );
    }

    #[test]
    fn test_generic_limit_offset() {
        let sql = Select::new()
            .columns(&["id"])
            .from("users")
            .limit_offset(10, 20)
            .render()
            .unwrap();

        assert_eq!(sql, "SELECT id FROM users LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_mssql_limit() {
        let sql = Select::with_dialect(MssqlDialect)
            .columns(&["id"])
            .from("users")
            .limit(5)
            .render()
            .unwrap();

        assert_eq!(sql, "SELECT TOP 5 id FROM users");
    }

    #[test]
    fn test_mssql_offset_without_order() {
        let query = Select::with_dialect(MssqlDialect)
            .columns(&["id"])
            .from("users")
            .limit_offset(5, 10);

        assert!(matches!(query.render(), Err(QueryError::InvalidQuery { .. })));
    }

    #[test]
    fn test_last_limit_wins() {
        let query = Select::new()
            .all()
            .from("users")
            .limit_offset(5, 10)
            .limit(3);

        assert_eq!(query.pagination(), Some(Pagination::new(3, 0)));
    }

    #[test]
    fn test_reset_keeps_dialect() {
        let query = Select::with_dialect(MssqlDialect)
            .columns(&["id"])
            .from("users")
            .order_by_desc("id")
            .limit_offset(5, 10);

        let fresh = query.reset();
        assert!(fresh.order().is_empty());
        assert!(fresh.order().inverted().is_empty());
        assert_eq!(fresh.pagination(), None);
        assert_eq!(fresh.dialect().name(), "mssql");

        let sql = fresh
            .columns(&["name"])
            .from("teams")
            .limit(1)
            .render()
            .unwrap();
        assert_eq!(sql, "SELECT TOP 1 name FROM teams");
    }

    // Compile-time tests (these would fail to compile if uncommented)

    // This would fail to compile: render without FROM
    // #[test]
    // fn test_render_without_from_fails() {
    //     let _ = Select::new()
    //         .columns(&["id"])
    //         .render();  // Error: method `render` not found
    // }

    // This would fail to compile: WHERE without FROM
    // #[test]
    // fn test_filter_without_from_fails() {
    //     let _ = Select::new()
    //         .columns(&["id"])
    //         .filter("id = 1");  // Error: no method `filter`
    // }
}
