//! Catalog dialect implementations.
//!
//! Each dialect knows how to ask its engine's catalog about existing tables
//! and sequences, and how to spell the DDL used for temporary tables.

mod oracle;
mod sqlite;

pub use oracle::OracleCatalog;
pub use sqlite::SqliteCatalog;

/// Trait for database-specific catalog queries and temporary-table DDL.
pub trait CatalogDialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Query returning, as a single integer, how many tables are named `table`.
    fn count_tables_sql(&self, table: &str) -> String;

    /// Query returning the name of every user-owned table, one per row.
    fn list_tables_sql(&self) -> &'static str;

    /// Query returning the name of every user-owned sequence, one per row, or
    /// `None` when the engine has no sequences.
    fn list_sequences_sql(&self) -> Option<&'static str>;

    /// Generates the CREATE statement for a temporary table.
    fn create_temporary_table_sql(&self, table: &str, definition: &str) -> String;

    /// Generates the statement emptying a table before it is dropped.
    fn clear_table_sql(&self, table: &str) -> String;

    /// Generates the DROP statement for a table.
    fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE {table}")
    }

    /// Generates the DROP statement for a sequence.
    fn drop_sequence_sql(&self, sequence: &str) -> String {
        format!("DROP SEQUENCE {sequence}")
    }

    /// Quotes a value as a SQL string literal.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}
