//! SQLite catalog dialect.

use super::CatalogDialect;

const USER_TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     UNION ALL \
     SELECT name FROM sqlite_temp_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'";

/// SQLite: `sqlite_master`/`sqlite_temp_master` and `TEMP` tables.
///
/// SQLite has no sequences, and no `TRUNCATE`; an unqualified `DELETE` is its
/// fast-clear.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteCatalog;

impl SqliteCatalog {
    /// Creates a new SQLite catalog dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CatalogDialect for SqliteCatalog {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    // Table names are case-insensitive in SQLite.
    fn count_tables_sql(&self, table: &str) -> String {
        format!(
            "SELECT count(*) FROM ({USER_TABLES}) WHERE name = {} COLLATE NOCASE",
            self.string_literal(table)
        )
    }

    fn list_tables_sql(&self) -> &'static str {
        USER_TABLES
    }

    fn list_sequences_sql(&self) -> Option<&'static str> {
        None
    }

    fn create_temporary_table_sql(&self, table: &str, definition: &str) -> String {
        format!("CREATE TEMP TABLE {table} ({definition})")
    }

    fn clear_table_sql(&self, table: &str) -> String {
        format!("DELETE FROM {table}")
    }
}
