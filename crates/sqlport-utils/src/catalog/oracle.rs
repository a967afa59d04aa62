//! Oracle catalog dialect.

use super::CatalogDialect;

/// Oracle: `user_tables`/`user_sequences` and global temporary tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleCatalog;

impl OracleCatalog {
    /// Creates a new Oracle catalog dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CatalogDialect for OracleCatalog {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn count_tables_sql(&self, table: &str) -> String {
        format!(
            "SELECT count(*) AS cnt FROM user_tables WHERE table_name = {}",
            self.string_literal(table)
        )
    }

    fn list_tables_sql(&self) -> &'static str {
        "SELECT table_name FROM user_tables"
    }

    fn list_sequences_sql(&self) -> Option<&'static str> {
        Some("SELECT sequence_name FROM user_sequences")
    }

    fn create_temporary_table_sql(&self, table: &str, definition: &str) -> String {
        format!("CREATE GLOBAL TEMPORARY TABLE {table} ({definition})")
    }

    // A global temporary table in use cannot be dropped until it is emptied.
    fn clear_table_sql(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {table}")
    }
}
