//! Temporary table lifecycle and schema cleanup.
//!
//! Temporary table names are picked from a pattern such as `TMP_%`: the `%` is
//! replaced by a random eight-digit number and the catalog is asked whether
//! the name is free. Nothing is remembered between calls; the catalog is the
//! only source of truth.
//!
//! The existence check and the CREATE are two separate statements. Two
//! sessions drawing the same number at the same moment can both see the name
//! as free, and the second CREATE then fails in the engine. Callers that
//! create temporary tables from several connections at once must serialize
//! creation themselves (e.g. with an advisory lock) or pass names without a
//! placeholder.

use tracing::{debug, info, warn};

use crate::catalog::CatalogDialect;
use crate::connection::Connection;
use crate::error::{DbError, Result};

/// Placeholder replaced by a random number in temporary table name patterns.
pub const NAME_PLACEHOLDER: char = '%';

/// How many names are tried before giving up.
pub const MAX_NAME_ATTEMPTS: usize = 10;

/// Smallest number substituted for the placeholder.
pub const NAME_NUMBER_MIN: u32 = 10_000_000;

/// Largest number substituted for the placeholder.
pub const NAME_NUMBER_MAX: u32 = 99_999_999;

/// Source of the numbers substituted into name patterns.
pub trait NameGenerator: Send {
    /// Returns the next candidate number.
    fn next_number(&mut self) -> u32;
}

/// Uniformly random numbers in `NAME_NUMBER_MIN..=NAME_NUMBER_MAX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNames;

impl NameGenerator for RandomNames {
    fn next_number(&mut self) -> u32 {
        use rand::RngExt;
        rand::rng().random_range(NAME_NUMBER_MIN..=NAME_NUMBER_MAX)
    }
}

/// What [`TemporaryObjectManager::cleanup`] dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Dropped tables, lower-cased.
    pub tables: Vec<String>,
    /// Dropped sequences, lower-cased.
    pub sequences: Vec<String>,
}

impl CleanupReport {
    /// Returns the number of DROP statements that were issued.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.tables.len() + self.sequences.len()
    }
}

/// Creates and drops temporary tables, and wipes a schema, over one connection.
pub struct TemporaryObjectManager<C, D, N = RandomNames> {
    conn: C,
    dialect: D,
    names: N,
}

impl<C: Connection, D: CatalogDialect> TemporaryObjectManager<C, D> {
    /// Creates a manager drawing random table names.
    pub const fn new(conn: C, dialect: D) -> Self {
        Self {
            conn,
            dialect,
            names: RandomNames,
        }
    }
}

impl<C, D, N> TemporaryObjectManager<C, D, N> {
    /// Replaces the source of numbers used for name patterns.
    #[must_use]
    pub fn with_name_generator<M: NameGenerator>(
        self,
        names: M,
    ) -> TemporaryObjectManager<C, D, M> {
        TemporaryObjectManager {
            conn: self.conn,
            dialect: self.dialect,
            names,
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Gives the connection back.
    pub fn into_connection(self) -> C {
        self.conn
    }
}

impl<C: Connection, D: CatalogDialect, N: NameGenerator> TemporaryObjectManager<C, D, N> {
    /// Creates a temporary table and returns its name.
    ///
    /// A `pattern` without [`NAME_PLACEHOLDER`] is used as is; the caller
    /// vouches for its uniqueness. Otherwise the placeholder is replaced by a
    /// random number, the result is upper-cased, and up to
    /// [`MAX_NAME_ATTEMPTS`] candidates are checked against the catalog.
    /// `definition` is everything between the parentheses of the CREATE.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Generic`] when every candidate name was taken, and
    /// passes connection errors through.
    pub async fn create_temporary_table(
        &mut self,
        pattern: &str,
        definition: &str,
    ) -> Result<String> {
        let table = if pattern.contains(NAME_PLACEHOLDER) {
            self.free_name(pattern).await?
        } else {
            pattern.to_string()
        };

        let sql = self.dialect.create_temporary_table_sql(&table, definition);
        debug!(sql = %sql, "Executing SQL");
        self.conn.execute_statement(&sql).await?;

        info!(table = %table, dialect = self.dialect.name(), "Temporary table created");
        Ok(table)
    }

    async fn free_name(&mut self, pattern: &str) -> Result<String> {
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let number = self.names.next_number().to_string();
            let candidate = pattern.replace(NAME_PLACEHOLDER, &number).to_uppercase();

            let sql = self.dialect.count_tables_sql(&candidate);
            if self.conn.fetch_count(&sql).await? == 0 {
                return Ok(candidate);
            }
            debug!(attempt, table = %candidate, "Temporary table name already taken");
        }

        warn!(pattern, attempts = MAX_NAME_ATTEMPTS, "No free temporary table name");
        Err(DbError::Generic(format!(
            "could not generate a unique temporary table name from pattern '{pattern}' \
             in {MAX_NAME_ATTEMPTS} attempts"
        )))
    }

    /// Empties a temporary table, then drops it.
    ///
    /// The DROP is not attempted when emptying fails.
    ///
    /// # Errors
    ///
    /// Passes connection errors through.
    pub async fn drop_temporary_table(&mut self, table: &str) -> Result<()> {
        for sql in [
            self.dialect.clear_table_sql(table),
            self.dialect.drop_table_sql(table),
        ] {
            debug!(sql = %sql, "Executing SQL");
            self.conn.execute_statement(&sql).await?;
        }

        info!(table, "Temporary table dropped");
        Ok(())
    }

    /// Drops every user table, then every user sequence, in one transaction.
    ///
    /// On failure the transaction is left open: nothing is committed and no
    /// rollback is issued, so the caller decides what happens to it.
    ///
    /// # Errors
    ///
    /// Passes connection errors through.
    pub async fn cleanup(&mut self) -> Result<CleanupReport> {
        info!(dialect = self.dialect.name(), "Cleaning up schema");
        self.conn.begin_transaction().await?;

        let tables = self.list(Some(self.dialect.list_tables_sql())).await?;
        for table in &tables {
            let sql = self.dialect.drop_table_sql(table);
            debug!(sql = %sql, "Executing SQL");
            self.conn.execute_statement(&sql).await?;
        }

        let sequences = self.list(self.dialect.list_sequences_sql()).await?;
        for sequence in &sequences {
            let sql = self.dialect.drop_sequence_sql(sequence);
            debug!(sql = %sql, "Executing SQL");
            self.conn.execute_statement(&sql).await?;
        }

        self.conn.commit().await?;

        let report = CleanupReport { tables, sequences };
        info!(
            tables = report.tables.len(),
            sequences = report.sequences.len(),
            "Schema cleaned up"
        );
        Ok(report)
    }

    // Names are lower-cased for engines that match identifiers case-sensitively.
    async fn list(&mut self, sql: Option<&str>) -> Result<Vec<String>> {
        let Some(sql) = sql else {
            return Ok(Vec::new());
        };
        let names = self.conn.fetch_column(sql).await?;
        Ok(names.into_iter().map(|name| name.to_lowercase()).collect())
    }
}
