//! The connection seam.
//!
//! [`TemporaryObjectManager`](crate::temporary::TemporaryObjectManager) only
//! needs five round-trips from a database connection. They are expressed as a
//! trait so the manager can run over a `sqlx` connection or anything else that
//! speaks SQL text.

use std::future::Future;

use sqlx::SqliteConnection;

use crate::error::Result;

/// A database connection able to run raw SQL text.
///
/// Every call is awaited to completion before the next one is issued.
pub trait Connection: Send {
    /// Runs `sql` and returns the first column of its first row as an integer.
    fn fetch_count(&mut self, sql: &str) -> impl Future<Output = Result<i64>> + Send;

    /// Runs `sql` and returns the first column of every row.
    fn fetch_column(&mut self, sql: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Runs a statement and returns the number of affected rows.
    fn execute_statement(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Opens a transaction.
    fn begin_transaction(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Commits the open transaction.
    fn commit(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Rolls back the open transaction.
    fn rollback(&mut self) -> impl Future<Output = Result<()>> + Send;
}

impl Connection for SqliteConnection {
    async fn fetch_count(&mut self, sql: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&mut *self)
            .await?;
        Ok(count)
    }

    async fn fetch_column(&mut self, sql: &str) -> Result<Vec<String>> {
        let values = sqlx::query_scalar::<_, String>(sql)
            .fetch_all(&mut *self)
            .await?;
        Ok(values)
    }

    async fn execute_statement(&mut self, sql: &str) -> Result<u64> {
        let result = sqlx::query(sql).execute(&mut *self).await?;
        Ok(result.rows_affected())
    }

    async fn begin_transaction(&mut self) -> Result<()> {
        self.execute_statement("BEGIN").await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.execute_statement("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.execute_statement("ROLLBACK").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection as _;

    async fn memory_connection() -> SqliteConnection {
        SqliteConnection::connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory SQLite database")
    }

    #[tokio::test]
    async fn test_sqlite_round_trips() {
        let mut conn = memory_connection().await;

        conn.execute_statement("CREATE TABLE items (name TEXT NOT NULL)")
            .await
            .unwrap();
        let inserted = conn
            .execute_statement("INSERT INTO items (name) VALUES ('a'), ('b')")
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        assert_eq!(conn.fetch_count("SELECT count(*) FROM items").await.unwrap(), 2);
        assert_eq!(
            conn.fetch_column("SELECT name FROM items ORDER BY name")
                .await
                .unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_sqlite_rollback_discards_changes() {
        let mut conn = memory_connection().await;
        conn.execute_statement("CREATE TABLE items (name TEXT)")
            .await
            .unwrap();

        conn.begin_transaction().await.unwrap();
        conn.execute_statement("INSERT INTO items (name) VALUES ('x')")
            .await
            .unwrap();
        conn.rollback().await.unwrap();

        assert_eq!(conn.fetch_count("SELECT count(*) FROM items").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sqlite_errors_pass_through() {
        let mut conn = memory_connection().await;
        let err = conn
            .execute_statement("DROP TABLE missing_table")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::DbError::Database(_)));
    }
}
