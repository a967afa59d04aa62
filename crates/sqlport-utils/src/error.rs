//! Error types for temporary object management.

/// Errors that can occur while managing temporary objects.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The operation failed for a reason of its own, e.g. no free
    /// temporary table name could be found.
    #[error("Generic error: {0}")]
    Generic(String),

    /// Error reported by the underlying connection, passed through as is.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for temporary object management.
pub type Result<T> = std::result::Result<T, DbError>;
