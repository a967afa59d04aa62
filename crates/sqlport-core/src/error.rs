//! Error types for query rendering.

/// Errors raised while rendering a query for a dialect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The query cannot be expressed in the target dialect as composed.
    #[error("Invalid query ({context}): {message}")]
    InvalidQuery {
        /// What was being rendered when the problem was found.
        context: String,
        /// What the caller has to change.
        message: String,
    },
}

impl QueryError {
    /// Creates a [`QueryError::InvalidQuery`].
    #[must_use]
    pub fn invalid(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type for query rendering.
pub type Result<T> = std::result::Result<T, QueryError>;
