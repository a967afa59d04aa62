//! Temporary tables and schema cleanup over a shared connection.
//!
//! `sqlport-utils` provides:
//! - [`TemporaryObjectManager`](temporary::TemporaryObjectManager), which
//!   creates uniquely named temporary tables, drops them, and wipes every
//!   table and sequence of a schema inside one transaction
//! - [`CatalogDialect`](catalog::CatalogDialect), the per-engine catalog
//!   queries and DDL (Oracle, SQLite)
//! - [`Connection`](connection::Connection), the seam to the database, with an
//!   implementation for `sqlx::SqliteConnection`
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlport_utils::prelude::*;
//! use sqlx::{Connection as _, SqliteConnection};
//!
//! # async fn run() -> sqlport_utils::error::Result<()> {
//! let conn = SqliteConnection::connect("sqlite::memory:").await?;
//! let mut manager = TemporaryObjectManager::new(conn, SqliteCatalog::new());
//!
//! let table = manager
//!     .create_temporary_table("SCRATCH_%", "id INTEGER, label TEXT")
//!     .await?;
//! // ... use the table ...
//! manager.drop_temporary_table(&table).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod connection;
pub mod error;
pub mod temporary;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{CatalogDialect, OracleCatalog, SqliteCatalog};
    pub use crate::connection::Connection;
    pub use crate::error::{DbError, Result};
    pub use crate::temporary::{
        CleanupReport, NameGenerator, RandomNames, TemporaryObjectManager, MAX_NAME_ATTEMPTS,
        NAME_PLACEHOLDER,
    };
}
