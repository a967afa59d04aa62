//! # sqlport-core
//!
//! A SELECT builder that renders one query per SQL dialect, including
//! databases without native `LIMIT`/`OFFSET`.
//!
//! This crate provides:
//! - A SELECT builder using the typestate pattern
//! - A [`Dialect`] strategy, picked when the builder is created
//! - SQL Server pagination emulated with `TOP` and nested derived tables
//!
//! ## Pagination
//!
//! The same builder renders native `LIMIT`/`OFFSET` for generic SQL and a
//! `TOP` rewrite for SQL Server:
//!
//! ```rust
//! use sqlport_core::{MssqlDialect, Select};
//!
//! let sql = Select::with_dialect(MssqlDialect)
//!     .columns(&["id", "name"])
//!     .from("users")
//!     .order_by_asc("name")
//!     .limit_offset(10, 20)
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM ( SELECT TOP 10 * FROM ( \
//!      SELECT TOP 30 id, name FROM users ORDER BY name ASC \
//!      ) AS sqlport_page_inner ORDER BY name DESC \
//!      ) AS sqlport_page_outer ORDER BY name ASC"
//! );
//! ```
//!
//! An offset on SQL Server needs an ORDER BY; without one, rendering fails
//! with [`QueryError::InvalidQuery`]:
//!
//! ```rust
//! use sqlport_core::{MssqlDialect, QueryError, Select};
//!
//! let err = Select::with_dialect(MssqlDialect)
//!     .all()
//!     .from("users")
//!     .limit_offset(10, 20)
//!     .render()
//!     .unwrap_err();
//!
//! assert!(matches!(err, QueryError::InvalidQuery { .. }));
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod order;

pub use builder::Select;
pub use dialect::{Dialect, GenericDialect, MssqlDialect, Pagination};
pub use error::{QueryError, Result};
pub use order::{OrderDirection, OrderEntry, OrderSpec};
