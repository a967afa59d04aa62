//! Type-Safe SQL Builder
//!
//! This module provides a SELECT builder using the typestate pattern. Invalid
//! SQL constructs are caught at compile time; dialect-specific LIMIT/OFFSET is
//! applied at render time.
//!
//! # Example
//!
//! ```rust
//! use sqlport_core::builder::Select;
//! use sqlport_core::dialect::MssqlDialect;
//!
//! let sql = Select::with_dialect(MssqlDialect)
//!     .columns(&["id", "name"])
//!     .from("users")
//!     .filter("active = 1")
//!     .limit(10)
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT TOP 10 id, name FROM users WHERE active = 1");
//! ```

mod select;

pub use select::{HasColumns, HasFrom, NoColumns, NoFrom, Select};
