//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect with native `LIMIT ... OFFSET ...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Pagination;
    use crate::order::{OrderDirection, OrderSpec};

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
    }

    #[test]
    fn test_paginate_without_page_is_identity() {
        let sql = GenericDialect
            .paginate("SELECT id FROM users".into(), None, &OrderSpec::new())
            .unwrap();
        assert_eq!(sql, "SELECT id FROM users");
    }

    #[test]
    fn test_paginate_limit_only() {
        let sql = GenericDialect
            .paginate(
                "SELECT id FROM users".into(),
                Some(Pagination::new(10, 0)),
                &OrderSpec::new(),
            )
            .unwrap();
        assert_eq!(sql, "SELECT id FROM users LIMIT 10");
    }

    #[test]
    fn test_paginate_offset_needs_no_order() {
        let sql = GenericDialect
            .paginate(
                "SELECT id FROM users".into(),
                Some(Pagination::new(10, 20)),
                &OrderSpec::new(),
            )
            .unwrap();
        assert_eq!(sql, "SELECT id FROM users LIMIT 10 OFFSET 20");

        let mut order = OrderSpec::new();
        order.push("id", OrderDirection::Asc);
        let sql = GenericDialect
            .paginate(
                "SELECT id FROM users ORDER BY id ASC".into(),
                Some(Pagination::new(5, 5)),
                &order,
            )
            .unwrap();
        assert_eq!(sql, "SELECT id FROM users ORDER BY id ASC LIMIT 5 OFFSET 5");
    }
}
