//! ORDER BY bookkeeping.
//!
//! [`OrderSpec`] keeps the ordering entries in the order they were registered.
//! Dialects that emulate OFFSET by sorting in the opposite direction ask it for
//! its [`inverted`](OrderSpec::inverted) form, which is derived on demand and
//! therefore always has the same entries as the original with each direction
//! flipped.

use std::fmt;

/// Sort direction of an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderEntry {
    /// Column (or expression) in the result set.
    pub column: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl OrderEntry {
    /// Creates an ORDER BY entry.
    #[must_use]
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

impl fmt::Display for OrderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}

/// Ordered list of ORDER BY entries; earlier entries take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSpec {
    entries: Vec<OrderEntry>,
}

impl OrderSpec {
    /// Creates an empty ordering.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry after the existing ones.
    pub fn push(&mut self, column: impl Into<String>, direction: OrderDirection) {
        self.entries.push(OrderEntry::new(column, direction));
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no ordering has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderEntry> {
        self.entries.iter()
    }

    /// Returns the same entries, in the same order, with every direction flipped.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|e| OrderEntry::new(e.column.clone(), e.direction.inverted()))
                .collect(),
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Renders the entries as they appear after `ORDER BY`, e.g. `name ASC, id DESC`.
impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
