//! Ordering of the derived view.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Descending order (Z-A, 9-0).
    #[serde(alias = "descending")]
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active sort of a table: one column key and a direction.
///
/// Sorting never touches storage order; it only shapes the derived view.
///
/// # Example
///
/// ```
/// use datatable_lib::query::{Direction, SortConfig};
///
/// let sort = SortConfig::desc("age");
/// assert_eq!(sort.direction, Direction::Desc);
/// assert_eq!(sort.toggled(), SortConfig::asc("age"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: Direction,
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Asc)
    }

    /// Creates a descending sort on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Desc)
    }

    /// Returns the same key with the opposite direction.
    pub fn toggled(&self) -> Self {
        Self::new(self.key.clone(), self.direction.reverse())
    }

    /// Compares two rows on the configured key.
    ///
    /// Absent fields compare as `Value::Null`. Equal keys return
    /// `Ordering::Equal` in both directions.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let a = a.get(&self.key).unwrap_or_default();
        let b = b.get(&self.key).unwrap_or_default();
        self.direction.apply(a.natural_cmp(&b))
    }
}

/// Stable-sorts rows on the configured key.
///
/// Each row's key is extracted once; rows with equal keys keep their relative
/// order in either direction.
pub fn sort_rows(rows: &mut Vec<&Row>, config: &SortConfig) {
    let mut keyed: Vec<(Value, &Row)> = rows
        .drain(..)
        .map(|row| (row.get(&config.key).unwrap_or_default(), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| config.direction.apply(a.natural_cmp(b)));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}
