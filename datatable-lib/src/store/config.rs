//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use super::IdStrategy;

/// Page sizes offered to users by default.
pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Configuration for a new [`TableStore`](super::TableStore).
///
/// # Example
///
/// ```
/// use datatable_lib::store::{IdStrategy, TableConfig};
///
/// let config = TableConfig::default()
///     .with_rows_per_page(25)
///     .with_id_strategy(IdStrategy::Random)
///     .with_sample_data(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Initial page size.
    ///
    /// Default: 10
    pub rows_per_page: usize,

    /// Page sizes a pagination control should offer.
    ///
    /// Default: 5, 10, 25, 50
    pub rows_per_page_options: Vec<usize>,

    /// How ids for added and imported rows are generated.
    ///
    /// Default: [`IdStrategy::Timestamp`]
    pub id_strategy: IdStrategy,

    /// Whether a new store starts with the sample rows.
    ///
    /// Default: true
    pub seed_sample_data: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 10,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
            id_strategy: IdStrategy::default(),
            seed_sample_data: true,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size. Zero is ignored.
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        if rows_per_page > 0 {
            self.rows_per_page = rows_per_page;
        }
        self
    }

    /// Sets the offered page sizes. Zero entries are dropped.
    pub fn with_rows_per_page_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.rows_per_page_options = options.into_iter().filter(|n| *n > 0).collect();
        self
    }

    /// Sets the id strategy.
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Sets whether the store starts with sample rows.
    pub fn with_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }

    /// Creates a config for an empty table (no sample rows).
    pub fn empty() -> Self {
        Self::default().with_sample_data(false)
    }
}
