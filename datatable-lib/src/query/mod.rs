//! Derivation of the visible table page.
//!
//! Every read recomputes the view from raw state through a fixed pipeline:
//!
//! 1. [`SearchTerm`] keeps rows where any field contains the term
//! 2. [`SortConfig`] stable-sorts the survivors on one column
//! 3. [`page_bounds`] slices out the requested page
//! 4. [`ViewRow::project`] reduces each row to the visible columns
//!
//! [`derive_page`] runs all four stages; [`filter_and_sort`] stops after the
//! second for callers that need the whole ordered sequence.

mod filter;
mod order;
mod page;

pub use filter::SearchTerm;
pub use filter::filter_rows;
pub use order::Direction;
pub use order::SortConfig;
pub use order::sort_rows;
pub use page::Cell;
pub use page::Page;
pub use page::ViewRow;
pub use page::page_bounds;
pub use page::total_pages;

use crate::model::Column;
use crate::model::Row;
use crate::model::RowId;

/// The view cursor: search, sort and pagination settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub search: SearchTerm,
    pub sort: Option<SortConfig>,
    /// Zero-based page index. Not clamped; a page past the end is empty.
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: SearchTerm::default(),
            sort: None,
            page: 0,
            rows_per_page: 10,
        }
    }
}

impl Query {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            rows_per_page,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, term: impl Into<SearchTerm>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// Runs the filter and sort stages, returning every matching row in view order.
pub fn filter_and_sort<'a>(rows: &'a [Row], search: &SearchTerm, sort: Option<&SortConfig>) -> Vec<&'a Row> {
    let mut view = filter_rows(rows, search);
    if let Some(sort) = sort {
        sort_rows(&mut view, sort);
    }
    view
}

/// Derives the visible page from raw table state.
///
/// `is_editing` reports whether a row is open for inline editing; the flag is
/// carried into each [`ViewRow`].
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Column, ColumnType, Row};
/// use datatable_lib::query::{derive_page, Query, SortConfig};
///
/// let rows = vec![
///     Row::new("1").with_name("John Doe").with_age(28),
///     Row::new("2").with_name("Jane Smith").with_age(32),
/// ];
/// let columns = vec![Column::new("name", "Name", ColumnType::Text)];
///
/// let query = Query::new(1).with_sort(SortConfig::desc("age"));
/// let page = derive_page(&rows, &columns, &query, |_| false);
///
/// assert_eq!(page.total_count(), 2);
/// assert_eq!(page.rows()[0].id.as_str(), "2");
/// ```
pub fn derive_page<F>(rows: &[Row], columns: &[Column], query: &Query, is_editing: F) -> Page
where
    F: Fn(&RowId) -> bool,
{
    let view = filter_and_sort(rows, &query.search, query.sort.as_ref());
    let total_count = view.len();
    let bounds = page_bounds(total_count, query.page, query.rows_per_page);

    let rows = view[bounds]
        .iter()
        .map(|row| ViewRow::project(row, columns, is_editing(row.id())))
        .collect();

    Page::new(rows, query.page, query.rows_per_page, total_count)
}
