//! Page type for the derived table view.

use std::ops::Range;

use crate::model::Column;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Value;

/// One projected cell: the value a row holds for a visible column.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub column_id: String,
    /// `None` when the row has no value for the column.
    pub value: Option<Value>,
}

impl Cell {
    /// Returns the display text; absent values render empty.
    pub fn text(&self) -> String {
        self.value.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

/// A row reduced to the visible columns, in column-definition order.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub id: RowId,
    pub cells: Vec<Cell>,
    /// Whether the row is currently open for inline editing.
    pub editing: bool,
}

impl ViewRow {
    /// Projects `row` onto the visible entries of `columns`.
    pub fn project(row: &Row, columns: &[Column], editing: bool) -> Self {
        let cells = columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| Cell {
                column_id: c.id.clone(),
                value: row.get(&c.id),
            })
            .collect();
        Self {
            id: row.id().clone(),
            cells,
            editing,
        }
    }

    /// Returns the cell value for a column, if the column is projected and set.
    pub fn get(&self, column_id: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|c| c.column_id == column_id)
            .and_then(|c| c.value.as_ref())
    }

    /// Returns the display text of every cell.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(Cell::text).collect()
    }
}

/// A page of the derived view with the information pagination controls need.
///
/// # Example
///
/// ```ignore
/// let page = store.page();
///
/// for row in page.rows() {
///     println!("{}: {:?}", row.id, row.texts());
/// }
///
/// println!("page {} of {}", page.page_index() + 1, page.total_pages());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    rows: Vec<ViewRow>,
    page_index: usize,
    rows_per_page: usize,
    /// Number of rows that passed the filter, across all pages.
    total_count: usize,
}

impl Page {
    /// Creates a new page.
    pub fn new(rows: Vec<ViewRow>, page_index: usize, rows_per_page: usize, total_count: usize) -> Self {
        Self {
            rows,
            page_index,
            rows_per_page,
            total_count,
        }
    }

    /// Returns the rows on this page.
    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<ViewRow> {
        self.rows
    }

    /// Zero-based index of this page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Number of filtered rows across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of pages needed to show every filtered row.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.rows_per_page)
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if a later page holds more rows.
    pub fn has_more(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages()
    }
}

/// Number of pages of `rows_per_page` needed for `total` rows.
pub fn total_pages(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total.div_ceil(rows_per_page)
}

/// Index range of page `page` within a sequence of `total` rows.
///
/// A page past the end yields an empty range.
pub fn page_bounds(total: usize, page: usize, rows_per_page: usize) -> Range<usize> {
    let start = page.saturating_mul(rows_per_page).min(total);
    let end = start.saturating_add(rows_per_page).min(total);
    start..end
}
