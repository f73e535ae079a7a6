//! The table store
//!
//! [`TableStore`] owns rows, column definitions, the view cursor and the edit
//! set. Mutations take `&mut self` and complete before the next can begin;
//! reads derive the visible page from raw state on every call.

mod config;
mod edit;
mod ids;
mod seed;

pub use config::*;
pub use edit::*;
pub use ids::*;
pub use seed::*;

use std::io::Read;
use std::io::Write;

use crate::error::ColumnError;
use crate::error::ExportError;
use crate::error::FieldError;
use crate::error::ImportError;
use crate::exchange;
use crate::exchange::ExportScope;
use crate::model::Column;
use crate::model::ColumnType;
use crate::model::Row;
use crate::model::RowId;
use crate::model::RowPatch;
use crate::model::fields;
use crate::query;
use crate::query::Page;
use crate::query::Query;
use crate::query::SearchTerm;
use crate::query::SortConfig;

/// Single source of truth for a table's rows, columns and view cursor.
///
/// # Example
///
/// ```
/// use datatable_lib::query::SortConfig;
/// use datatable_lib::store::{TableConfig, TableStore};
///
/// let mut store = TableStore::new(TableConfig::default());
///
/// store.set_search_term("developer");
/// store.set_sort(Some(SortConfig::desc("age")));
///
/// let page = store.page();
/// assert_eq!(page.total_count(), 2);
/// assert_eq!(page.rows()[0].id.as_str(), "4");
/// ```
#[derive(Debug, Clone)]
pub struct TableStore {
    rows: Vec<Row>,
    columns: Vec<Column>,
    query: Query,
    editing: EditSet,
    ids: IdGenerator,
    config: TableConfig,
}

impl TableStore {
    /// Creates a store with the default columns, seeded per `config`.
    pub fn new(config: TableConfig) -> Self {
        let rows = if config.seed_sample_data {
            sample_rows()
        } else {
            Vec::new()
        };
        Self::with_data(config, rows, default_columns())
    }

    /// Creates a store from explicit rows and columns.
    pub fn with_data(config: TableConfig, rows: Vec<Row>, columns: Vec<Column>) -> Self {
        let rows_per_page = config.rows_per_page.max(1);
        Self {
            rows,
            columns,
            query: Query::new(rows_per_page),
            editing: EditSet::new(),
            ids: IdGenerator::new(config.id_strategy),
            config,
        }
    }

    // =========================================================================
    // Row mutations
    // =========================================================================

    /// Replaces the whole row collection. Duplicate ids are accepted.
    pub fn replace_all_rows(&mut self, rows: Vec<Row>) {
        log::debug!("Replacing {} rows with {}", self.rows.len(), rows.len());
        self.rows = rows;
    }

    /// Appends a row. The caller is responsible for a unique id.
    pub fn insert_row(&mut self, row: Row) {
        log::debug!("Inserting row {}", row.id());
        self.rows.push(row);
    }

    /// Merges `patch` into the row with `id`.
    ///
    /// Returns `Ok(false)` if no row matches. On a coercion error the row is
    /// left unchanged.
    pub fn update_row(&mut self, id: &str, patch: RowPatch) -> Result<bool, FieldError> {
        let Some(row) = self.rows.iter_mut().find(|r| r.id() == id) else {
            log::debug!("Update for unknown row {}", id);
            return Ok(false);
        };
        row.apply(&patch)?;
        log::debug!("Updated {} fields of row {}", patch.len(), id);
        Ok(true)
    }

    /// Removes the row with `id`. Returns `false` if absent.
    ///
    /// Confirmation is the caller's concern. The id also leaves the edit set.
    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id() != id);
        let removed = self.rows.len() != before;
        if removed {
            self.editing.remove(id);
            log::debug!("Deleted row {}", id);
        }
        removed
    }

    /// Adds a blank row for the visible columns and opens it for editing.
    ///
    /// Number columns start at 0, all others at the empty string.
    pub fn add_blank_row(&mut self) -> RowId {
        let id = self.ids.new_row_id();
        let mut row = Row::new(id.clone());
        for column in self.columns.iter().filter(|c| c.visible) {
            if let Err(e) = row.set(&column.id, column.column_type.blank_value()) {
                log::warn!("Cannot initialise column {} of new row: {}", column.id, e);
            }
        }
        self.insert_row(row);
        self.editing.insert(id.clone());
        id
    }

    // =========================================================================
    // View cursor
    // =========================================================================

    /// Replaces the active sort. Storage order is untouched.
    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.query.sort = sort;
    }

    /// Header-click sorting: ascending on a new column, flipped on the active one.
    ///
    /// Returns the new sort, or `None` (and changes nothing) if the column is
    /// unknown or not sortable.
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<SortConfig> {
        if !self.column(column_id).is_some_and(|c| c.sortable) {
            log::warn!("Column {} cannot be sorted", column_id);
            return None;
        }
        let next = match &self.query.sort {
            Some(current) if current.key == column_id => current.toggled(),
            _ => SortConfig::asc(column_id),
        };
        self.query.sort = Some(next.clone());
        Some(next)
    }

    /// Replaces the search term and returns to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search = SearchTerm::new(term);
        self.query.page = 0;
    }

    /// Moves to a page. Not clamped; a page past the end derives empty.
    pub fn set_current_page(&mut self, page: usize) {
        self.query.page = page;
    }

    /// Changes the page size and returns to the first page.
    ///
    /// A size of zero is rejected and returns `false`.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        if rows_per_page == 0 {
            log::warn!("Ignoring page size of zero");
            return false;
        }
        self.query.rows_per_page = rows_per_page;
        self.query.page = 0;
        true
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Shows or hides a column. Returns `false` if the column is unknown.
    ///
    /// Row data is never touched.
    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> bool {
        match self.columns.iter_mut().find(|c| c.id == column_id) {
            Some(column) => {
                column.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Appends a column definition.
    ///
    /// Existing rows are not populated; they read as absent for the new column.
    /// The id `id` is reserved for the row identifier.
    pub fn add_column(&mut self, column: Column) -> Result<(), ColumnError> {
        if column.id.is_empty() {
            return Err(ColumnError::EmptyLabel);
        }
        if column.id == fields::ID {
            log::warn!("Rejecting column with reserved id {}", column.id);
            return Err(ColumnError::reserved(column.id));
        }
        if self.column(&column.id).is_some() {
            log::warn!("Rejecting duplicate column {}", column.id);
            return Err(ColumnError::duplicate(column.id));
        }
        log::debug!("Adding column {} ({})", column.id, column.column_type);
        self.columns.push(column);
        Ok(())
    }

    /// Adds a visible, sortable column named `label`, returning its derived id.
    pub fn add_column_labeled(&mut self, label: &str, column_type: ColumnType) -> Result<String, ColumnError> {
        let column = Column::from_label(label, column_type)?;
        let id = column.id.clone();
        self.add_column(column)?;
        Ok(id)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Opens or closes a row for editing. Idempotent.
    pub fn mark_editing(&mut self, id: &str, editing: bool) {
        if editing {
            self.editing.insert(id);
        } else {
            self.editing.remove(id);
        }
    }

    /// Closes every open edit. Pending drafts are the caller's to commit or drop.
    pub fn clear_edit_set(&mut self) {
        self.editing.clear();
    }

    /// Opens a row for editing and returns a draft seeded from it.
    pub fn begin_edit(&mut self, id: &str) -> Option<RowDraft> {
        let draft = RowDraft::from_row(self.row(id)?);
        self.editing.insert(id);
        Some(draft)
    }

    /// Applies `patch` to a row and closes its edit.
    ///
    /// On a coercion error the row stays open for editing.
    pub fn save_row(&mut self, id: &str, patch: RowPatch) -> Result<bool, FieldError> {
        let updated = self.update_row(id, patch)?;
        self.editing.remove(id);
        Ok(updated)
    }

    /// Closes a row's edit without changing it.
    pub fn cancel_row(&mut self, id: &str) {
        self.editing.remove(id);
    }

    /// Saves a draft's pending changes. See [`save_row`](Self::save_row).
    pub fn commit_draft(&mut self, draft: RowDraft) -> Result<bool, FieldError> {
        let (id, patch) = draft.into_parts();
        self.save_row(id.as_str(), patch)
    }

    // =========================================================================
    // CSV
    // =========================================================================

    /// Appends the rows of a CSV document.
    ///
    /// The document is parsed completely before the table changes; on error
    /// nothing is added. Returns the number of rows imported.
    pub fn import_csv<R: Read>(&mut self, input: R) -> Result<usize, ImportError> {
        let stamp = self.ids.import_stamp();
        let imported = exchange::parse_csv(input, &self.columns, |index| {
            imported_row_id(&stamp, index)
        })
        .inspect_err(|e| log::warn!("CSV import failed: {}", e))?;

        let count = imported.len();
        self.rows.extend(imported);
        log::info!("Imported {} rows", count);
        Ok(count)
    }

    /// Writes the visible columns of the rows in `scope` as CSV.
    ///
    /// Returns the number of data rows written.
    pub fn export_csv<W: Write>(&self, output: W, scope: ExportScope) -> Result<usize, ExportError> {
        let written = match scope {
            ExportScope::All => exchange::write_csv(output, &self.rows, &self.columns)?,
            ExportScope::View => {
                let view = query::filter_and_sort(&self.rows, &self.query.search, self.query.sort.as_ref());
                exchange::write_csv(output, view, &self.columns)?
            }
        };
        log::info!("Exported {} rows", written);
        Ok(written)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Derives the current page.
    pub fn page(&self) -> Page {
        query::derive_page(&self.rows, &self.columns, &self.query, |id| {
            self.editing.contains(id.as_str())
        })
    }

    /// Number of rows passing the current search.
    pub fn filtered_count(&self) -> usize {
        query::filter_rows(&self.rows, &self.query.search).len()
    }

    /// Number of pages at the current page size.
    pub fn total_pages(&self) -> usize {
        query::total_pages(self.filtered_count(), self.query.rows_per_page)
    }

    /// All rows in storage order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The first row with `id`.
    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.query.sort.as_ref()
    }

    pub fn search_term(&self) -> &str {
        self.query.search.as_str()
    }

    pub fn current_page(&self) -> usize {
        self.query.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.query.rows_per_page
    }

    pub fn edit_set(&self) -> &EditSet {
        &self.editing
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.contains(id)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}
