//! Inline editing state

use crate::model::Row;
use crate::model::RowId;
use crate::model::RowPatch;
use crate::model::Value;

/// The ids of rows currently open for inline editing, in the order they were opened.
///
/// Membership is the only thing the store tracks about an edit; pending
/// values live in a [`RowDraft`] held by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    ids: Vec<RowId>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<RowId>) -> bool {
        let id = id.into();
        if self.contains(id.as_str()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes an id. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Pending edits for one row, kept outside the store until committed.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Row, Value};
/// use datatable_lib::store::RowDraft;
///
/// let row = Row::new("1").with_name("John Doe");
/// let mut draft = RowDraft::from_row(&row);
///
/// draft.set("name", "Johnny");
/// assert_eq!(draft.value("name"), Some(Value::from("Johnny")));
/// assert_eq!(row.name(), "John Doe");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RowDraft {
    original: Row,
    patch: RowPatch,
}

impl RowDraft {
    /// Starts a draft from the row's current values.
    pub fn from_row(row: &Row) -> Self {
        Self {
            original: row.clone(),
            patch: RowPatch::new(),
        }
    }

    pub fn id(&self) -> &RowId {
        self.original.id()
    }

    /// Records a pending value for a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.patch.insert(field, value);
    }

    /// Returns the pending value if one was set, else the row's value.
    pub fn value(&self, field: &str) -> Option<Value> {
        match self.patch.get(field) {
            Some(value) => Some(value.clone()),
            None => self.original.get(field),
        }
    }

    /// Returns `true` if any field was changed.
    pub fn is_dirty(&self) -> bool {
        self.patch.iter().any(|(field, value)| self.original.get(field).as_ref() != Some(value))
    }

    /// Discards pending values.
    pub fn reset(&mut self) {
        self.patch = RowPatch::new();
    }

    pub fn patch(&self) -> &RowPatch {
        &self.patch
    }

    /// Consumes the draft, returning the row id and the pending changes.
    pub fn into_parts(self) -> (RowId, RowPatch) {
        (self.original.id, self.patch)
    }
}
