//! Column definitions

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::ColumnError;

/// The type tag of a column.
///
/// Tags drive how blank cells are initialised and how imported text is
/// interpreted; they are not enforced on stored values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Email,
}

impl ColumnType {
    /// Returns the tag as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
        }
    }

    /// The value a freshly added row holds in a column of this type.
    pub fn blank_value(&self) -> Value {
        match self {
            Self::Number => Value::Int(0),
            Self::Text | Self::Email => Value::from(""),
        }
    }

    /// Interprets a raw text cell for a column of this type.
    ///
    /// Number columns keep numeric text as a number; everything else stays text.
    pub fn parse_cell(&self, raw: &str) -> Value {
        match self {
            Self::Number => Value::parse_number(raw).unwrap_or_else(|| Value::from(raw)),
            Self::Text | Self::Email => Value::from(raw),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed, independently visible projection over rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field key the column reads from each row.
    pub id: String,
    /// Header shown to users and written to CSV exports.
    pub label: String,
    pub visible: bool,
    pub sortable: bool,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// Creates a visible, sortable column.
    pub fn new(id: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            visible: true,
            sortable: true,
            column_type,
        }
    }

    /// Creates a column whose id is derived from its label.
    ///
    /// The label is trimmed first; an empty label is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use datatable_lib::model::{Column, ColumnType};
    ///
    /// let column = Column::from_label("  Start   Date ", ColumnType::Text).unwrap();
    /// assert_eq!(column.id, "start_date");
    /// assert_eq!(column.label, "Start   Date");
    /// ```
    pub fn from_label(label: &str, column_type: ColumnType) -> Result<Self, ColumnError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ColumnError::EmptyLabel);
        }
        Ok(Self::new(column_id_from_label(label), label, column_type))
    }

    /// Sets visibility (builder pattern).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets whether the column can be sorted (builder pattern).
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }
}

/// Derives a column id: lower-cased, each whitespace run replaced by one underscore.
pub fn column_id_from_label(label: &str) -> String {
    let mut id = String::with_capacity(label.len());
    let mut in_space = false;
    for c in label.chars() {
        if c.is_whitespace() {
            if !in_space {
                id.push('_');
            }
            in_space = true;
        } else {
            id.extend(c.to_lowercase());
            in_space = false;
        }
    }
    id
}
