//! Free-text search over rows.

use crate::model::Row;

/// A case-insensitive search term matched against every field of a row.
///
/// A row matches if any of its field values, rendered as text and
/// lower-cased, contains the lower-cased term. Fields are scanned whether or
/// not a visible column shows them, and the row id counts as a field. An empty
/// term matches every row.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Row;
/// use datatable_lib::query::SearchTerm;
///
/// let row = Row::new("2").with_name("Jane Smith");
///
/// assert!(SearchTerm::new("JANE").matches(&row));
/// assert!(SearchTerm::new("").matches(&row));
/// assert!(!SearchTerm::new("john").matches(&row));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    /// Creates a search term. The original text is kept for display.
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// Returns the term as entered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the term matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns `true` if some field of `row` contains the term.
    pub fn matches(&self, row: &Row) -> bool {
        if self.is_empty() {
            return true;
        }
        row.texts()
            .any(|text| text.to_lowercase().contains(&self.needle))
    }
}

impl From<&str> for SearchTerm {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for SearchTerm {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

/// Keeps the rows matching `term`, in storage order.
pub fn filter_rows<'a>(rows: &'a [Row], term: &SearchTerm) -> Vec<&'a Row> {
    rows.iter().filter(|row| term.matches(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("1").with_name("John Doe").with_age(28),
            Row::new("2").with_name("Jane Smith").with_age(32),
            Row::new("3")
                .with_name("Bob Johnson")
                .with_extra("notes", "Prefers JANUARY starts"),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, &SearchTerm::default()).len(), 3);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rows = rows();
        assert_eq!(ids(&filter_rows(&rows, &SearchTerm::new("jane"))), vec!["2"]);
        assert_eq!(ids(&filter_rows(&rows, &SearchTerm::new("JOHN"))), vec!["1", "3"]);
    }

    #[test]
    fn test_scans_numbers_ids_and_extra_fields() {
        let rows = rows();
        assert_eq!(ids(&filter_rows(&rows, &SearchTerm::new("32"))), vec!["2"]);
        assert_eq!(ids(&filter_rows(&rows, &SearchTerm::new("janu"))), vec!["3"]);
        assert_eq!(ids(&filter_rows(&rows, &SearchTerm::new("3"))), vec!["2", "3"]);
    }

    #[test]
    fn test_no_match() {
        let rows = rows();
        assert!(filter_rows(&rows, &SearchTerm::new("zzz")).is_empty());
    }
}
