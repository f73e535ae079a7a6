//! CSV export

use std::io::Write;

use chrono::NaiveDate;
use chrono::Utc;
use csv::Writer;

use crate::error::ExportError;
use crate::model::Column;
use crate::model::Row;

/// Which rows an export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportScope {
    /// Every row in storage order, ignoring search and sort.
    #[default]
    All,
    /// The searched and sorted sequence, across all pages.
    View,
}

/// Writes rows as CSV, one output column per visible column.
///
/// The header row holds column labels. Cells a row has no value for are
/// written empty. The header is written even when there are no rows; nothing
/// is written when no column is visible.
pub fn write_csv<'a, W, I>(output: W, rows: I, columns: &[Column]) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Row>,
{
    let visible: Vec<&Column> = columns.iter().filter(|c| c.visible).collect();
    if visible.is_empty() {
        return Ok(0);
    }

    let mut writer = Writer::from_writer(output);
    writer.write_record(visible.iter().map(|c| c.label.as_str()))?;

    let mut written = 0;
    for row in rows {
        let cells: Vec<String> = visible
            .iter()
            .map(|c| row.get(&c.id).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        writer.write_record(&cells)?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// Renders rows as a CSV string. See [`write_csv`].
pub fn export_to_string<'a, I>(rows: I, columns: &[Column]) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows, columns)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// File name for an export made on `date`: `table_export_YYYY-MM-DD.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("table_export_{}.csv", date.format("%Y-%m-%d"))
}

/// File name for an export made today (UTC).
pub fn export_file_name_today() -> String {
    export_file_name(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name", ColumnType::Text),
            Column::new("email", "Email", ColumnType::Email).visible(false),
            Column::new("age", "Age", ColumnType::Number),
            Column::new("start_date", "Start Date", ColumnType::Text),
        ]
    }

    #[test]
    fn test_visible_columns_with_labels() {
        let rows = vec![
            Row::new("1")
                .with_name("John Doe")
                .with_email("john@example.com")
                .with_age(28)
                .with_extra("start_date", "2024-01-15"),
            Row::new("2").with_name("Doe, Jane").with_age(32),
        ];

        let csv = export_to_string(&rows, &columns()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Name,Age,Start Date",
                "John Doe,28,2024-01-15",
                "\"Doe, Jane\",32,",
            ]
        );
    }

    #[test]
    fn test_header_only_without_rows() {
        let csv = export_to_string(std::iter::empty(), &columns()).unwrap();
        assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["Name,Age,Start Date"]);
    }

    #[test]
    fn test_nothing_without_visible_columns() {
        let columns = vec![Column::new("name", "Name", ColumnType::Text).visible(false)];
        let rows = vec![Row::new("1").with_name("John Doe")];
        let mut buffer = Vec::new();
        assert_eq!(write_csv(&mut buffer, &rows, &columns).unwrap(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "table_export_2024-03-09.csv");
        assert!(export_file_name_today().starts_with("table_export_"));
    }
}
