//! CSV import

use std::io::Read;

use csv::ReaderBuilder;
use csv::StringRecord;

use crate::error::ImportError;
use crate::model::Column;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Value;
use crate::model::fields;

/// Parses a CSV document into rows without touching any table.
///
/// The first record is the header row. For every data record:
///
/// - the core fields take the value under their lower-case header, falling
///   back to the capitalized header (`name`, then `Name`) when the first is
///   absent or empty; missing text fields become empty strings
/// - `age` keeps the leading integer of its text (`"28 years"` is 28), or 0
/// - every other non-empty cell becomes an extra field; a header equal to a
///   column's label is stored under that column's id and parsed by its type
/// - an `id` header is ignored, the row id comes from `make_id(index)`
///
/// Blank lines are skipped. A short record reads its missing trailing cells
/// as absent, the same as empty cells. A record with more cells than headers
/// fails the whole import, since the extra cells have no field to be stored
/// under.
pub fn parse_csv<R, F>(input: R, columns: &[Column], mut make_id: F) -> Result<Vec<Row>, ImportError>
where
    R: Read,
    F: FnMut(usize) -> RowId,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let targets = resolve_headers(&headers, columns);

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(ImportError::mapping(
                index,
                format!(
                    "record has {} fields but the header has {}",
                    record.len(),
                    headers.len()
                ),
            ));
        }
        rows.push(map_record(&headers, &targets, &record, make_id(index)));
    }

    log::debug!("Parsed {} CSV rows with {} headers", rows.len(), headers.len());
    Ok(rows)
}

/// Where a header's cells are stored.
#[derive(Debug, Clone, PartialEq)]
enum Target<'a> {
    /// The `id` header; its cells are never read.
    Ignore,
    /// A core field slot.
    Core(&'static str),
    /// Extra field, parsed by the column type when there is a column.
    Extra { key: String, column: Option<&'a Column> },
}

/// Maps each header to its target.
///
/// A header equal to the label of a non-core column belongs to that column,
/// even when it also spells a capitalized core field (`Department`). Headers
/// naming a core field, or the label of a core column, feed that field.
fn resolve_headers<'a>(headers: &StringRecord, columns: &'a [Column]) -> Vec<Target<'a>> {
    headers
        .iter()
        .map(|header| {
            if header == fields::ID {
                return Target::Ignore;
            }
            if let Some(c) = columns
                .iter()
                .find(|c| c.label == header && !fields::is_core(&c.id))
            {
                return Target::Extra {
                    key: c.id.clone(),
                    column: Some(c),
                };
            }
            if let Some(field) = core_field_of_header(header) {
                return Target::Core(field);
            }
            let column = columns
                .iter()
                .find(|c| c.id == header)
                .or_else(|| columns.iter().find(|c| c.label == header));
            match column {
                Some(c) => match core_field(&c.id) {
                    Some(field) => Target::Core(field),
                    None => Target::Extra {
                        key: c.id.clone(),
                        column: Some(c),
                    },
                },
                None => Target::Extra {
                    key: header.to_string(),
                    column: None,
                },
            }
        })
        .collect()
}

fn core_field(id: &str) -> Option<&'static str> {
    fields::CORE.iter().copied().find(|f| *f == id)
}

fn core_field_of_header(header: &str) -> Option<&'static str> {
    fields::CORE
        .iter()
        .copied()
        .find(|f| header == *f || header == capitalize(f))
}

fn map_record(headers: &StringRecord, targets: &[Target<'_>], record: &StringRecord, id: RowId) -> Row {
    // Lower-case header first, then capitalized, then any core column label.
    let lookup = |field: &'static str| -> String {
        let capitalized = capitalize(field);
        let rank = |header: &str| {
            if header == field {
                0
            } else if header == capitalized {
                1
            } else {
                2
            }
        };
        let mut positions: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Target::Core(field))
            .map(|(i, _)| i)
            .collect();
        positions.sort_by_key(|i| rank(headers.get(*i).unwrap_or_default()));
        positions
            .into_iter()
            .filter_map(|i| record.get(i))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
            .to_string()
    };

    let mut row = Row::new(id)
        .with_name(lookup(fields::NAME))
        .with_email(lookup(fields::EMAIL))
        .with_age(leading_int(&lookup(fields::AGE)).unwrap_or(0))
        .with_role(lookup(fields::ROLE))
        .with_department(lookup(fields::DEPARTMENT))
        .with_location(lookup(fields::LOCATION));

    for (target, raw) in targets.iter().zip(record.iter()) {
        let Target::Extra { key, column } = target else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let value = match column {
            Some(c) => c.column_type.parse_cell(raw),
            None => Value::from(raw),
        };
        row.extra.insert(key.clone(), value);
    }

    row
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reads the leading decimal integer of `input`, ignoring leading whitespace.
///
/// Returns `None` when no digits follow the optional sign. Values beyond the
/// `i64` range saturate.
pub fn leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    seen.then_some(if negative { -value } else { value })
}
