//! Table row with typed core fields and dynamic extras

use std::borrow::Borrow;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// Names of the fields every row carries.
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const AGE: &str = "age";
    pub const ROLE: &str = "role";
    pub const DEPARTMENT: &str = "department";
    pub const LOCATION: &str = "location";

    /// Core data fields, in the order CSV import resolves them.
    pub const CORE: [&str; 6] = [NAME, EMAIL, AGE, ROLE, DEPARTMENT, LOCATION];

    /// Returns `true` if `field` is stored in a typed slot rather than the extras map.
    pub fn is_core(field: &str) -> bool {
        field == ID || CORE.contains(&field)
    }
}

/// Stable identifier of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RowId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RowId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One record in the table.
///
/// The well-known fields (`name`, `email`, `age`, `role`, `department`,
/// `location`) are typed; fields belonging to columns added at runtime live in
/// an auxiliary map keyed by column id. Field access by name goes through
/// [`get`](Row::get) and [`set`](Row::set), which route core names to their
/// typed slots.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Row, Value};
///
/// let row = Row::new("1")
///     .with_name("John Doe")
///     .with_age(28)
///     .with_extra("start_date", "2024-01-15");
///
/// assert_eq!(row.get("age"), Some(Value::Int(28)));
/// assert_eq!(row.get("start_date"), Some(Value::from("2024-01-15")));
/// assert_eq!(row.get("department"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) age: i64,
    pub(crate) role: String,
    pub(crate) department: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) extra: BTreeMap<String, Value>,
}

impl Row {
    /// Creates a row with empty core fields.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            age: 0,
            role: String::new(),
            department: None,
            location: None,
            extra: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = age;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets a field by name (builder pattern).
    ///
    /// Core field names are coerced like [`set`](Row::set); a value that does
    /// not fit the core field is dropped with a warning.
    pub fn with_extra(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        if let Err(e) = self.set(&field, value.into()) {
            log::warn!("Ignoring value for row {}: {}", self.id, e);
        }
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &RowId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the fields stored outside the typed core.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Returns the value of a field, or `None` if the row has no such field.
    pub fn get(&self, field: &str) -> Option<Value> {
        match field {
            fields::ID => Some(Value::from(self.id.as_str())),
            fields::NAME => Some(Value::from(self.name.as_str())),
            fields::EMAIL => Some(Value::from(self.email.as_str())),
            fields::AGE => Some(Value::Int(self.age)),
            fields::ROLE => Some(Value::from(self.role.as_str())),
            fields::DEPARTMENT => self.department.as_deref().map(Value::from),
            fields::LOCATION => self.location.as_deref().map(Value::from),
            _ => self.extra.get(field).cloned(),
        }
    }

    /// Returns `true` if the row has a value for `field`.
    pub fn contains(&self, field: &str) -> bool {
        match field {
            fields::DEPARTMENT => self.department.is_some(),
            fields::LOCATION => self.location.is_some(),
            f if fields::is_core(f) => true,
            _ => self.extra.contains_key(field),
        }
    }

    /// Iterates over the text form of every present field value, id included.
    pub fn texts(&self) -> impl Iterator<Item = Cow<'_, str>> {
        let core = [
            Some(Cow::Borrowed(self.id.as_str())),
            Some(Cow::Borrowed(self.name.as_str())),
            Some(Cow::Borrowed(self.email.as_str())),
            Some(Cow::Owned(self.age.to_string())),
            Some(Cow::Borrowed(self.role.as_str())),
            self.department.as_deref().map(Cow::Borrowed),
            self.location.as_deref().map(Cow::Borrowed),
        ];
        core.into_iter().flatten().chain(
            self.extra
                .values()
                .filter(|v| !v.is_null())
                .map(Value::to_text),
        )
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Writes a field by name.
    ///
    /// Text fields accept text and render numbers as text; `age` accepts whole
    /// numbers and numeric text (empty text and null reset it to 0).
    /// `department`/`location` and extra fields are cleared by `Value::Null`.
    pub fn set(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            fields::ID => return Err(FieldError::immutable(field)),
            fields::NAME => self.name = text_of(value),
            fields::EMAIL => self.email = text_of(value),
            fields::ROLE => self.role = text_of(value),
            fields::DEPARTMENT => self.department = optional_text_of(value),
            fields::LOCATION => self.location = optional_text_of(value),
            fields::AGE => self.age = int_of(field, &value)?,
            _ => {
                if value.is_null() {
                    self.extra.remove(field);
                } else {
                    self.extra.insert(field.to_string(), value);
                }
            }
        }
        Ok(())
    }

    /// Merges a patch into the row.
    ///
    /// Either every field of the patch is applied or, on the first coercion
    /// failure, none is.
    pub fn apply(&mut self, patch: &RowPatch) -> Result<(), FieldError> {
        let mut next = self.clone();
        for (field, value) in patch.iter() {
            next.set(field, value.clone())?;
        }
        *self = next;
        Ok(())
    }
}

fn text_of(value: Value) -> String {
    match value {
        Value::Text(s) => s,
        other => other.to_string(),
    }
}

fn optional_text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(text_of(other)),
    }
}

fn int_of(field: &str, value: &Value) -> Result<i64, FieldError> {
    let mismatch = || FieldError::type_mismatch(field, "int", value.type_name());
    match value {
        Value::Null => Ok(0),
        Value::Int(n) => Ok(*n),
        Value::Float(n) => whole(*n).ok_or_else(mismatch),
        Value::Text(s) if s.trim().is_empty() => Ok(0),
        Value::Text(s) => match Value::parse_number(s) {
            Some(Value::Int(n)) => Ok(n),
            Some(Value::Float(n)) => whole(n).ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
    }
}

fn whole(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64).then_some(n as i64)
}

/// A set of field changes to merge into a row.
///
/// # Example
///
/// ```
/// use datatable_lib::model::RowPatch;
///
/// let patch = RowPatch::new()
///     .set("name", "Jane Doe")
///     .set("age", 33i64);
///
/// assert_eq!(patch.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    fields: BTreeMap<String, Value>,
}

impl RowPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field change (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Adds or replaces a field change.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the pending value for a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Drops a pending change.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RowPatch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> Row {
        Row::new("1")
            .with_name("John Doe")
            .with_email("john@example.com")
            .with_age(28)
            .with_role("Developer")
    }

    #[test]
    fn test_get_core_and_extra() {
        let row = john().with_extra("start_date", "2024-01-15");
        assert_eq!(row.get("id"), Some(Value::from("1")));
        assert_eq!(row.get("name"), Some(Value::from("John Doe")));
        assert_eq!(row.get("age"), Some(Value::Int(28)));
        assert_eq!(row.get("start_date"), Some(Value::from("2024-01-15")));
        assert_eq!(row.get("location"), None);
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_set_id_is_rejected() {
        let mut row = john();
        let err = row.set("id", Value::from("2")).unwrap_err();
        assert_eq!(err, FieldError::immutable("id"));
        assert_eq!(row.id(), &RowId::from("1"));
    }

    #[test]
    fn test_set_age_coercion() {
        let mut row = john();
        row.set("age", Value::from("41")).unwrap();
        assert_eq!(row.age(), 41);
        row.set("age", Value::Float(30.0)).unwrap();
        assert_eq!(row.age(), 30);
        row.set("age", Value::from("")).unwrap();
        assert_eq!(row.age(), 0);

        let err = row.set("age", Value::from("forty")).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { expected: "int", actual: "text", .. }));
        assert!(row.set("age", Value::Float(30.5)).is_err());
    }

    #[test]
    fn test_set_text_from_number() {
        let mut row = john();
        row.set("role", Value::Int(7)).unwrap();
        assert_eq!(row.role(), "7");
    }

    #[test]
    fn test_null_clears_optional_and_extra() {
        let mut row = john().with_department("R&D").with_extra("team", "core");
        row.set("department", Value::Null).unwrap();
        row.set("team", Value::Null).unwrap();
        assert_eq!(row.department(), None);
        assert!(!row.contains("team"));
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut row = john();
        let patch = RowPatch::new().set("name", "Johnny").set("age", "old");
        assert!(row.apply(&patch).is_err());
        assert_eq!(row, john());

        let patch = RowPatch::new().set("name", "Johnny").set("age", 29i64);
        row.apply(&patch).unwrap();
        assert_eq!(row.name(), "Johnny");
        assert_eq!(row.age(), 29);
    }

    #[test]
    fn test_texts_include_id_and_skip_absent() {
        let row = john().with_extra("score", 9.5);
        let texts: Vec<String> = row.texts().map(|t| t.into_owned()).collect();
        assert_eq!(
            texts,
            vec!["1", "John Doe", "john@example.com", "28", "Developer", "9.5"]
        );
    }

    #[test]
    fn test_with_extra_routes_core_fields() {
        let row = Row::new("9").with_extra("age", "35");
        assert_eq!(row.age(), 35);
        assert!(row.extra().is_empty());
    }
}
