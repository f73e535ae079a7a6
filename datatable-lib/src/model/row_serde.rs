//! Flat map serialization for Row.
//!
//! A row serializes as a single map: `id`, the core fields, then every extra
//! field under its column id. `department` and `location` are omitted while
//! unset, extra fields holding `Value::Null` are skipped.
//!
//! ```json
//! {"id": "1", "name": "John Doe", "email": "john@example.com", "age": 28,
//!  "role": "Developer", "start_date": "2024-01-15"}
//! ```
//!
//! Deserialization accepts the same shape. `id` is required and may be a
//! string or a number; missing core fields take their empty defaults.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Row;
use super::Value;
use super::fields;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry(fields::ID, self.id.as_str())?;
        map.serialize_entry(fields::NAME, &self.name)?;
        map.serialize_entry(fields::EMAIL, &self.email)?;
        map.serialize_entry(fields::AGE, &self.age)?;
        map.serialize_entry(fields::ROLE, &self.role)?;
        if let Some(department) = &self.department {
            map.serialize_entry(fields::DEPARTMENT, department)?;
        }
        if let Some(location) = &self.location {
            map.serialize_entry(fields::LOCATION, location)?;
        }

        for (key, value) in &self.extra {
            if !value.is_null() {
                map.serialize_entry(key, value)?;
            }
        }

        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a table row")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Row, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut id: Option<String> = None;
        let mut values: Vec<(String, Value)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: Value = map.next_value()?;
            if key == fields::ID {
                id = match value {
                    Value::Null => None,
                    other => Some(other.to_string()),
                };
            } else {
                values.push((key, value));
            }
        }

        let id = id.ok_or_else(|| de::Error::missing_field(fields::ID))?;
        let mut row = Row::new(id);
        for (key, value) in values {
            row.set(&key, value).map_err(de::Error::custom)?;
        }

        Ok(row)
    }
}
