//! Initial table contents

use crate::model::Column;
use crate::model::ColumnType;
use crate::model::Row;

/// The four columns every table starts with.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name", ColumnType::Text),
        Column::new("email", "Email", ColumnType::Email),
        Column::new("age", "Age", ColumnType::Number),
        Column::new("role", "Role", ColumnType::Text),
    ]
}

/// Sample rows a new store is seeded with.
pub fn sample_rows() -> Vec<Row> {
    [
        ("1", "John Doe", "john@example.com", 28, "Developer"),
        ("2", "Jane Smith", "jane@example.com", 32, "Designer"),
        ("3", "Bob Johnson", "bob@example.com", 45, "Manager"),
        ("4", "Alice Brown", "alice@example.com", 29, "Developer"),
        ("5", "Charlie Wilson", "charlie@example.com", 35, "Analyst"),
    ]
    .into_iter()
    .map(|(id, name, email, age, role)| {
        Row::new(id)
            .with_name(name)
            .with_email(email)
            .with_age(age)
            .with_role(role)
    })
    .collect()
}
