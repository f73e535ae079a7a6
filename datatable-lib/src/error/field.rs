//! FieldError for Row patches

/// Error type for writing a field value into a [`Row`](crate::model::Row).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The field cannot be changed once the row exists.
    #[error("Field '{field}' is immutable")]
    Immutable { field: String },

    /// The value cannot be coerced into the field's type.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new immutable field error.
    pub fn immutable(field: impl Into<String>) -> Self {
        Self::Immutable {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Returns the name of the field that was rejected.
    pub fn field(&self) -> &str {
        match self {
            Self::Immutable { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}
