//! Student model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A single student record.
///
/// The id is assigned by the store on creation and never changes; every other
/// field may be updated individually through the edit flow. `last_modified` is
/// bumped on create and on every field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub grade: String,
    pub last_modified: DateTime<Utc>,
}

/// Fields collected by the add flow, ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub grade: String,
}

/// The fixed set of editable student fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentField {
    Name,
    Age,
    Grade,
}

impl StudentField {
    /// Parse a field name as entered by the user or carried in a selection token.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "name" => Some(StudentField::Name),
            "age" => Some(StudentField::Age),
            "grade" => Some(StudentField::Grade),
            _ => None,
        }
    }

    /// Database column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            StudentField::Name => "name",
            StudentField::Age => "age",
            StudentField::Grade => "grade",
        }
    }

    /// Human-readable label for prompts and confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            StudentField::Name => "name",
            StudentField::Age => "age",
            StudentField::Grade => "grade",
        }
    }
}

/// A validated value for a single-field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(i32),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse() {
        assert_eq!(StudentField::parse("name"), Some(StudentField::Name));
        assert_eq!(StudentField::parse(" AGE "), Some(StudentField::Age));
        assert_eq!(StudentField::parse("grade"), Some(StudentField::Grade));
        assert_eq!(StudentField::parse("height"), None);
    }

    #[test]
    fn test_field_column_mapping() {
        assert_eq!(StudentField::Name.column(), "name");
        assert_eq!(StudentField::Age.column(), "age");
        assert_eq!(StudentField::Grade.column(), "grade");
    }
}
