//! Presentation adapter
//!
//! Formats query results, confirmations and menus for display, and defines
//! the outbound sink the engine talks to. Transports implement
//! `PresentationSink`; the engine never deals with transport details.

use async_trait::async_trait;

use crate::models::Student;
use crate::utils::errors::Result;

/// A labeled choice offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub token: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Rows of labeled choices rendered alongside a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    pub rows: Vec<Vec<MenuItem>>,
}

impl Menu {
    pub fn new(rows: Vec<Vec<MenuItem>>) -> Self {
        Self { rows }
    }

    /// One item per row.
    pub fn single_column(items: Vec<MenuItem>) -> Self {
        Self {
            rows: items.into_iter().map(|item| vec![item]).collect(),
        }
    }
}

/// Outbound presentation sink.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    /// Display a message to the user, optionally with a menu of choices.
    async fn send(&self, user_id: i64, text: &str, menu: Option<Menu>) -> Result<()>;
}

/// One-line summary of a student record.
pub fn format_student(student: &Student) -> String {
    format!(
        "#{} {}, age {}, grade {} (updated {})",
        student.id,
        student.name,
        student.age,
        student.grade,
        student.last_modified.format("%Y-%m-%d %H:%M")
    )
}

/// Short form used in disambiguation lists.
pub fn format_candidate(student: &Student) -> String {
    format!("{}: {}, age {}, grade {}", student.id, student.name, student.age, student.grade)
}

/// Format a search result set.
pub fn format_search_results(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let mut out = String::from("Found students:\n");
    for student in students {
        out.push_str(&format!("  {}\n", format_student(student)));
    }
    out
}

/// Format a disambiguation candidate list.
pub fn format_candidates(students: &[Student]) -> String {
    let mut out = String::from("Several students match:\n");
    for student in students {
        out.push_str(&format!("  {}\n", format_candidate(student)));
    }
    out.push_str("Enter an ID to pick one:");
    out
}

/// Menu offered after selecting a student to edit.
pub fn field_menu() -> Menu {
    Menu::single_column(vec![
        MenuItem::new("Name", crate::engine::tokens::FIELD_NAME),
        MenuItem::new("Age", crate::engine::tokens::FIELD_AGE),
        MenuItem::new("Grade", crate::engine::tokens::FIELD_GRADE),
        MenuItem::new("Cancel", crate::engine::tokens::EDIT_CANCEL),
    ])
}

/// Confirmation menu for the delete flow.
pub fn confirm_menu() -> Menu {
    Menu::new(vec![vec![
        MenuItem::new("Yes, delete", crate::engine::tokens::DELETE_CONFIRM),
        MenuItem::new("No", crate::engine::tokens::DELETE_CANCEL),
    ]])
}

/// The main menu of record operations.
pub fn main_menu() -> Menu {
    Menu::single_column(vec![
        MenuItem::new("Add a student", "flow:add"),
        MenuItem::new("Edit a student", "flow:edit"),
        MenuItem::new("Delete a student", "flow:del"),
        MenuItem::new("Find by name", "flow:find_by_name"),
        MenuItem::new("Find by grade", "flow:find_by_grade"),
        MenuItem::new("Help", "menu:help"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn student() -> Student {
        Student {
            id: 1,
            name: "Anna".to_string(),
            age: 10,
            grade: "4B".to_string(),
            last_modified: Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_student() {
        let text = format_student(&student());
        assert!(text.contains("#1 Anna"));
        assert!(text.contains("grade 4B"));
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(format_search_results(&[]), "No students found.");
    }

    #[test]
    fn test_candidates_prompt_for_id() {
        let text = format_candidates(&[student()]);
        assert!(text.contains("1: Anna"));
        assert!(text.ends_with("Enter an ID to pick one:"));
    }
}
