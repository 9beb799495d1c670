//! Database module
//!
//! This module defines the record store abstraction and its backends.

pub mod connection;
pub mod repositories;

use async_trait::async_trait;

use crate::models::{FieldValue, NewStudent, Student, StudentField};
use crate::utils::errors::Result;

// Re-export commonly used database components
pub use connection::{DatabaseConfig, DatabasePool, create_pool, run_migrations};
pub use repositories::{MemoryStudentRepository, StudentRepository};

/// Persistent store of student records.
///
/// All operations are single-row or small-result-set operations against one
/// table; no cross-record transactions are required. Every mutating operation
/// bumps `last_modified`.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a new record, assigning a fresh id.
    async fn insert(&self, new: NewStudent) -> Result<Student>;

    /// Update a single field of an existing record.
    ///
    /// Returns `StudyBuddyError::StudentNotFound` when no record has that id.
    async fn update_field(&self, id: i64, field: StudentField, value: FieldValue) -> Result<Student>;

    /// Delete a record by id.
    ///
    /// Returns `StudyBuddyError::StudentNotFound` when no record has that id.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>>;

    /// Case-insensitive substring match on name, ordered by name.
    /// An empty query returns all records ordered by name.
    async fn find_by_name_substring(&self, text: &str) -> Result<Vec<Student>>;

    /// Case-insensitive exact match on grade, ordered by name.
    async fn find_by_grade_exact(&self, grade: &str) -> Result<Vec<Student>>;
}
