//! In-memory student store
//!
//! Backs the engine test-suite and small deployments that do not need a
//! database. Matching and ordering semantics mirror the Postgres repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::StudentStore;
use crate::models::{FieldValue, NewStudent, Student, StudentField};
use crate::utils::errors::{Result, StudyBuddyError};

#[derive(Debug, Default)]
struct MemoryInner {
    next_id: i64,
    rows: HashMap<i64, Student>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStudentRepository {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sorted_by_name(mut students: Vec<Student>) -> Vec<Student> {
    students.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.id.cmp(&b.id))
    });
    students
}

#[async_trait]
impl StudentStore for MemoryStudentRepository {
    async fn insert(&self, new: NewStudent) -> Result<Student> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let student = Student {
            id: inner.next_id,
            name: new.name,
            age: new.age,
            grade: new.grade,
            last_modified: Utc::now(),
        };
        inner.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update_field(&self, id: i64, field: StudentField, value: FieldValue) -> Result<Student> {
        let mut inner = self.inner.write().await;
        let student = inner
            .rows
            .get_mut(&id)
            .ok_or(StudyBuddyError::StudentNotFound { id })?;

        match (field, value) {
            (StudentField::Name, FieldValue::Text(text)) => student.name = text,
            (StudentField::Grade, FieldValue::Text(text)) => student.grade = text,
            (StudentField::Age, FieldValue::Number(number)) => student.age = number,
            (field, value) => {
                return Err(StudyBuddyError::InvalidInput(format!(
                    "Value {} does not fit field {}",
                    value,
                    field.label()
                )));
            }
        }
        student.last_modified = Utc::now();

        Ok(student.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StudyBuddyError::StudentNotFound { id })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn find_by_name_substring(&self, text: &str) -> Result<Vec<Student>> {
        let needle = text.to_lowercase();
        let inner = self.inner.read().await;
        let matches = inner
            .rows
            .values()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(sorted_by_name(matches))
    }

    async fn find_by_grade_exact(&self, grade: &str) -> Result<Vec<Student>> {
        let needle = grade.to_lowercase();
        let inner = self.inner.read().await;
        let matches = inner
            .rows
            .values()
            .filter(|s| s.grade.to_lowercase() == needle)
            .cloned()
            .collect();
        Ok(sorted_by_name(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_fresh_ids() {
        let store = MemoryStudentRepository::new();
        let first = store
            .insert(NewStudent { name: "Anna".into(), age: 10, grade: "4B".into() })
            .await
            .unwrap();
        let second = store
            .insert(NewStudent { name: "Boris".into(), age: 11, grade: "5A".into() })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_name_search_is_case_insensitive_and_ordered() {
        let store = MemoryStudentRepository::new();
        for (name, grade) in [("boris", "5A"), ("Anna", "4B"), ("ANNIKA", "4B")] {
            store
                .insert(NewStudent { name: name.into(), age: 10, grade: grade.into() })
                .await
                .unwrap();
        }

        let found = store.find_by_name_substring("ann").await.unwrap();
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "ANNIKA"]);

        let all = store.find_by_name_substring("").await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Anna");
        assert_eq!(all[2].name, "boris");
    }

    #[tokio::test]
    async fn test_grade_search_is_exact_case_insensitive() {
        let store = MemoryStudentRepository::new();
        store
            .insert(NewStudent { name: "Anna".into(), age: 10, grade: "4B".into() })
            .await
            .unwrap();
        store
            .insert(NewStudent { name: "Boris".into(), age: 11, grade: "4BX".into() })
            .await
            .unwrap();

        let found = store.find_by_grade_exact("4b").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Anna");
    }

    #[tokio::test]
    async fn test_update_field_bumps_last_modified() {
        let store = MemoryStudentRepository::new();
        let student = store
            .insert(NewStudent { name: "Anna".into(), age: 10, grade: "4B".into() })
            .await
            .unwrap();

        let updated = store
            .update_field(student.id, StudentField::Age, FieldValue::Number(11))
            .await
            .unwrap();
        assert_eq!(updated.id, student.id);
        assert_eq!(updated.age, 11);
        assert!(updated.last_modified >= student.last_modified);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let store = MemoryStudentRepository::new();
        let err = store.delete_by_id(99).await.unwrap_err();
        assert!(matches!(err, StudyBuddyError::StudentNotFound { id: 99 }));
    }
}
