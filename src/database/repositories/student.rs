//! Student repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;

use crate::database::StudentStore;
use crate::models::{FieldValue, NewStudent, Student, StudentField};
use crate::utils::errors::{Result, StudyBuddyError};

#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn insert(&self, new: NewStudent) -> Result<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, age, grade, last_modified)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, grade, last_modified
            "#
        )
        .bind(new.name)
        .bind(new.age)
        .bind(new.grade)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    async fn update_field(&self, id: i64, field: StudentField, value: FieldValue) -> Result<Student> {
        // Column name comes from the StudentField whitelist, never from user input.
        let sql = format!(
            r#"
            UPDATE students
            SET {} = $2, last_modified = $3
            WHERE id = $1
            RETURNING id, name, age, grade, last_modified
            "#,
            field.column()
        );

        let query = sqlx::query_as::<_, Student>(&sql).bind(id);
        let query = match value {
            FieldValue::Text(text) => query.bind(text),
            FieldValue::Number(number) => query.bind(number),
        };

        let student = query
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StudyBuddyError::StudentNotFound { id })?;

        Ok(student)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StudyBuddyError::StudentNotFound { id });
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, age, grade, last_modified FROM students WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn find_by_name_substring(&self, text: &str) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, name, age, grade, last_modified FROM students WHERE name ILIKE $1 ORDER BY name, id"
        )
        .bind(format!("%{}%", text))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn find_by_grade_exact(&self, grade: &str) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, name, age, grade, last_modified FROM students WHERE LOWER(grade) = LOWER($1) ORDER BY name, id"
        )
        .bind(grade)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }
}
