use std::collections::HashMap;

use color_eyre::eyre::{eyre, Result};
use sqlx::{PgPool, Row};

use crate::domain::{
    Batch, Course, CourseId, CourseName, CourseStore, CourseStoreError,
    UserId,
};

pub struct PostgresCourseStore {
    pool: PgPool,
}

impl PostgresCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CourseStore for PostgresCourseStore {
    #[tracing::instrument(name = "Adding course to PostgreSQL", skip_all)]
    async fn add_course(
        &mut self,
        course: Course,
    ) -> Result<(), CourseStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CourseStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO courses (id, name, description, teacher_id, batch)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(course.id.as_ref())
        .bind(course.name.as_ref())
        .bind(course.description.as_ref())
        .bind(course.teacher_id.as_ref().map(|id| *id.as_ref()))
        .bind(course.batch.as_ref().map(|b| b.as_ref()))
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                CourseStoreError::UnknownUserReference
            }
            err => CourseStoreError::UnexpectedError(eyre!(err)),
        })?;

        for student_id in &course.student_ids {
            sqlx::query(
                r#"
                INSERT INTO course_students (course_id, student_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(course.id.as_ref())
            .bind(student_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err)
                    if db_err.is_foreign_key_violation() =>
                {
                    CourseStoreError::UnknownUserReference
                }
                err => CourseStoreError::UnexpectedError(eyre!(err)),
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| CourseStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(name = "Listing courses from PostgreSQL", skip_all)]
    async fn list_courses(&self) -> Result<Vec<Course>, CourseStoreError> {
        let unexpected = CourseStoreError::UnexpectedError;

        let course_rows = sqlx::query(
            r#"
            SELECT id, name, description, teacher_id, batch
            FROM courses
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unexpected(eyre!(e)))?;

        let student_rows = sqlx::query(
            "SELECT course_id, student_id FROM course_students",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unexpected(eyre!(e)))?;

        let mut students_by_course: HashMap<uuid::Uuid, Vec<UserId>> =
            HashMap::new();
        for row in &student_rows {
            let course_id: uuid::Uuid = row
                .try_get("course_id")
                .map_err(|e| unexpected(eyre!(e)))?;
            let student_id: uuid::Uuid = row
                .try_get("student_id")
                .map_err(|e| unexpected(eyre!(e)))?;
            students_by_course
                .entry(course_id)
                .or_default()
                .push(UserId::new(student_id));
        }

        course_rows
            .iter()
            .map(|row| {
                let id: uuid::Uuid =
                    row.try_get("id").map_err(|e| unexpected(eyre!(e)))?;
                let name: String =
                    row.try_get("name").map_err(|e| unexpected(eyre!(e)))?;
                let batch: Option<String> =
                    row.try_get("batch").map_err(|e| unexpected(eyre!(e)))?;
                let teacher_id: Option<uuid::Uuid> = row
                    .try_get("teacher_id")
                    .map_err(|e| unexpected(eyre!(e)))?;

                Ok(Course {
                    id: CourseId::new(id),
                    name: CourseName::parse(name)
                        .map_err(|e| unexpected(eyre!(e)))?,
                    description: row
                        .try_get("description")
                        .map_err(|e| unexpected(eyre!(e)))?,
                    teacher_id: teacher_id.map(UserId::new),
                    batch: batch
                        .map(Batch::parse_label)
                        .transpose()
                        .map_err(|e| unexpected(eyre!(e)))?,
                    student_ids: students_by_course
                        .remove(&id)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}
