use lms_core::model::{CourseId, LessonId, UserId, UserProgress};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT course_id, lesson_id
            FROM completed_lessons
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        // The record only exists once something has been completed.
        if rows.is_empty() {
            return Ok(None);
        }

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push((
                CourseId::new(row.try_get::<String, _>("course_id").map_err(ser)?),
                LessonId::new(row.try_get::<String, _>("lesson_id").map_err(ser)?),
            ));
        }
        Ok(Some(UserProgress::from_persisted(user_id.clone(), entries)))
    }

    async fn merge_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO completed_lessons (user_id, course_id, lesson_id)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, course_id, lesson_id) DO NOTHING
            ",
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .bind(lesson_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
