use lms_core::model::{Course, CourseId, Lesson, LessonId};

use super::SqliteRepository;
use super::mapping::{conn, is_foreign_key_violation, map_course_row, map_lesson_row, ser};
use crate::repository::{CourseRepository, StorageError};

#[async_trait::async_trait]
impl CourseRepository for SqliteRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, position
            FROM courses
            ORDER BY position ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut courses = Vec::with_capacity(rows.len());
        for row in rows {
            courses.push(map_course_row(&row)?);
        }
        Ok(courses)
    }

    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, position
            FROM courses WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_course_row).transpose()
    }

    async fn list_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT course_id, id, title, content, position
            FROM lessons
            WHERE course_id = ?1
            ORDER BY position ASC, id ASC
            ",
        )
        .bind(course_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut lessons = Vec::with_capacity(rows.len());
        for row in rows {
            lessons.push(map_lesson_row(&row)?);
        }
        Ok(lessons)
    }

    async fn get_lesson(
        &self,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<Option<Lesson>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT course_id, id, title, content, position
            FROM lessons
            WHERE course_id = ?1 AND id = ?2
            ",
        )
        .bind(course_id.as_str())
        .bind(lesson_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_lesson_row).transpose()
    }

    async fn count_lessons(&self, course_id: &CourseId) -> Result<u32, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE course_id = ?1")
            .bind(course_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;

        u32::try_from(count).map_err(|_| ser(format!("invalid lesson count: {count}")))
    }

    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO courses (id, title, description, position)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                position = excluded.position
            ",
        )
        .bind(course.id().as_str())
        .bind(course.title())
        .bind(course.description())
        .bind(course.order())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lessons (course_id, id, title, content, position)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(course_id, id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                position = excluded.position
            ",
        )
        .bind(lesson.course_id().as_str())
        .bind(lesson.id().as_str())
        .bind(lesson.title())
        .bind(lesson.content())
        .bind(lesson.order())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                StorageError::NotFound
            } else {
                conn(e)
            }
        })?;

        Ok(())
    }
}
