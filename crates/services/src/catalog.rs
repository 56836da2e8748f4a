use std::sync::Arc;

use lms_core::model::{Course, CourseId, Lesson, LessonId};
use storage::repository::CourseRepository;

use crate::error::CatalogError;

/// Read access to courses and lessons.
#[derive(Clone)]
pub struct CatalogService {
    courses: Arc<dyn CourseRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// All courses ordered by ascending `order`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        let courses = self.courses.list_courses().await?;
        tracing::debug!(count = courses.len(), "fetched courses");
        Ok(courses)
    }

    /// Fetch a single lesson. `Ok(None)` is the not-found case, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn get_lesson(
        &self,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<Option<Lesson>, CatalogError> {
        Ok(self.courses.get_lesson(course_id, lesson_id).await?)
    }
}
