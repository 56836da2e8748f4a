use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, info};

use lms_core::model::{CompletionSet, CourseId, CourseProgress, Lesson, LessonId, UserId};
use storage::repository::{CourseRepository, ProgressRepository};

use crate::error::ProgressError;

/// Everything the lesson list needs for one course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDetail {
    /// `None` when the course document is missing.
    pub title: Option<String>,
    pub lessons: Vec<Lesson>,
    pub completed: CompletionSet,
}

/// Completion tracking and progress aggregation.
#[derive(Clone)]
pub struct ProgressService {
    courses: Arc<dyn CourseRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { courses, progress }
    }

    /// The user's completed lessons in `course_id`, empty if none are recorded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn completion_set(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<CompletionSet, ProgressError> {
        let progress = self.progress.get_progress(user_id).await?;
        Ok(progress
            .map(|p| p.completed_in(course_id))
            .unwrap_or_default())
    }

    /// Record that `user_id` finished `lesson_id`.
    ///
    /// Merge-upsert: idempotent and scoped to `course_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the write fails.
    pub async fn mark_complete(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<(), ProgressError> {
        self.progress
            .merge_completed(user_id, course_id, lesson_id)
            .await?;
        info!(%user_id, %course_id, %lesson_id, "lesson completed");
        Ok(())
    }

    /// Title, ordered lessons and completion set for one course.
    ///
    /// The three reads run concurrently; all must succeed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if any read fails.
    pub async fn course_detail(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<CourseDetail, ProgressError> {
        let (course, lessons, completed) = tokio::try_join!(
            async { self.courses.get_course(course_id).await.map_err(ProgressError::from) },
            async { self.courses.list_lessons(course_id).await.map_err(ProgressError::from) },
            self.completion_set(user_id, course_id),
        )?;

        Ok(CourseDetail {
            title: course.map(|c| c.title().to_owned()),
            lessons,
            completed,
        })
    }

    /// `(completed, total)` for every course, in course order.
    ///
    /// Lesson counts are fetched for all courses in parallel and joined; the
    /// first failing read fails the whole aggregate.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if any read fails.
    pub async fn course_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CourseProgress>, ProgressError> {
        let progress = self.progress.get_progress(user_id).await?;
        let courses = self.courses.list_courses().await?;

        let rows = try_join_all(courses.iter().map(|course| {
            let progress = progress.as_ref();
            async move {
                let total = self.courses.count_lessons(course.id()).await?;
                let completed = progress.map_or(0, |p| p.completed_count(course.id()));
                Ok::<_, ProgressError>(CourseProgress {
                    course_id: course.id().clone(),
                    title: course.title().to_owned(),
                    completed,
                    total,
                })
            }
        }))
        .await?;

        debug!(%user_id, courses = rows.len(), "aggregated progress");
        Ok(rows)
    }
}
