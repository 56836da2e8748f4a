use std::sync::Arc;

use lms_core::model::{CompletionSet, CourseId, Lesson, LessonId, UserId};
use services::ProgressService;

use crate::views::ViewError;
use crate::vm::{Toasts, markdown_to_html};

pub const COMPLETION_FAILED: &str = "Could not save your progress. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub id: LessonId,
    pub title: String,
    pub completed: bool,
}

/// A lesson ready for the viewer, content already rendered to safe HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPageVm {
    pub id: LessonId,
    pub title: String,
    pub html: String,
}

impl LessonPageVm {
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id().clone(),
            title: lesson.title().to_owned(),
            html: markdown_to_html(lesson.content()),
        }
    }
}

#[must_use]
pub fn map_lesson_rows(lessons: &[Lesson], completed: &CompletionSet) -> Vec<LessonRowVm> {
    lessons
        .iter()
        .map(|lesson| LessonRowVm {
            id: lesson.id().clone(),
            title: lesson.title().to_owned(),
            completed: completed.contains(lesson.id()),
        })
        .collect()
}

/// Persist a completion.
///
/// The write runs on its own tokio task, so it still lands if the view that
/// started it is torn down before it settles.
///
/// # Errors
///
/// Returns `ViewError::Unknown` if the write fails; the failure is logged.
pub async fn complete_lesson(
    progress: Arc<ProgressService>,
    user_id: UserId,
    course_id: CourseId,
    lesson_id: LessonId,
) -> Result<(), ViewError> {
    let write = tokio::spawn(async move {
        progress
            .mark_complete(&user_id, &course_id, &lesson_id)
            .await
    });

    match write.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "failed to save lesson completion");
            Err(ViewError::Unknown)
        }
        Err(err) => {
            tracing::error!(error = %err, "lesson completion task did not finish");
            Err(ViewError::Unknown)
        }
    }
}

/// Fold a settled completion write into the list's local set.
///
/// Only a confirmed write adds the lesson; a failure leaves the set as it was
/// and raises [`COMPLETION_FAILED`]. Returns whether the lesson was recorded.
pub fn apply_completion(
    completed: &mut CompletionSet,
    toasts: &mut impl Toasts,
    lesson_id: LessonId,
    result: Result<(), ViewError>,
) -> bool {
    match result {
        Ok(()) => {
            completed.merge(lesson_id);
            true
        }
        Err(_) => {
            toasts.error(COMPLETION_FAILED);
            false
        }
    }
}
