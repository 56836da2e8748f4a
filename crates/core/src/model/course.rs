use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CourseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A top-level content unit containing ordered lessons.
///
/// Courses are authored out-of-band and are read-only to the client.
/// `order` defines both display and fetch sequence (ascending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    order: i64,
}

impl Course {
    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the title is blank.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        order: i64,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            order,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn order(&self) -> i64 {
        self.order
    }
}

/// Sorts courses by ascending `order`.
///
/// Ties are not meaningful to callers; they fall back to id order so the
/// result is at least deterministic.
pub fn sort_courses(courses: &mut [Course]) {
    courses.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}
