use thiserror::Error;

use crate::model::{CourseError, CredentialsError, LessonError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}
