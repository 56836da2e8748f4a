mod course;
mod ids;
mod lesson;
mod progress;
mod user;

pub use ids::{CourseId, LessonId, ParseIdError, UserId};

pub use course::{Course, CourseError, sort_courses};
pub use lesson::{Lesson, LessonError, sort_lessons};
pub use progress::{CompletionSet, CourseProgress, UserProgress};
pub use user::{Credentials, CredentialsError, MIN_PASSWORD_LEN, User, normalize_email};
