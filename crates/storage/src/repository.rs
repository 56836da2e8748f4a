use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lms_core::model::{
    Course, CourseId, Lesson, LessonId, User, UserId, UserProgress, sort_courses, sort_lessons,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of an account, including the password hash.
///
/// The hash never leaves the auth layer; everything above it sees [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    #[must_use]
    pub fn to_user(&self) -> User {
        User::new(self.id.clone(), self.email.clone())
    }
}

/// Read side of the content store, plus the authoring writes used by seeding.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses in ascending `order`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Fetch one course. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, StorageError>;

    /// Lessons of `course_id` in ascending `order`. Unknown courses have none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, StorageError>;

    /// Fetch one lesson. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_lesson(
        &self,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<Option<Lesson>, StorageError>;

    /// Number of lesson documents under `course_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn count_lessons(&self, course_id: &CourseId) -> Result<u32, StorageError>;

    /// Create or replace a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError>;

    /// Create or replace a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the owning course does not exist.
    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// The user's progress record, `Ok(None)` if nothing was ever completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>, StorageError>;

    /// Merge-upsert: add `lesson_id` to the user's set for `course_id`,
    /// creating the record if needed. Idempotent, and never touches the
    /// entries of other courses.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn merge_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<(), StorageError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StorageError>;

    /// Look an account up by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<BTreeMap<CourseId, Course>>>,
    lessons: Arc<Mutex<BTreeMap<(CourseId, LessonId), Lesson>>>,
    progress: Arc<Mutex<HashMap<UserId, UserProgress>>>,
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = self.courses.lock().map_err(poisoned)?;
        let mut courses: Vec<Course> = guard.values().cloned().collect();
        sort_courses(&mut courses);
        Ok(courses)
    }

    async fn get_course(&self, id: &CourseId) -> Result<Option<Course>, StorageError> {
        let guard = self.courses.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    async fn list_lessons(&self, course_id: &CourseId) -> Result<Vec<Lesson>, StorageError> {
        let guard = self.lessons.lock().map_err(poisoned)?;
        let mut lessons: Vec<Lesson> = guard
            .iter()
            .filter(|((owner, _), _)| owner == course_id)
            .map(|(_, lesson)| lesson.clone())
            .collect();
        sort_lessons(&mut lessons);
        Ok(lessons)
    }

    async fn get_lesson(
        &self,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<Option<Lesson>, StorageError> {
        let guard = self.lessons.lock().map_err(poisoned)?;
        Ok(guard.get(&(course_id.clone(), lesson_id.clone())).cloned())
    }

    async fn count_lessons(&self, course_id: &CourseId) -> Result<u32, StorageError> {
        let guard = self.lessons.lock().map_err(poisoned)?;
        let count = guard.keys().filter(|(owner, _)| owner == course_id).count();
        u32::try_from(count).map_err(|_| StorageError::Serialization("lesson count overflow".into()))
    }

    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        let mut guard = self.courses.lock().map_err(poisoned)?;
        guard.insert(course.id().clone(), course.clone());
        Ok(())
    }

    async fn upsert_lesson(&self, lesson: &Lesson) -> Result<(), StorageError> {
        let known_course = self
            .courses
            .lock()
            .map_err(poisoned)?
            .contains_key(lesson.course_id());
        if !known_course {
            return Err(StorageError::NotFound);
        }
        let mut guard = self.lessons.lock().map_err(poisoned)?;
        guard.insert(
            (lesson.course_id().clone(), lesson.id().clone()),
            lesson.clone(),
        );
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        Ok(guard.get(user_id).cloned())
    }

    async fn merge_completed(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        lesson_id: &LessonId,
    ) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(poisoned)?;
        guard
            .entry(user_id.clone())
            .or_insert_with(|| UserProgress::new(user_id.clone()))
            .mark_complete(course_id.clone(), lesson_id.clone());
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let mut guard = self.users.lock().map_err(poisoned)?;
        if guard.contains_key(&user.email) {
            return Err(StorageError::Conflict);
        }
        guard.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let guard = self.users.lock().map_err(poisoned)?;
        Ok(guard.get(email).cloned())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let users: Arc<dyn UserRepository> = Arc::new(repo);
        Self {
            courses,
            progress,
            users,
        }
    }
}
