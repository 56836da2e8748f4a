use async_trait::async_trait;
use lms_core::model::{Course, CourseId, Lesson, LessonId};
use storage::repository::{CourseRepository, Storage, StorageError};

use super::test_harness::{
    ViewKind, seed_course, seed_default_courses, setup_view_harness,
    setup_view_harness_with_storage,
};

struct FailingCourses;

#[async_trait]
impl CourseRepository for FailingCourses {
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_course(&self, _id: &CourseId) -> Result<Option<Course>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_lessons(&self, _id: &CourseId) -> Result<Vec<Lesson>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_lesson(
        &self,
        _course_id: &CourseId,
        _lesson_id: &LessonId,
    ) -> Result<Option<Lesson>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn count_lessons(&self, _id: &CourseId) -> Result<u32, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn upsert_course(&self, _course: &Course) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn upsert_lesson(&self, _lesson: &Lesson) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

fn failing_storage() -> Storage {
    let mut storage = Storage::in_memory();
    storage.courses = std::sync::Arc::new(FailingCourses);
    storage
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_lists_courses_in_order() {
    let mut harness = setup_view_harness(ViewKind::Catalog).await;
    harness.settle().await;
    let html = harness.render();

    let basics = html.find("Rust Basics").expect("first course rendered");
    let async_rust = html.find("Async Rust").expect("second course rendered");
    assert!(basics < async_rust, "courses out of order in {html}");
    assert!(html.contains("Start learning"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_settles_empty_on_read_failure() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Catalog, failing_storage()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No courses yet."), "missing empty state in {html}");
    assert!(!html.contains("Loading..."), "still loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_list_marks_completed_lessons() {
    let course_id = CourseId::new("rust-basics");
    let mut harness = setup_view_harness(ViewKind::LessonList(course_id.clone())).await;
    let user_id = harness.user.id().clone();
    harness
        .services
        .progress()
        .mark_complete(&user_id, &course_id, &LessonId::new("l2"))
        .await
        .expect("mark complete");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rust Basics"), "missing title in {html}");
    assert!(html.contains("Lesson 3"), "missing lessons in {html}");
    assert_eq!(html.matches("lesson-row--done").count(), 1, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_list_for_unknown_course_is_empty() {
    let mut harness = setup_view_harness(ViewKind::LessonList(CourseId::new("ghost"))).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("This course has no lessons yet."), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_viewer_renders_markdown() {
    let view = ViewKind::LessonViewer(CourseId::new("rust-basics"), LessonId::new("l1"));
    let mut harness = setup_view_harness(view).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("<h2>Part 1</h2>"), "missing rendered heading in {html}");
    assert!(html.contains("<strong>owner</strong>"), "missing emphasis in {html}");
    assert!(html.contains("Mark as complete"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_viewer_reports_missing_lesson() {
    let view = ViewKind::LessonViewer(CourseId::new("rust-basics"), LessonId::new("nope"));
    let mut harness = setup_view_harness(view).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson not found."), "{html}");
    assert!(!html.contains("Mark as complete"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_shows_counts_and_bars() {
    let mut harness = setup_view_harness(ViewKind::Progress).await;
    let user_id = harness.user.id().clone();
    harness
        .services
        .progress()
        .mark_complete(&user_id, &CourseId::new("rust-basics"), &LessonId::new("l1"))
        .await
        .expect("mark complete");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1 / 3 lessons"), "{html}");
    assert!(html.contains("0 / 5 lessons"), "{html}");
    assert!(html.contains("width: 33.3%"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_gives_empty_course_a_zero_bar() {
    let storage = Storage::in_memory();
    seed_course(&storage, "empty", "Coming Soon", 1, 0).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Progress, storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("0 / 0 lessons"), "{html}");
    assert!(html.contains("width: 0.0%"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_shows_workspace_for_signed_in_user() {
    let mut harness = setup_view_harness(ViewKind::Gate).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign out"), "{html}");
    assert!(html.contains("learner@example.com"), "{html}");
    assert!(html.contains("Start learning"), "catalog not mounted in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_follows_sign_out() {
    let mut harness = setup_view_harness(ViewKind::Gate).await;
    harness.settle().await;
    assert!(harness.render().contains("Sign out"));

    harness.services.auth().sign_out().await.expect("sign out");
    for _ in 0..4 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Sign in"), "{html}");
    assert!(html.contains("Create one"), "{html}");
    assert!(!html.contains("Sign out"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gate_shows_sign_in_when_signed_out() {
    let storage = Storage::in_memory();
    seed_default_courses(&storage).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Gate, storage).await;
    harness.services.auth().sign_out().await.expect("sign out");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("auth-form"), "{html}");
    assert!(!html.contains("Start learning"), "{html}");
}
